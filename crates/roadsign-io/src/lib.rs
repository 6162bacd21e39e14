//! roadsign-io - Netpbm image I/O for roadsign
//!
//! Reads and writes the three binary netpbm variants used to persist
//! pipeline images:
//!
//! - **PBM** (P4) - binary masks, 1 bit per pixel
//! - **PGM** (P5) - 8-bit single channel (gray, labels, masks)
//! - **PPM** (P6) - 8-bit three channel (frames, HSV data)
//!
//! # Examples
//!
//! ```no_run
//! use roadsign_io::{read_image, write_image};
//!
//! let img = read_image("frame.ppm").unwrap();
//! write_image(&img, "copy.ppm").unwrap();
//! ```

mod error;
pub mod format;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{PnmFormat, detect_format, detect_format_from_bytes};
pub use pnm::{pack_row_bits, packed_row_len, read_pnm, unpack_row_bits, write_pnm};

use roadsign_core::ImageBuffer;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read an image from a file
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<ImageBuffer> {
    let file = File::open(path.as_ref())?;
    read_pnm(BufReader::new(file))
}

/// Read an image from memory
pub fn read_image_mem(data: &[u8]) -> IoResult<ImageBuffer> {
    read_pnm(data)
}

/// Write an image to a file
///
/// The variant is chosen from the image: see [`pnm::format_for`].
pub fn write_image<P: AsRef<Path>>(img: &ImageBuffer, path: P) -> IoResult<()> {
    let file = File::create(path.as_ref())?;
    write_pnm(img, BufWriter::new(file))
}

/// Write an image to memory
pub fn write_image_mem(img: &ImageBuffer) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_pnm(img, &mut buffer)?;
    Ok(buffer)
}
