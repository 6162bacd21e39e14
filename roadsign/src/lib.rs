//! roadsign - Frame-by-frame traffic sign recognition
//!
//! A small pixel library and a recognizer built on it. A raw BGR frame is
//! converted to HSV, segmented for the sign color, cleaned with a median
//! filter, labeled into blobs, and the largest blob is classified by its
//! perimeter to bounding-box ratio.
//!
//! # Overview
//!
//! - Image buffers and drawing ([`ImageBuffer`], [`Rect`])
//! - netpbm I/O: PBM, PGM, PPM ([`io`])
//! - Color conversion, HSV segmentation, thresholding ([`color`])
//! - Median, mean and edge filters ([`filter`])
//! - Binary morphology ([`morph`])
//! - Blob labeling and measurement ([`region`])
//! - Sign classification and the frame recognizer ([`recog`])
//!
//! # Example
//!
//! ```
//! use roadsign::recog::{RecognizerOptions, SignColor, SignRecognizer};
//! use roadsign::ImageBuffer;
//!
//! let frame = ImageBuffer::from_bgr_frame(32, 24, &vec![0u8; 32 * 24 * 3]).unwrap();
//! let mut recognizer = SignRecognizer::new(32, 24, RecognizerOptions::default()).unwrap();
//! let outcome = recognizer.process_frame(&frame, SignColor::Red).unwrap();
//! assert_eq!(outcome.next_color, SignColor::Blue);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use roadsign_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use roadsign_color as color;
pub use roadsign_filter as filter;
pub use roadsign_io as io;
pub use roadsign_morph as morph;
pub use roadsign_recog as recog;
pub use roadsign_region as region;
