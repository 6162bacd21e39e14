//! PNM (Portable Any Map) format support
//!
//! Reads and writes PBM (P4 binary), PGM (P5 binary), and PPM (P6 binary).
//! ASCII variants (P1/P2/P3) are not supported.
//!
//! # Header
//!
//! Fields are separated by whitespace; a `#` starts a comment that runs to
//! the end of the line. A field ends at whitespace, `#`, or end of input.
//! The single whitespace byte ending the last field is consumed, and the
//! raw payload starts right after it.
//!
//! # PBM bit packing
//!
//! Rows are packed independently, MSB first, each row padded with zero bits
//! to a whole byte. A foreground sample (nonzero) is stored as bit 0 and a
//! background sample (0) as bit 1. Decoding maps bit 0 to 255 and bit 1 to
//! 0, and marks the image binary (`levels == 1`).

use crate::format::PnmFormat;
use crate::{IoError, IoResult};
use roadsign_core::{BACKGROUND, Channels, FOREGROUND, ImageBuffer};
use std::io::{BufRead, Read, Write};
use tracing::debug;

/// Longest header field accepted by the tokenizer
const MAX_TOKEN_LEN: usize = 32;

/// Largest payload buffer reserved before any payload byte is read
const MAX_PREALLOC: usize = 1 << 20;

/// Get the number of bytes of one packed PBM row.
#[inline]
pub fn packed_row_len(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

/// Pack one row of samples into PBM bits.
///
/// `out` must hold at least `packed_row_len(row.len())` bytes; the bytes
/// covering the row are overwritten, trailing pad bits are zero.
pub fn pack_row_bits(row: &[u8], out: &mut [u8]) {
    let nbytes = row.len().div_ceil(8);
    out[..nbytes].fill(0);
    for (x, &v) in row.iter().enumerate() {
        if v == BACKGROUND {
            out[x / 8] |= 0x80 >> (x % 8);
        }
    }
}

/// Unpack one PBM row into samples.
///
/// `out.len()` is the row width; `bits` must hold
/// `packed_row_len(out.len())` bytes.
pub fn unpack_row_bits(bits: &[u8], out: &mut [u8]) {
    for (x, v) in out.iter_mut().enumerate() {
        let bit = (bits[x / 8] >> (7 - x % 8)) & 1;
        *v = if bit == 0 { FOREGROUND } else { BACKGROUND };
    }
}

fn peek_byte<R: BufRead>(reader: &mut R) -> IoResult<Option<u8>> {
    let buf = reader.fill_buf()?;
    Ok(buf.first().copied())
}

/// Read the next header field.
///
/// Returns an empty token at end of input.
fn next_token<R: BufRead>(reader: &mut R) -> IoResult<Vec<u8>> {
    // Skip whitespace and comment lines
    loop {
        match peek_byte(reader)? {
            Some(c) if c.is_ascii_whitespace() => reader.consume(1),
            Some(b'#') => {
                let mut comment = Vec::new();
                reader.read_until(b'\n', &mut comment)?;
            }
            _ => break,
        }
    }

    let mut token = Vec::new();
    while let Some(c) = peek_byte(reader)? {
        if c == b'#' {
            break;
        }
        reader.consume(1);
        if c.is_ascii_whitespace() {
            break;
        }
        if token.len() >= MAX_TOKEN_LEN {
            return Err(IoError::InvalidData("header field too long".to_string()));
        }
        token.push(c);
    }
    Ok(token)
}

fn next_u32<R: BufRead>(reader: &mut R, field: &str) -> IoResult<u32> {
    let token = next_token(reader)?;
    std::str::from_utf8(&token)
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| IoError::InvalidData(format!("bad {field} in header")))
}

/// Payload size declared by a header, `row_len * height`.
fn payload_len(row_len: usize, height: u32) -> IoResult<usize> {
    row_len
        .checked_mul(height as usize)
        .ok_or_else(|| IoError::InvalidData("declared image size overflows".to_string()))
}

fn read_payload<R: Read>(reader: &mut R, expected: usize) -> IoResult<Vec<u8>> {
    let mut payload = Vec::with_capacity(expected.min(MAX_PREALLOC));
    reader.take(expected as u64).read_to_end(&mut payload)?;
    if payload.len() != expected {
        return Err(IoError::Truncated {
            expected,
            actual: payload.len(),
        });
    }
    Ok(payload)
}

/// Read a PNM image (P4/P5/P6) from a reader.
///
/// # Arguments
/// * `reader` - A buffered reader positioned at the magic number
///
/// # Returns
/// A one-channel binary image with `levels == 1` (PBM), a one-channel image
/// (PGM), or a three-channel image (PPM). For PGM/PPM `levels` is the
/// header's max value.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<ImageBuffer> {
    let magic = next_token(&mut reader)?;
    let format = PnmFormat::from_magic(&magic).ok_or_else(|| {
        IoError::UnsupportedFormat(format!(
            "bad magic number {:?}",
            String::from_utf8_lossy(&magic)
        ))
    })?;

    let width = next_u32(&mut reader, "width")?;
    let height = next_u32(&mut reader, "height")?;
    let levels = match format {
        PnmFormat::Pbm => 1,
        PnmFormat::Pgm | PnmFormat::Ppm => {
            let levels = next_u32(&mut reader, "max value")?;
            if levels == 0 || levels > 255 {
                return Err(IoError::InvalidData(format!(
                    "max value {levels} outside 1..=255"
                )));
            }
            levels
        }
    };
    if width == 0 || height == 0 {
        return Err(roadsign_core::Error::InvalidDimension { width, height }.into());
    }
    debug!(?format, width, height, levels, "parsed netpbm header");

    match format {
        PnmFormat::Pbm => {
            let row_len = packed_row_len(width);
            let packed = read_payload(&mut reader, payload_len(row_len, height)?)?;
            let mut img = ImageBuffer::new(width, height, Channels::One, 1)?;
            for (y, bits) in packed.chunks_exact(row_len).enumerate() {
                unpack_row_bits(bits, img.row_mut(y as u32));
            }
            Ok(img)
        }
        PnmFormat::Pgm | PnmFormat::Ppm => {
            let channels = Channels::from_count(format.channels())?;
            let row_len = (width as usize)
                .checked_mul(channels.count() as usize)
                .ok_or_else(|| IoError::InvalidData("declared image size overflows".to_string()))?;
            let data = read_payload(&mut reader, payload_len(row_len, height)?)?;
            Ok(ImageBuffer::from_raw(width, height, channels, levels, data)?)
        }
    }
}

/// Choose the netpbm variant an image is written as.
///
/// `levels == 1` selects PBM; otherwise the channel count decides.
pub fn format_for(img: &ImageBuffer) -> PnmFormat {
    if img.is_binary() {
        PnmFormat::Pbm
    } else {
        match img.channels() {
            Channels::One => PnmFormat::Pgm,
            Channels::Three => PnmFormat::Ppm,
        }
    }
}

/// Write an image as binary PNM.
///
/// Chooses P4 for binary images, P5 for other one-channel images, and P6
/// for three-channel images.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for a three-channel image marked
/// binary.
pub fn write_pnm<W: Write>(img: &ImageBuffer, mut writer: W) -> IoResult<()> {
    let format = format_for(img);
    let (width, height) = (img.width(), img.height());

    match format {
        PnmFormat::Pbm => {
            if img.channels() != Channels::One {
                return Err(IoError::UnsupportedFormat(
                    "PBM requires a one-channel image".to_string(),
                ));
            }
            writeln!(writer, "{} {} {}", format.magic(), width, height)?;
            let mut bits = vec![0u8; packed_row_len(width)];
            for y in 0..height {
                pack_row_bits(img.row(y), &mut bits);
                writer.write_all(&bits)?;
            }
        }
        PnmFormat::Pgm | PnmFormat::Ppm => {
            writeln!(
                writer,
                "{} {} {} {}",
                format.magic(),
                width,
                height,
                img.levels()
            )?;
            writer.write_all(img.data())?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_row_bits() {
        let row = [255, 0, 255, 255, 0, 0, 0, 0, 0, 255];
        let mut out = [0xAAu8; 2];
        pack_row_bits(&row, &mut out);
        assert_eq!(out, [0b0100_1111, 0b1000_0000]);
    }

    #[test]
    fn test_unpack_row_bits() {
        let mut out = [7u8; 10];
        unpack_row_bits(&[0b0100_1111, 0b1000_0000], &mut out);
        assert_eq!(out, [255, 0, 255, 255, 0, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn test_tokenizer_skips_comments() {
        let mut r: &[u8] = b"  # comment\n\tP5#x\n 12";
        assert_eq!(next_token(&mut r).unwrap(), b"P5");
        // The '#' ending a field is left for the next call
        assert_eq!(next_token(&mut r).unwrap(), b"12");
        assert!(next_token(&mut r).unwrap().is_empty());
    }

    #[test]
    fn test_tokenizer_consumes_one_separator() {
        let mut r: &[u8] = b"255\n\n";
        assert_eq!(next_token(&mut r).unwrap(), b"255");
        assert_eq!(r, b"\n");
    }

    #[test]
    fn test_read_pgm() {
        let data: &[u8] = b"P5\n# made by hand\n3 2\n200\n\x01\x02\x03\x04\x05\x06";
        let img = read_pnm(data).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.channels(), Channels::One);
        assert_eq!(img.levels(), 200);
        assert_eq!(img.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_read_pbm() {
        let data: &[u8] = b"P4 3 2\n\x40\xA0";
        let img = read_pnm(data).unwrap();
        assert!(img.is_binary());
        assert_eq!(img.data(), &[255, 0, 255, 0, 255, 0]);
    }

    #[test]
    fn test_read_errors() {
        assert!(matches!(
            read_pnm(&b"P3 1 1 255\n\0\0\0"[..]),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(&b"P5 x 1 255\n\0"[..]),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(&b"P5 1 1 256\n\0"[..]),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(&b"P5 1 1 0\n\0"[..]),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(&b"P6 2 2 255\n\0\0\0"[..]),
            Err(IoError::Truncated {
                expected: 12,
                actual: 3
            })
        ));
        assert!(matches!(
            read_pnm(&b"P4 0 2\n"[..]),
            Err(IoError::Core(_))
        ));
    }

    #[test]
    fn test_read_oversized_header() {
        // w * h * 3 does not fit in usize
        assert!(matches!(
            read_pnm(&b"P6 4294967295 4294967295 255\n\0\0\0"[..]),
            Err(IoError::InvalidData(_))
        ));
        // Fits, but the payload is nowhere near the declared size
        assert!(matches!(
            read_pnm(&b"P5 1000000 1000000 255\n\0\0"[..]),
            Err(IoError::Truncated {
                expected: 1_000_000_000_000,
                actual: 2
            })
        ));
        assert!(matches!(
            read_pnm(&b"P4 4294967295 4294967295\n\0"[..]),
            Err(IoError::Truncated { actual: 1, .. })
        ));
    }

    #[test]
    fn test_write_headers() {
        let mut buf = Vec::new();
        let gray = ImageBuffer::from_raw(2, 1, Channels::One, 255, vec![9, 8]).unwrap();
        write_pnm(&gray, &mut buf).unwrap();
        assert_eq!(buf, b"P5 2 1 255\n\x09\x08");

        buf.clear();
        let bin = ImageBuffer::from_raw(2, 1, Channels::One, 1, vec![255, 0]).unwrap();
        write_pnm(&bin, &mut buf).unwrap();
        assert_eq!(buf, b"P4 2 1\n\x40");

        let bad = ImageBuffer::new(2, 1, Channels::Three, 1).unwrap();
        assert!(write_pnm(&bad, Vec::new()).is_err());
    }
}
