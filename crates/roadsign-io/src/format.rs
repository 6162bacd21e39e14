//! Image format detection
//!
//! Detects the netpbm variant from the magic number at the start of a file.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers of the supported netpbm variants
mod magic {
    pub const PBM_BINARY: &[u8] = b"P4";
    pub const PGM_BINARY: &[u8] = b"P5";
    pub const PPM_BINARY: &[u8] = b"P6";
}

/// Binary netpbm variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// P4: 1 bit per pixel, packed
    Pbm,
    /// P5: 8-bit grayscale
    Pgm,
    /// P6: 8-bit RGB
    Ppm,
}

impl PnmFormat {
    /// Parse a magic token (`"P4"`, `"P5"`, `"P6"`).
    pub fn from_magic(token: &[u8]) -> Option<Self> {
        match token {
            magic::PBM_BINARY => Some(Self::Pbm),
            magic::PGM_BINARY => Some(Self::Pgm),
            magic::PPM_BINARY => Some(Self::Ppm),
            _ => None,
        }
    }

    /// Get the magic token.
    pub fn magic(self) -> &'static str {
        match self {
            Self::Pbm => "P4",
            Self::Pgm => "P5",
            Self::Ppm => "P6",
        }
    }

    /// Get the conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pbm => "pbm",
            Self::Pgm => "pgm",
            Self::Ppm => "ppm",
        }
    }

    /// Number of channels of a decoded image.
    pub fn channels(self) -> u32 {
        match self {
            Self::Pbm | Self::Pgm => 1,
            Self::Ppm => 3,
        }
    }
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<PnmFormat> {
    let mut file = File::open(path).map_err(IoError::Io)?;
    let mut header = [0u8; 2];
    let bytes_read = file.read(&mut header).map_err(IoError::Io)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<PnmFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }
    PnmFormat::from_magic(&data[..2]).ok_or_else(|| {
        IoError::UnsupportedFormat(format!(
            "bad magic number {:?}",
            String::from_utf8_lossy(&data[..2])
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_bytes() {
        assert_eq!(detect_format_from_bytes(b"P4\n1 1\n").unwrap(), PnmFormat::Pbm);
        assert_eq!(detect_format_from_bytes(b"P5 ").unwrap(), PnmFormat::Pgm);
        assert_eq!(detect_format_from_bytes(b"P6").unwrap(), PnmFormat::Ppm);
        assert!(matches!(
            detect_format_from_bytes(b"P3"),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format_from_bytes(b"P"),
            Err(IoError::InvalidData(_))
        ));
    }

    #[test]
    fn test_format_properties() {
        assert_eq!(PnmFormat::Pbm.magic(), "P4");
        assert_eq!(PnmFormat::Ppm.extension(), "ppm");
        assert_eq!(PnmFormat::Pgm.channels(), 1);
        assert_eq!(PnmFormat::Ppm.channels(), 3);
    }
}
