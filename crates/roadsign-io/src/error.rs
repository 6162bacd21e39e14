//! I/O error types
//!
//! Provides a unified error type for netpbm reading and writing. A missing
//! file, an unrecognized magic number, a malformed header, and a short
//! payload all surface as `Err(IoError)`; no partially decoded image is
//! ever returned.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The magic number is not one of P4, P5, P6
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The header is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// The payload ended before the declared size
    #[error("premature end of data: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// An error from the core library (e.g. invalid levels)
    #[error("core error: {0}")]
    Core(#[from] roadsign_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
