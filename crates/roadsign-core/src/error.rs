//! Error types for roadsign-core
//!
//! Provides a unified error type for buffer allocation and geometry checks.
//! Every image operation validates its inputs through these variants before
//! touching a destination buffer, so a failed call never leaves a partially
//! written image behind.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Maximum sample level outside 1..=255
    #[error("invalid levels: {0} (must be in 1..=255)")]
    InvalidLevels(u32),

    /// Channel count other than 1 or 3
    #[error("invalid channel count: {0} (must be 1 or 3)")]
    InvalidChannels(u32),

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Wrong number of channels for this operation
    #[error("channel mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: u32, actual: u32 },

    /// Raw buffer length does not match stride x height
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: ({x}, {y}) in {width}x{height}")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
