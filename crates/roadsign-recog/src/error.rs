//! Error types for roadsign-recog

use thiserror::Error;

/// Errors that can occur during sign recognition
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] roadsign_core::Error),

    /// Color conversion or segmentation error
    #[error("color error: {0}")]
    Color(#[from] roadsign_color::ColorError),

    /// Mask filtering error
    #[error("filter error: {0}")]
    Filter(#[from] roadsign_filter::FilterError),

    /// Labeling or blob measurement error
    #[error("region error: {0}")]
    Region(#[from] roadsign_region::RegionError),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
