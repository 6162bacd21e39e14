//! roadsign-color - Color processing for sign detection
//!
//! This crate turns camera frames into binary masks:
//!
//! - **Color space conversion** ([`colorspace`]): BGR -> HSV, BGR -> gray,
//!   gray -> thermal BGR
//! - **Segmentation** ([`segment`]): HSV range masks, with a two-interval
//!   hue variant for colors that wrap around 0 degrees
//! - **Thresholding** ([`threshold`]): fixed, global-mean and local
//!   midpoint binarization of gray images

pub mod colorspace;
pub mod error;
pub mod segment;
pub mod threshold;

// Re-export core types
pub use roadsign_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

pub use colorspace::{
    Hsv, bgr_to_gray, bgr_to_hsv, gray_to_thermal, rgb_to_gray, rgb_to_hsv, thermal_rgb,
};
pub use segment::{HsvRange, hsv_segment};
pub use threshold::{threshold_global_mean, threshold_midpoint, threshold_to_binary};
