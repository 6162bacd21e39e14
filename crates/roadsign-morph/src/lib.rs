//! roadsign-morph - Binary morphology
//!
//! Erosion, dilation, opening and closing of one-channel masks with square
//! structuring elements. Any nonzero sample is foreground; results are
//! written as 0/255.
//!
//! These operations are general mask cleanup tools. The per-frame
//! recognizer relies on the median filter instead.

pub mod binary;
pub mod error;

pub use binary::{close, dilate, erode, open};
pub use error::{MorphError, MorphResult};
