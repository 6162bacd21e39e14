//! roadsign-core - Basic data structures for the roadsign pipeline
//!
//! This crate provides the fundamental types shared by every stage of the
//! traffic sign recognition pipeline:
//!
//! - [`ImageBuffer`] - Owned, interleaved 8-bit pixel storage (1 or 3 channels)
//! - [`Channels`] - Channel count of an image
//! - [`Rect`] - Axis-aligned rectangle (bounding boxes)
//!
//! Images are plain owned buffers. Operations borrow their source with `&`
//! and their destination with `&mut`, so a source can never alias the
//! destination it is being written into.

pub mod error;
pub mod image;
pub mod rect;

pub use error::{Error, Result};
pub use image::{BgrComponent, Channels, ImageBuffer, MAX_LEVELS};
pub use rect::Rect;

/// Sample value of a foreground pixel in a binary image.
pub const FOREGROUND: u8 = 255;

/// Sample value of a background pixel in a binary image.
pub const BACKGROUND: u8 = 0;
