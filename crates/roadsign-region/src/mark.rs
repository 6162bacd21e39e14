//! Blob marking
//!
//! Copies a color frame and burns each blob's bounding box and a centroid
//! cross-hair into the copy. Drawing is clipped to the image, so blobs
//! near the edge or with stale geometry never write out of bounds.

use crate::blob::Blob;
use crate::error::RegionResult;
use roadsign_core::{Channels, ImageBuffer};

/// Options for blob marking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOptions {
    /// BGR color of the box and cross-hair
    pub color: [u8; 3],
    /// Box line thickness in pixels
    pub thickness: u32,
    /// Cross-hair arm length in pixels (0 disables the cross-hair)
    pub cross_arm: u32,
}

impl Default for MarkOptions {
    fn default() -> Self {
        Self {
            color: [255, 255, 255],
            thickness: 1,
            cross_arm: 1,
        }
    }
}

impl MarkOptions {
    /// Set the marking color (BGR)
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Set the box line thickness
    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the cross-hair arm length
    pub fn with_cross_arm(mut self, cross_arm: u32) -> Self {
        self.cross_arm = cross_arm;
        self
    }
}

fn draw(dst: &mut ImageBuffer, blob: &Blob, options: &MarkOptions) -> RegionResult<()> {
    dst.draw_rect_outline(&blob.bbox, options.thickness, &options.color)?;
    if options.cross_arm > 0 {
        dst.draw_cross(blob.xc, blob.yc, options.cross_arm, &options.color)?;
    }
    Ok(())
}

/// Copy `src` into `dst` and mark every blob
///
/// # Errors
///
/// Fails unless both images have 3 channels and the same size.
pub fn mark_blobs(
    src: &ImageBuffer,
    dst: &mut ImageBuffer,
    blobs: &[Blob],
    options: &MarkOptions,
) -> RegionResult<()> {
    src.check_geometry(Channels::Three, dst, Channels::Three)?;
    dst.copy_from(src)?;
    for blob in blobs {
        draw(dst, blob, options)?;
    }
    Ok(())
}

/// Copy `src` into `dst` and mark a single blob
pub fn mark_blob(
    src: &ImageBuffer,
    dst: &mut ImageBuffer,
    blob: &Blob,
    options: &MarkOptions,
) -> RegionResult<()> {
    mark_blobs(src, dst, std::slice::from_ref(blob), options)
}
