//! Whole-image operations
//!
//! Copying between images of identical geometry and negatives of gray,
//! color and binary images.

use super::ImageBuffer;
use crate::error::{Error, Result};

impl ImageBuffer {
    /// Copy every sample of `src` into this image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] or [`Error::ChannelMismatch`] if
    /// the geometries differ. The destination is untouched on error.
    pub fn copy_from(&mut self, src: &ImageBuffer) -> Result<()> {
        self.check_size(src)?;
        if self.channels != src.channels {
            return Err(Error::ChannelMismatch {
                expected: self.channels.count(),
                actual: src.channels.count(),
            });
        }
        self.data.copy_from_slice(&src.data);
        self.levels = src.levels;
        Ok(())
    }

    /// Invert every sample in place (`v -> 255 - v`).
    ///
    /// Applies to every channel, so it yields the negative of a gray or BGR
    /// image. On a 0/255 mask this swaps foreground and background.
    pub fn invert(&mut self) {
        for v in self.data.iter_mut() {
            *v = 255 - *v;
        }
    }

    /// Normalize a mask so every nonzero sample becomes 255.
    pub fn normalize_binary(&mut self) {
        for v in self.data.iter_mut() {
            if *v != 0 {
                *v = 255;
            }
        }
    }

    /// Count nonzero samples.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}
