//! Pixel access functions
//!
//! Getting and setting individual samples, whole-pixel fills, and the
//! combined geometry check used by operations with a source and a
//! destination image.

use super::{Channels, ImageBuffer};
use crate::error::{Error, Result};

impl ImageBuffer {
    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride() + x as usize * self.channels.count() as usize
    }

    /// Get the samples of the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds. The slice has one
    /// element per channel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = self.offset(x, y);
        Some(&self.data[start..start + self.channels.count() as usize])
    }

    /// Get the first sample of the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> Option<u8> {
        self.pixel(x, y).map(|p| p[0])
    }

    /// Set the pixel at (x, y).
    ///
    /// `value` must have one element per channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds,
    /// or [`Error::ChannelMismatch`] if `value` has the wrong length.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: &[u8]) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let n = self.channels.count() as usize;
        if value.len() != n {
            return Err(Error::ChannelMismatch {
                expected: n as u32,
                actual: value.len() as u32,
            });
        }
        let start = self.offset(x, y);
        self.data[start..start + n].copy_from_slice(value);
        Ok(())
    }

    /// Set every pixel to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if `value` has the wrong length.
    pub fn fill(&mut self, value: &[u8]) -> Result<()> {
        let n = self.channels.count() as usize;
        if value.len() != n {
            return Err(Error::ChannelMismatch {
                expected: n as u32,
                actual: value.len() as u32,
            });
        }
        for px in self.data.chunks_exact_mut(n) {
            px.copy_from_slice(value);
        }
        Ok(())
    }

    /// Require `other` to match this image's size, and both images to
    /// carry the given channel counts.
    ///
    /// Used by operations that read `self` and write `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] or [`Error::DimensionMismatch`].
    pub fn check_geometry(
        &self,
        self_channels: Channels,
        other: &ImageBuffer,
        other_channels: Channels,
    ) -> Result<()> {
        self.check_channels(self_channels)?;
        other.check_channels(other_channels)?;
        self.check_size(other)
    }
}
