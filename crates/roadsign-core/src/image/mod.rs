//! ImageBuffer - The main image container
//!
//! `ImageBuffer` owns a row-major, interleaved byte array with no padding
//! between rows. One-channel images hold binary masks, grayscale data, or
//! blob labels; three-channel images hold BGR frames, HSV data, or
//! annotated copies of a frame.
//!
//! # Pixel layout
//!
//! - `stride = width * channels`
//! - `data.len() == stride * height`
//! - Sample `c` of pixel `(x, y)` lives at `y * stride + x * channels + c`
//!
//! # Ownership model
//!
//! A buffer is released when it is dropped. Operations take a `&ImageBuffer`
//! source and a `&mut ImageBuffer` destination; the borrow checker rules out
//! in-place use of windowed operators.

mod access;
mod draw;
mod histogram;
mod ops;
mod rgb;

pub use rgb::BgrComponent;

use crate::error::{Error, Result};

/// Largest allowed `levels` value.
pub const MAX_LEVELS: u32 = 255;

/// Number of interleaved samples per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// Binary, grayscale, or label image
    One = 1,
    /// BGR, HSV, or RGB image
    Three = 3,
}

impl Channels {
    /// Create `Channels` from a raw count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannels`] if `count` is not 1 or 3.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Channels::One),
            3 => Ok(Channels::Three),
            _ => Err(Error::InvalidChannels(count)),
        }
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn count(self) -> u32 {
        self as u32
    }
}

/// Owned 8-bit image
///
/// # Examples
///
/// ```
/// use roadsign_core::{Channels, ImageBuffer};
///
/// let img = ImageBuffer::new(640, 480, Channels::Three, 255).unwrap();
/// assert_eq!(img.stride(), 640 * 3);
/// assert_eq!(img.data().len(), 640 * 3 * 480);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    levels: u32,
    data: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new zero-filled image.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `channels` - Samples per pixel
    /// * `levels` - Maximum sample value (1 marks a binary image)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevels`] if `levels` is outside `1..=255`, or
    /// [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels, levels: u32) -> Result<Self> {
        Self::validate(width, height, levels)?;
        let len = Self::checked_len(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            levels,
            data: vec![0u8; len],
        })
    }

    /// Adopt an existing byte buffer.
    ///
    /// # Errors
    ///
    /// Same as [`ImageBuffer::new`], plus [`Error::BufferSize`] when
    /// `data.len() != width * channels * height`.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: Channels,
        levels: u32,
        data: Vec<u8>,
    ) -> Result<Self> {
        Self::validate(width, height, levels)?;
        let expected = Self::checked_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            levels,
            data,
        })
    }

    /// Copy a packed BGR frame (3 bytes per pixel, no row padding).
    pub fn from_bgr_frame(width: u32, height: u32, frame: &[u8]) -> Result<Self> {
        Self::from_raw(width, height, Channels::Three, MAX_LEVELS, frame.to_vec())
    }

    /// Create a zero-filled image with the same geometry as `self`.
    pub fn new_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            levels: self.levels,
            data: vec![0u8; self.data.len()],
        }
    }

    /// Create a zero-filled image with the same width/height but a
    /// different channel count.
    pub fn new_with_channels(&self, channels: Channels) -> Self {
        Self {
            width: self.width,
            height: self.height,
            channels,
            levels: self.levels,
            data: vec![0u8; Self::byte_len(self.width, self.height, channels)],
        }
    }

    fn validate(width: u32, height: u32, levels: u32) -> Result<()> {
        if levels == 0 || levels > MAX_LEVELS {
            return Err(Error::InvalidLevels(levels));
        }
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(())
    }

    fn checked_len(width: u32, height: u32, channels: Channels) -> Result<usize> {
        (width as usize)
            .checked_mul(channels.count() as usize)
            .and_then(|stride| stride.checked_mul(height as usize))
            .ok_or(Error::InvalidDimension { width, height })
    }

    #[inline]
    fn byte_len(width: u32, height: u32, channels: Channels) -> usize {
        width as usize * channels.count() as usize * height as usize
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get the maximum sample level.
    #[inline]
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Set the maximum sample level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevels`] if `levels` is outside `1..=255`.
    pub fn set_levels(&mut self, levels: u32) -> Result<()> {
        if levels == 0 || levels > MAX_LEVELS {
            return Err(Error::InvalidLevels(levels));
        }
        self.levels = levels;
        Ok(())
    }

    /// Check whether this image is marked binary (`levels == 1`).
    #[inline]
    pub fn is_binary(&self) -> bool {
        self.levels == 1
    }

    /// Get the number of bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels.count() as usize
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable raw access to the image data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Get one row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Get one row of samples mutably.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Consume the image and return its byte buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Check whether `other` has the same width and height.
    #[inline]
    pub fn same_size(&self, other: &ImageBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Check whether `other` has the same width, height, and channels.
    #[inline]
    pub fn same_geometry(&self, other: &ImageBuffer) -> bool {
        self.same_size(other) && self.channels == other.channels
    }

    /// Require `other` to have the same width and height.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] otherwise.
    pub fn check_size(&self, other: &ImageBuffer) -> Result<()> {
        if self.same_size(other) {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (other.width, other.height),
            })
        }
    }

    /// Require this image to have `expected` channels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] otherwise.
    pub fn check_channels(&self, expected: Channels) -> Result<()> {
        if self.channels == expected {
            Ok(())
        } else {
            Err(Error::ChannelMismatch {
                expected: expected.count(),
                actual: self.channels.count(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layout() {
        let img = ImageBuffer::new(7, 5, Channels::Three, 255).unwrap();
        assert_eq!(img.stride(), 21);
        assert_eq!(img.data().len(), 105);
        assert!(img.data().iter().all(|&v| v == 0));
        assert!(!img.is_binary());
    }

    #[test]
    fn test_new_rejects_bad_levels() {
        assert!(matches!(
            ImageBuffer::new(4, 4, Channels::One, 0),
            Err(Error::InvalidLevels(0))
        ));
        assert!(matches!(
            ImageBuffer::new(4, 4, Channels::One, 256),
            Err(Error::InvalidLevels(256))
        ));
        assert!(ImageBuffer::new(4, 4, Channels::One, 1).unwrap().is_binary());
    }

    #[test]
    fn test_new_rejects_zero_size() {
        assert!(matches!(
            ImageBuffer::new(0, 4, Channels::One, 255),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_new_rejects_overflowing_size() {
        assert!(matches!(
            ImageBuffer::new(u32::MAX, u32::MAX, Channels::Three, 255),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_from_raw_checks_length() {
        let err = ImageBuffer::from_raw(2, 2, Channels::Three, 255, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSize {
                expected: 12,
                actual: 11
            }
        ));
        let img = ImageBuffer::from_bgr_frame(2, 2, &[1; 12]).unwrap();
        assert_eq!(img.channels(), Channels::Three);
        assert_eq!(img.into_raw(), vec![1; 12]);
    }

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::from_count(1).unwrap(), Channels::One);
        assert_eq!(Channels::from_count(3).unwrap(), Channels::Three);
        assert!(Channels::from_count(4).is_err());
    }

    #[test]
    fn test_geometry_checks() {
        let a = ImageBuffer::new(4, 3, Channels::Three, 255).unwrap();
        let b = a.new_with_channels(Channels::One);
        assert!(a.same_size(&b));
        assert!(!a.same_geometry(&b));
        assert!(a.check_size(&b).is_ok());
        assert!(b.check_channels(Channels::One).is_ok());
        assert!(matches!(
            b.check_channels(Channels::Three),
            Err(Error::ChannelMismatch {
                expected: 3,
                actual: 1
            })
        ));
        let c = ImageBuffer::new(5, 3, Channels::One, 255).unwrap();
        assert!(matches!(
            b.check_size(&c),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_rows() {
        let mut img = ImageBuffer::new(3, 2, Channels::One, 255).unwrap();
        img.row_mut(1).copy_from_slice(&[7, 8, 9]);
        assert_eq!(img.row(0), &[0, 0, 0]);
        assert_eq!(img.row(1), &[7, 8, 9]);
    }
}
