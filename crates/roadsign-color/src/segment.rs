//! HSV range segmentation
//!
//! Thresholds a quantized HSV image (see [`crate::colorspace`]) into a
//! binary mask. Each stored byte is first mapped back to human units:
//! hue to whole degrees in [0, 360], saturation and value to whole percent
//! in [0, 100]. A pixel is foreground (255) when all three fall inside the
//! inclusive bounds of an [`HsvRange`].
//!
//! Red straddles 0 degrees, so a range may carry a second hue interval; the
//! hue then passes when it lies in either one.

use crate::{ColorError, ColorResult};
use roadsign_core::{BACKGROUND, Channels, FOREGROUND, ImageBuffer};

// =============================================================================
// Options
// =============================================================================

/// Inclusive HSV bounds in degrees and percent
///
/// # Examples
///
/// ```
/// use roadsign_color::HsvRange;
///
/// let red = HsvRange::red_sign();
/// assert!(red.contains(350, 80, 80));
/// assert!(red.contains(10, 80, 80));
/// assert!(!red.contains(180, 80, 80));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    /// Hue interval, degrees
    pub hue: (u32, u32),
    /// Optional second hue interval, degrees
    pub hue_alt: Option<(u32, u32)>,
    /// Saturation interval, percent
    pub sat: (u32, u32),
    /// Value interval, percent
    pub val: (u32, u32),
}

impl Default for HsvRange {
    fn default() -> Self {
        Self::full()
    }
}

impl HsvRange {
    /// Create a single-interval range.
    pub fn new(hue: (u32, u32), sat: (u32, u32), val: (u32, u32)) -> Self {
        Self {
            hue,
            hue_alt: None,
            sat,
            val,
        }
    }

    /// Create a range whose hue passes in either of two intervals.
    pub fn dual(hue: (u32, u32), hue_alt: (u32, u32), sat: (u32, u32), val: (u32, u32)) -> Self {
        Self {
            hue,
            hue_alt: Some(hue_alt),
            sat,
            val,
        }
    }

    /// Range accepting every pixel.
    pub fn full() -> Self {
        Self::new((0, 360), (0, 100), (0, 100))
    }

    /// Calibrated range for blue sign paint.
    pub fn blue_sign() -> Self {
        Self::new((192, 289), (10, 100), (15, 100))
    }

    /// Calibrated range for red sign paint.
    pub fn red_sign() -> Self {
        Self::dual((0, 34), (335, 360), (30, 100), (35, 100))
    }

    /// Set the second hue interval.
    pub fn with_hue_alt(mut self, min: u32, max: u32) -> Self {
        self.hue_alt = Some((min, max));
        self
    }

    /// Set the saturation interval.
    pub fn with_sat(mut self, min: u32, max: u32) -> Self {
        self.sat = (min, max);
        self
    }

    /// Set the value interval.
    pub fn with_val(mut self, min: u32, max: u32) -> Self {
        self.val = (min, max);
        self
    }

    fn validate(&self) -> ColorResult<()> {
        let intervals = [
            ("hue", self.hue, 360),
            ("saturation", self.sat, 100),
            ("value", self.val, 100),
        ];
        for (name, (min, max), limit) in intervals {
            if min > max || max > limit {
                return Err(ColorError::InvalidParameters(format!(
                    "{name} interval [{min}, {max}] outside [0, {limit}]"
                )));
            }
        }
        match self.hue_alt {
            Some((min, max)) if min > max || max > 360 => Err(ColorError::InvalidParameters(
                format!("hue interval [{min}, {max}] outside [0, 360]"),
            )),
            _ => Ok(()),
        }
    }

    /// Test a pixel given in degrees and percent.
    #[inline]
    pub fn contains(&self, h: u32, s: u32, v: u32) -> bool {
        let in_range = |(min, max): (u32, u32), x: u32| x >= min && x <= max;
        let hue_ok = in_range(self.hue, h) || self.hue_alt.is_some_and(|alt| in_range(alt, h));
        hue_ok && in_range(self.sat, s) && in_range(self.val, v)
    }
}

/// Map a stored HSV byte triple to (degrees, percent, percent).
#[inline]
pub fn dequantize(hsv: &[u8]) -> (u32, u32, u32) {
    let h = (hsv[0] as f32 / 255.0 * 360.0).round() as u32;
    let s = (hsv[1] as f32 / 255.0 * 100.0).round() as u32;
    let v = (hsv[2] as f32 / 255.0 * 100.0).round() as u32;
    (h, s, v)
}

// =============================================================================
// Main API
// =============================================================================

/// Segment an HSV image into a binary mask
///
/// # Arguments
///
/// * `src` - Three-channel quantized HSV image
/// * `dst` - One-channel destination of the same size
/// * `range` - Bounds a pixel must satisfy to become foreground
///
/// # Errors
///
/// Fails on channel or size mismatch, or when an interval of `range` is
/// reversed or out of bounds. `dst` is untouched on error.
pub fn hsv_segment(src: &ImageBuffer, dst: &mut ImageBuffer, range: &HsvRange) -> ColorResult<()> {
    src.check_geometry(Channels::Three, dst, Channels::One)?;
    range.validate()?;

    for (s, d) in src.data().chunks_exact(3).zip(dst.data_mut().iter_mut()) {
        let (h, sat, v) = dequantize(s);
        *d = if range.contains(h, sat, v) {
            FOREGROUND
        } else {
            BACKGROUND
        };
    }
    Ok(())
}
