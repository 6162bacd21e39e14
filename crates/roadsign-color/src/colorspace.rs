//! Color space conversion
//!
//! Frames arrive as interleaved BGR. The HSV image produced here keeps the
//! same three-channel layout and stores each component quantized to a byte:
//!
//! | channel | meaning | byte |
//! |---|---|---|
//! | 0 | hue, degrees in [0, 360) | `round(h / 360 * 255)` |
//! | 1 | saturation in [0, 1] | `round(s * 255)` |
//! | 2 | value, `max(r, g, b)` | `v` |

use crate::ColorResult;
use roadsign_core::{Channels, ImageBuffer};

/// HSV color of a single pixel
///
/// - `h`: Hue in degrees, [0.0, 360.0)
/// - `s`: Saturation in range [0.0, 1.0]
/// - `v`: Value in range [0.0, 255.0]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// Create a new HSV color
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Quantize to the byte triple stored in an HSV image.
    pub fn quantize(self) -> [u8; 3] {
        [
            (self.h / 360.0 * 255.0).round() as u8,
            (self.s * 255.0).round() as u8,
            self.v.round() as u8,
        ]
    }
}

/// Convert RGB values to HSV
///
/// Uses the hexagonal hue formula. Black has zero hue and saturation; a
/// gray (zero saturation) has zero hue.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    if max == 0.0 {
        return Hsv::new(0.0, 0.0, 0.0);
    }
    let s = (max - min) / max;
    if s == 0.0 {
        return Hsv::new(0.0, 0.0, max);
    }

    let delta = max - min;
    let h = if max == r && g >= b {
        60.0 * (g - b) / delta
    } else if max == r {
        360.0 + 60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    Hsv::new(h, s, max)
}

/// Convert RGB to grayscale using ITU-R BT.601 coefficients
///
/// Formula: gray = 0.299*R + 0.587*G + 0.114*B, truncated. Computed in
/// integer thousandths so white maps to exactly 255.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Convert a BGR image to quantized HSV
///
/// # Arguments
///
/// * `src` - Three-channel BGR image
/// * `dst` - Three-channel destination of the same size
///
/// # Errors
///
/// Fails unless both images have 3 channels and matching dimensions;
/// `dst` is untouched on error.
pub fn bgr_to_hsv(src: &ImageBuffer, dst: &mut ImageBuffer) -> ColorResult<()> {
    src.check_geometry(Channels::Three, dst, Channels::Three)?;

    for (s, d) in src
        .data()
        .chunks_exact(3)
        .zip(dst.data_mut().chunks_exact_mut(3))
    {
        d.copy_from_slice(&rgb_to_hsv(s[2], s[1], s[0]).quantize());
    }
    Ok(())
}

/// Convert a BGR image to gray
///
/// # Errors
///
/// Fails unless `src` has 3 channels, `dst` has 1, and the sizes match.
pub fn bgr_to_gray(src: &ImageBuffer, dst: &mut ImageBuffer) -> ColorResult<()> {
    src.check_geometry(Channels::Three, dst, Channels::One)?;

    for (s, d) in src.data().chunks_exact(3).zip(dst.data_mut().iter_mut()) {
        *d = rgb_to_gray(s[2], s[1], s[0]);
    }
    Ok(())
}

/// Map a gray level onto a blue-cyan-green-yellow-red scale.
///
/// Four ramps of 64 levels each: green rises, blue falls, red rises, then
/// green falls. Returns `(r, g, b)`.
pub fn thermal_rgb(v: u8) -> (u8, u8, u8) {
    let ramp = |start: u8| (v - start) * 4;
    match v {
        0..=63 => (0, ramp(0), 255),
        64..=127 => (0, 255, 255 - ramp(64)),
        128..=191 => (ramp(128), 255, 0),
        _ => (255, 255 - ramp(192), 0),
    }
}

/// Render a one-channel image as a BGR thermal map.
pub fn gray_to_thermal(src: &ImageBuffer, dst: &mut ImageBuffer) -> ColorResult<()> {
    src.check_geometry(Channels::One, dst, Channels::Three)?;

    for (&v, d) in src.data().iter().zip(dst.data_mut().chunks_exact_mut(3)) {
        let (r, g, b) = thermal_rgb(v);
        d.copy_from_slice(&[b, g, r]);
    }
    Ok(())
}
