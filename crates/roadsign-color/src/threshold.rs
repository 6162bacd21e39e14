//! Gray thresholding
//!
//! Binarization of one-channel gray images into 0/255 masks:
//!
//! - [`threshold_to_binary`]: fixed threshold
//! - [`threshold_global_mean`]: threshold at the image's mean brightness
//! - [`threshold_midpoint`]: per-pixel threshold at the midpoint of the
//!   local minimum and maximum

use crate::{ColorError, ColorResult};
use roadsign_core::{BACKGROUND, Channels, FOREGROUND, ImageBuffer};

fn check_gray_pair(src: &ImageBuffer, dst: &ImageBuffer) -> ColorResult<()> {
    src.check_geometry(Channels::One, dst, Channels::One)?;
    Ok(())
}

/// Binarize with a fixed threshold
///
/// Samples below `threshold` become 0; all others become 255.
pub fn threshold_to_binary(src: &ImageBuffer, dst: &mut ImageBuffer, threshold: u32) -> ColorResult<()> {
    check_gray_pair(src, dst)?;

    for (s, d) in src.data().iter().zip(dst.data_mut().iter_mut()) {
        *d = if (*s as u32) < threshold {
            BACKGROUND
        } else {
            FOREGROUND
        };
    }
    Ok(())
}

/// Binarize at the mean brightness of `src`
///
/// The mean is truncated to an integer before thresholding.
///
/// # Returns
///
/// The threshold that was applied.
pub fn threshold_global_mean(src: &ImageBuffer, dst: &mut ImageBuffer) -> ColorResult<u32> {
    check_gray_pair(src, dst)?;

    let total: u64 = src.data().iter().map(|&v| v as u64).sum();
    let threshold = (total / src.data().len() as u64) as u32;
    threshold_to_binary(src, dst, threshold)?;
    Ok(threshold)
}

/// Binarize against the local midpoint
///
/// For each pixel, the threshold is `(min + max) / 2` over the in-bounds
/// samples of the `kernel` x `kernel` window centered on it. The pixel
/// becomes 255 if it is strictly greater than the threshold.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] if `kernel` is even or < 3.
pub fn threshold_midpoint(src: &ImageBuffer, dst: &mut ImageBuffer, kernel: u32) -> ColorResult<()> {
    check_gray_pair(src, dst)?;
    if kernel < 3 || kernel % 2 == 0 {
        return Err(ColorError::InvalidParameters(format!(
            "kernel size must be odd and > 1, got {kernel}"
        )));
    }

    let w = src.width() as i32;
    let h = src.height() as i32;
    let half = (kernel / 2) as i32;
    let data = src.data();
    let out = dst.data_mut();

    for y in 0..h {
        for x in 0..w {
            let mut min = u8::MAX;
            let mut max = u8::MIN;
            for ky in (y - half).max(0)..=(y + half).min(h - 1) {
                let row = (ky * w) as usize;
                for kx in (x - half).max(0)..=(x + half).min(w - 1) {
                    let v = data[row + kx as usize];
                    min = min.min(v);
                    max = max.max(v);
                }
            }
            let threshold = (min as u32 + max as u32) / 2;
            let idx = (y * w + x) as usize;
            out[idx] = if data[idx] as u32 > threshold {
                FOREGROUND
            } else {
                BACKGROUND
            };
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, data: Vec<u8>) -> ImageBuffer {
        ImageBuffer::from_raw(width, height, Channels::One, 255, data).unwrap()
    }

    #[test]
    fn test_fixed_threshold() {
        let src = gray(4, 1, vec![0, 99, 100, 255]);
        let mut dst = src.new_like();
        threshold_to_binary(&src, &mut dst, 100).unwrap();
        assert_eq!(dst.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_global_mean() {
        let src = gray(4, 1, vec![10, 20, 30, 41]);
        let mut dst = src.new_like();
        let t = threshold_global_mean(&src, &mut dst).unwrap();
        assert_eq!(t, 25);
        assert_eq!(dst.data(), &[0, 0, 255, 255]);
    }

    #[test]
    fn test_midpoint() {
        // A bright dot on a dim background
        let mut data = vec![50u8; 25];
        data[12] = 200;
        let src = gray(5, 5, data);
        let mut dst = src.new_like();
        threshold_midpoint(&src, &mut dst, 3).unwrap();
        assert_eq!(dst.sample(2, 2), Some(255));
        // Neighbors of the dot are at 50 < 125
        assert_eq!(dst.sample(1, 1), Some(0));
        // A flat window never exceeds its own midpoint
        assert_eq!(dst.sample(4, 4), Some(0));
    }

    #[test]
    fn test_midpoint_rejects_even_kernel() {
        let src = gray(3, 3, vec![0; 9]);
        let mut dst = src.new_like();
        assert!(threshold_midpoint(&src, &mut dst, 4).is_err());
        assert!(threshold_midpoint(&src, &mut dst, 1).is_err());
    }

    #[test]
    fn test_rejects_color_input() {
        let src = ImageBuffer::new(3, 3, Channels::Three, 255).unwrap();
        let mut dst = src.new_with_channels(Channels::One);
        assert!(threshold_to_binary(&src, &mut dst, 10).is_err());
    }
}
