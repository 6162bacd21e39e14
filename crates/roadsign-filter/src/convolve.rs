//! Low-pass convolution
//!
//! Mean filtering over a square window, and a fixed 5x5 Gaussian.

use crate::{FilterResult, check_gray_pair, check_kernel_size};
use roadsign_core::ImageBuffer;

/// Apply a `kernel` x `kernel` mean filter.
///
/// Each output sample is the rounded average of the in-bounds samples of
/// the window, so border pixels average over fewer samples.
///
/// # Errors
///
/// Fails on an even or too small kernel, or on geometry mismatch.
pub fn mean_filter(src: &ImageBuffer, dst: &mut ImageBuffer, kernel: u32) -> FilterResult<()> {
    check_gray_pair(src, dst)?;
    check_kernel_size(kernel)?;

    let w = src.width() as i32;
    let h = src.height() as i32;
    let half = (kernel / 2) as i32;
    let data = src.data();
    let out = dst.data_mut();

    for y in 0..h {
        let (y0, y1) = ((y - half).max(0), (y + half).min(h - 1));
        for x in 0..w {
            let (x0, x1) = ((x - half).max(0), (x + half).min(w - 1));
            let mut sum = 0u32;
            for ky in y0..=y1 {
                let row = (ky * w) as usize;
                sum += data[row + x0 as usize..=row + x1 as usize]
                    .iter()
                    .map(|&v| v as u32)
                    .sum::<u32>();
            }
            let count = ((y1 - y0 + 1) * (x1 - x0 + 1)) as f32;
            out[(y * w + x) as usize] = (sum as f32 / count).round() as u8;
        }
    }
    Ok(())
}

/// Integer 5x5 Gaussian weights, summing to 273
const GAUSSIAN_5X5: [[u32; 5]; 5] = [
    [1, 4, 7, 4, 1],
    [4, 16, 26, 16, 4],
    [7, 26, 41, 26, 7],
    [4, 16, 26, 16, 4],
    [1, 4, 7, 4, 1],
];

/// Apply a 5x5 Gaussian low-pass filter.
///
/// Interior pixels are the rounded weighted sum divided by 273. Near the
/// border only in-bounds weights are used and the sum is divided by their
/// total instead, so a uniform image stays uniform.
pub fn gaussian_filter(src: &ImageBuffer, dst: &mut ImageBuffer) -> FilterResult<()> {
    check_gray_pair(src, dst)?;

    let w = src.width() as i32;
    let h = src.height() as i32;
    let data = src.data();
    let out = dst.data_mut();

    for y in 0..h {
        for x in 0..w {
            let mut sum = 0u32;
            let mut weight = 0u32;
            for (ky, row) in GAUSSIAN_5X5.iter().enumerate() {
                let sy = y + ky as i32 - 2;
                if sy < 0 || sy >= h {
                    continue;
                }
                for (kx, &k) in row.iter().enumerate() {
                    let sx = x + kx as i32 - 2;
                    if sx < 0 || sx >= w {
                        continue;
                    }
                    sum += data[(sy * w + sx) as usize] as u32 * k;
                    weight += k;
                }
            }
            out[(y * w + x) as usize] = (sum as f32 / weight as f32).round() as u8;
        }
    }
    Ok(())
}
