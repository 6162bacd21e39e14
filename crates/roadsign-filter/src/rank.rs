//! Rank filtering operations
//!
//! Median filtering of one-channel images.
//!
//! # Border behavior
//!
//! Near the border the window holds fewer than `k * k` in-bounds samples.
//! The filter still reads the middle slot of the full `k * k` scratch
//! window; slots past the samples gathered for the current pixel keep
//! whatever the previous pixel's sorted window left there (the source's
//! first sample before any window has been gathered). Output near the
//! border therefore depends on scan order.
//!
//! Every pixel is written, including row 0 and column 0. The scan starts
//! at (0, 0), so the stale slots seen by the first rows differ from a scan
//! that skips the top row and left column and leaves them untouched.
//!
//! NOTE: suspect behavior, kept bit-exact so recognizer output stays
//! stable. A clamped or mirrored border would change classification.

use crate::{FilterResult, check_gray_pair, check_kernel_size};
use roadsign_core::ImageBuffer;

/// Apply a `kernel` x `kernel` median filter.
///
/// # Arguments
/// * `src` - One-channel input image
/// * `dst` - One-channel output image of the same size
/// * `kernel` - Window side, odd and > 1
///
/// # Errors
///
/// Fails on an even or too small kernel, or on geometry mismatch. `dst` is
/// untouched on error.
pub fn median_filter(src: &ImageBuffer, dst: &mut ImageBuffer, kernel: u32) -> FilterResult<()> {
    check_gray_pair(src, dst)?;
    check_kernel_size(kernel)?;

    let w = src.width() as i32;
    let h = src.height() as i32;
    let half = (kernel / 2) as i32;
    let data = src.data();
    let out = dst.data_mut();

    let window_len = (kernel * kernel) as usize;
    let center = window_len / 2;
    let mut window = vec![data[0]; window_len];

    for y in 0..h {
        for x in 0..w {
            let mut count = 0;
            for ky in (y - half).max(0)..=(y + half).min(h - 1) {
                let row = (ky * w) as usize;
                for kx in (x - half).max(0)..=(x + half).min(w - 1) {
                    window[count] = data[row + kx as usize];
                    count += 1;
                }
            }
            window[..count].sort_unstable();
            out[(y * w + x) as usize] = window[center];
        }
    }
    Ok(())
}
