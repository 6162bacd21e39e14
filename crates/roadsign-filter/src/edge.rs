//! Edge detection
//!
//! 3x3 gradient operators thresholded into a binary edge map. A pixel is an
//! edge (255) when the gradient magnitude `sqrt(gx^2 + gy^2)` is strictly
//! greater than the threshold. The outermost rows and columns have no full
//! neighborhood and are always 0.
//!
//! [`laplacian_edge`] instead keeps the clamped second-derivative response
//! as a gray map.

use crate::{FilterResult, check_gray_pair};
use roadsign_core::{BACKGROUND, FOREGROUND, ImageBuffer};

/// 3x3 gradient operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOperator {
    /// Center row/column weighted 1
    Prewitt,
    /// Center row/column weighted 2
    Sobel,
}

impl EdgeOperator {
    #[inline]
    fn center_weight(self) -> f32 {
        match self {
            EdgeOperator::Prewitt => 1.0,
            EdgeOperator::Sobel => 2.0,
        }
    }
}

/// Threshold the gradient magnitude of a one-channel image.
///
/// # Arguments
/// * `src` - One-channel input image
/// * `dst` - One-channel output image of the same size
/// * `op` - Gradient operator
/// * `threshold` - Magnitudes above this become edges
pub fn gradient_edge(
    src: &ImageBuffer,
    dst: &mut ImageBuffer,
    op: EdgeOperator,
    threshold: f32,
) -> FilterResult<()> {
    check_gray_pair(src, dst)?;

    let w = src.width() as usize;
    let h = src.height() as usize;
    let c = op.center_weight();
    let data = src.data();
    let out = dst.data_mut();
    out.fill(BACKGROUND);

    let at = |x: usize, y: usize| data[y * w + x] as f32;
    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let (a, b, cc) = (at(x - 1, y - 1), at(x, y - 1), at(x + 1, y - 1));
            let (d, f) = (at(x - 1, y), at(x + 1, y));
            let (g, hh, i) = (at(x - 1, y + 1), at(x, y + 1), at(x + 1, y + 1));

            let gx = (cc + c * f + i) - (a + c * d + g);
            let gy = (g + c * hh + i) - (a + c * b + cc);
            if (gx * gx + gy * gy).sqrt() > threshold {
                out[y * w + x] = FOREGROUND;
            }
        }
    }
    Ok(())
}

/// Sobel edge map.
pub fn sobel_edge(src: &ImageBuffer, dst: &mut ImageBuffer, threshold: f32) -> FilterResult<()> {
    gradient_edge(src, dst, EdgeOperator::Sobel, threshold)
}

/// Prewitt edge map.
pub fn prewitt_edge(src: &ImageBuffer, dst: &mut ImageBuffer, threshold: f32) -> FilterResult<()> {
    gradient_edge(src, dst, EdgeOperator::Prewitt, threshold)
}

/// 8-neighbor Laplacian at an interior pixel: `8 * center - neighbors`.
#[inline]
pub(crate) fn laplacian_at(data: &[u8], w: usize, x: usize, y: usize) -> i32 {
    let mut sum = 0i32;
    for yy in y - 1..=y + 1 {
        let row = &data[yy * w..(yy + 1) * w];
        sum += row[x - 1..=x + 1].iter().map(|&v| v as i32).sum::<i32>();
    }
    9 * data[y * w + x] as i32 - sum
}

/// Laplacian edge response, clamped to `[0, 255]`.
///
/// Bright pixels on a darker background respond; the dark side of a step
/// clamps to 0. Border rows and columns are 0.
pub fn laplacian_edge(src: &ImageBuffer, dst: &mut ImageBuffer) -> FilterResult<()> {
    check_gray_pair(src, dst)?;

    let w = src.width() as usize;
    let h = src.height() as usize;
    let data = src.data();
    let out = dst.data_mut();
    out.fill(BACKGROUND);

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            out[y * w + x] = laplacian_at(data, w, x, y).clamp(0, 255) as u8;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadsign_core::Channels;

    /// Left half dark, right half bright
    fn step(width: u32, height: u32) -> ImageBuffer {
        let mut img = ImageBuffer::new(width, height, Channels::One, 255).unwrap();
        for y in 0..height {
            for x in width / 2..width {
                img.set_pixel(x, y, &[200]).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_sobel_vertical_step() {
        let src = step(8, 5);
        let mut dst = src.new_like();
        sobel_edge(&src, &mut dst, 100.0).unwrap();
        // gx = 4 * 200 at the columns next to the step
        assert_eq!(dst.sample(3, 2), Some(255));
        assert_eq!(dst.sample(4, 2), Some(255));
        assert_eq!(dst.sample(1, 2), Some(0));
        assert_eq!(dst.sample(6, 2), Some(0));
        // Border rows stay background
        assert_eq!(dst.sample(3, 0), Some(0));
        assert_eq!(dst.sample(4, 4), Some(0));
    }

    #[test]
    fn test_prewitt_threshold() {
        let src = step(8, 5);
        let mut dst = src.new_like();
        // Prewitt gx = 3 * 200 = 600
        prewitt_edge(&src, &mut dst, 599.0).unwrap();
        assert_eq!(dst.sample(3, 2), Some(255));
        prewitt_edge(&src, &mut dst, 600.0).unwrap();
        assert_eq!(dst.count_nonzero(), 0);
    }

    #[test]
    fn test_tiny_image() {
        let src = ImageBuffer::new(2, 2, Channels::One, 255).unwrap();
        let mut dst = src.new_like();
        sobel_edge(&src, &mut dst, 0.0).unwrap();
        assert_eq!(dst.count_nonzero(), 0);
    }

    #[test]
    fn test_laplacian_step() {
        let src = step(8, 5);
        let mut dst = src.new_like();
        laplacian_edge(&src, &mut dst).unwrap();
        // Bright side: 8 * 200 - 5 * 200
        assert_eq!(dst.sample(4, 2), Some(255));
        // Dark side is negative and clamps
        assert_eq!(dst.sample(3, 2), Some(0));
        // Flat areas and borders
        assert_eq!(dst.sample(1, 2), Some(0));
        assert_eq!(dst.sample(6, 2), Some(0));
        assert_eq!(dst.sample(4, 0), Some(0));
    }

    #[test]
    fn test_laplacian_spot() {
        let mut src = ImageBuffer::new(3, 3, Channels::One, 255).unwrap();
        src.fill(&[10]).unwrap();
        src.set_pixel(1, 1, &[20]).unwrap();
        let mut dst = src.new_like();
        dst.fill(&[9]).unwrap();
        laplacian_edge(&src, &mut dst).unwrap();
        assert_eq!(dst.data(), &[0, 0, 0, 0, 80, 0, 0, 0, 0]);
    }
}
