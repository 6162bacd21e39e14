//! Image enhancement
//!
//! High-pass filtering, high-boost sharpening, and histogram equalization
//! of one-channel images.

use crate::edge::laplacian_at;
use crate::{FilterError, FilterResult, check_gray_pair};
use roadsign_core::ImageBuffer;

/// A 256-entry lookup table mapping input levels to output levels.
pub type TrcLut = [u8; 256];

/// Weighted 3x3 high-pass kernel used by [`highpass_enhance`]. Sums to 0.
const SHARPEN_3X3: [[i32; 3]; 3] = [[-1, -2, -1], [-2, 12, -2], [-1, -2, -1]];
const SHARPEN_DIVISOR: f32 = 16.0;

/// Magnitude of the 8-neighbor Laplacian, averaged over the 3x3 window.
///
/// Output is `round(|8 * center - neighbors| / 9)`. Border rows and columns
/// are 0.
pub fn highpass_filter(src: &ImageBuffer, dst: &mut ImageBuffer) -> FilterResult<()> {
    check_gray_pair(src, dst)?;

    let w = src.width() as usize;
    let h = src.height() as usize;
    let data = src.data();
    let out = dst.data_mut();
    out.fill(0);

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let mag = laplacian_at(data, w, x, y).unsigned_abs();
            out[y * w + x] = ((mag + 4) / 9).min(255) as u8;
        }
    }
    Ok(())
}

/// High-boost sharpening: add a weighted high-pass response back to the
/// source.
///
/// Each interior pixel becomes `v + gain * hp / 16`, rounded and clamped to
/// `[0, 255]`, where `hp` is the response of `[-1 -2 -1; -2 12 -2; -1 -2 -1]`.
/// Border pixels are copied from `src`.
///
/// # Arguments
/// * `src` - One-channel input image
/// * `dst` - One-channel output image of the same size
/// * `gain` - Weight of the high-pass term; finite and >= 0
pub fn highpass_enhance(src: &ImageBuffer, dst: &mut ImageBuffer, gain: f32) -> FilterResult<()> {
    if !gain.is_finite() || gain < 0.0 {
        return Err(FilterError::InvalidParameters(format!(
            "gain must be finite and >= 0, got {gain}"
        )));
    }
    check_gray_pair(src, dst)?;

    let w = src.width() as usize;
    let h = src.height() as usize;
    let data = src.data();
    let out = dst.data_mut();
    out.copy_from_slice(data);

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let mut hp = 0i32;
            for (ky, weights) in SHARPEN_3X3.iter().enumerate() {
                let row = (y + ky - 1) * w;
                for (kx, &k) in weights.iter().enumerate() {
                    hp += k * data[row + x + kx - 1] as i32;
                }
            }
            let v = data[y * w + x] as f32 + hp as f32 / SHARPEN_DIVISOR * gain;
            out[y * w + x] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(())
}

/// Build the equalization lookup table of a one-channel image.
///
/// With `cdf` the cumulative histogram and `cdf_min` its first nonzero
/// value, level `v` maps to `(cdf[v] - cdf_min) * 255 / (n - cdf_min)`. An
/// image holding a single level maps to the identity.
pub fn equalize_lut(src: &ImageBuffer) -> FilterResult<TrcLut> {
    let hist = src.gray_histogram()?;
    let n: u64 = hist.iter().map(|&c| c as u64).sum();

    let mut cdf = [0u64; 256];
    let mut acc = 0u64;
    for (slot, &count) in cdf.iter_mut().zip(hist.iter()) {
        acc += count as u64;
        *slot = acc;
    }
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);

    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = if n == cdf_min {
            i as u8
        } else {
            (cdf[i].saturating_sub(cdf_min) * 255 / (n - cdf_min)) as u8
        };
    }
    Ok(lut)
}

/// Histogram equalization of a one-channel image.
pub fn equalize_histogram(src: &ImageBuffer, dst: &mut ImageBuffer) -> FilterResult<()> {
    check_gray_pair(src, dst)?;
    let lut = equalize_lut(src)?;
    for (o, &v) in dst.data_mut().iter_mut().zip(src.data()) {
        *o = lut[v as usize];
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadsign_core::Channels;

    /// 3x3 of `around` with `center` in the middle
    fn spot(around: u8, center: u8) -> ImageBuffer {
        let mut img = ImageBuffer::new(3, 3, Channels::One, 255).unwrap();
        img.fill(&[around]).unwrap();
        img.set_pixel(1, 1, &[center]).unwrap();
        img
    }

    #[test]
    fn test_highpass_filter() {
        let src = spot(10, 20);
        let mut dst = src.new_like();
        dst.fill(&[9]).unwrap();
        highpass_filter(&src, &mut dst).unwrap();
        // round(80 / 9)
        assert_eq!(dst.data(), &[0, 0, 0, 0, 9, 0, 0, 0, 0]);

        // Dark center responds with the magnitude
        highpass_filter(&spot(9, 0), &mut dst).unwrap();
        assert_eq!(dst.sample(1, 1), Some(8));
    }

    #[test]
    fn test_highpass_enhance() {
        let src = spot(10, 20);
        let mut dst = src.new_like();
        // 20 + (240 - 120) / 16
        highpass_enhance(&src, &mut dst, 1.0).unwrap();
        assert_eq!(dst.sample(1, 1), Some(28));
        assert_eq!(dst.sample(0, 0), Some(10));
        assert_eq!(dst.sample(2, 1), Some(10));

        highpass_enhance(&src, &mut dst, 2.0).unwrap();
        assert_eq!(dst.sample(1, 1), Some(35));

        highpass_enhance(&src, &mut dst, 0.0).unwrap();
        assert_eq!(dst, src);

        highpass_enhance(&spot(0, 250), &mut dst, 1.0).unwrap();
        assert_eq!(dst.sample(1, 1), Some(255));
    }

    #[test]
    fn test_highpass_enhance_bad_gain() {
        let src = spot(10, 20);
        let mut dst = src.new_like();
        dst.fill(&[3]).unwrap();
        assert!(highpass_enhance(&src, &mut dst, -1.0).is_err());
        assert!(highpass_enhance(&src, &mut dst, f32::NAN).is_err());
        assert!(dst.data().iter().all(|&v| v == 3));
    }

    #[test]
    fn test_equalize_histogram() {
        let src = ImageBuffer::from_raw(4, 1, Channels::One, 255, vec![10, 10, 20, 30]).unwrap();
        let mut dst = src.new_like();
        equalize_histogram(&src, &mut dst).unwrap();
        // cdf = 2, 3, 4; cdf_min = 2
        assert_eq!(dst.data(), &[0, 0, 127, 255]);
    }

    #[test]
    fn test_equalize_uniform_image() {
        let mut src = ImageBuffer::new(5, 3, Channels::One, 255).unwrap();
        src.fill(&[77]).unwrap();
        let mut dst = src.new_like();
        equalize_histogram(&src, &mut dst).unwrap();
        assert_eq!(dst, src);

        let lut = equalize_lut(&src).unwrap();
        assert!(lut.iter().enumerate().all(|(i, &v)| v as usize == i));
    }

    #[test]
    fn test_enhance_rejects_color() {
        let src = ImageBuffer::new(3, 3, Channels::Three, 255).unwrap();
        let mut dst = src.new_like();
        assert!(highpass_filter(&src, &mut dst).is_err());
        assert!(equalize_histogram(&src, &mut dst).is_err());
        assert!(equalize_lut(&src).is_err());
    }
}
