//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, and closing for 0/255 masks with
//! a `k` x `k` square structuring element centered on the pixel. Near the
//! border only in-bounds neighbors are considered, so the image edge acts
//! neither as foreground nor as background.

use crate::{MorphError, MorphResult};
use roadsign_core::{BACKGROUND, Channels, FOREGROUND, ImageBuffer};

/// Dilate a binary image
///
/// A background pixel becomes foreground if any neighbor in the window is
/// foreground. Foreground pixels stay foreground.
///
/// # Arguments
/// * `src` - One-channel mask
/// * `dst` - One-channel output of the same size
/// * `kernel` - Window side, odd and > 1
pub fn dilate(src: &ImageBuffer, dst: &mut ImageBuffer, kernel: u32) -> MorphResult<()> {
    check_pair(src, dst, kernel)?;
    apply(src, dst, kernel, Op::Dilate);
    Ok(())
}

/// Erode a binary image
///
/// A foreground pixel becomes background if any neighbor in the window is
/// background. Background pixels stay background.
pub fn erode(src: &ImageBuffer, dst: &mut ImageBuffer, kernel: u32) -> MorphResult<()> {
    check_pair(src, dst, kernel)?;
    apply(src, dst, kernel, Op::Erode);
    Ok(())
}

/// Open a binary image
///
/// Opening = Erosion followed by Dilation.
/// Removes small foreground objects and smooths contours.
pub fn open(
    src: &ImageBuffer,
    dst: &mut ImageBuffer,
    kernel_erode: u32,
    kernel_dilate: u32,
) -> MorphResult<()> {
    check_pair(src, dst, kernel_erode)?;
    check_sel_size(kernel_dilate)?;
    let mut eroded = src.new_like();
    apply(src, &mut eroded, kernel_erode, Op::Erode);
    apply(&eroded, dst, kernel_dilate, Op::Dilate);
    Ok(())
}

/// Close a binary image
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and connects nearby objects.
pub fn close(
    src: &ImageBuffer,
    dst: &mut ImageBuffer,
    kernel_dilate: u32,
    kernel_erode: u32,
) -> MorphResult<()> {
    check_pair(src, dst, kernel_dilate)?;
    check_sel_size(kernel_erode)?;
    let mut dilated = src.new_like();
    apply(src, &mut dilated, kernel_dilate, Op::Dilate);
    apply(&dilated, dst, kernel_erode, Op::Erode);
    Ok(())
}

#[derive(Clone, Copy)]
enum Op {
    Dilate,
    Erode,
}

/// Run one pass. Geometry and kernel must already be validated.
fn apply(src: &ImageBuffer, dst: &mut ImageBuffer, kernel: u32, op: Op) {
    let w = src.width() as i32;
    let h = src.height() as i32;
    let half = (kernel / 2) as i32;
    let data = src.data();
    let out = dst.data_mut();

    for y in 0..h {
        let (y0, y1) = ((y - half).max(0), (y + half).min(h - 1));
        for x in 0..w {
            let (x0, x1) = ((x - half).max(0), (x + half).min(w - 1));
            let idx = (y * w + x) as usize;
            let fg = data[idx] != 0;

            let window = || {
                (y0..=y1).flat_map(move |ky| {
                    let row = (ky * w) as usize;
                    data[row + x0 as usize..=row + x1 as usize].iter()
                })
            };
            let result = match op {
                Op::Dilate => fg || window().any(|&v| v != 0),
                Op::Erode => fg && window().all(|&v| v != 0),
            };
            out[idx] = if result { FOREGROUND } else { BACKGROUND };
        }
    }
}

fn check_sel_size(kernel: u32) -> MorphResult<()> {
    if kernel <= 1 || kernel % 2 == 0 {
        return Err(MorphError::InvalidSel(format!(
            "size must be odd and > 1, got {kernel}"
        )));
    }
    Ok(())
}

fn check_pair(src: &ImageBuffer, dst: &ImageBuffer, kernel: u32) -> MorphResult<()> {
    src.check_geometry(Channels::One, dst, Channels::One)?;
    check_sel_size(kernel)
}
