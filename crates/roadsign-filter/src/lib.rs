//! roadsign-filter - Neighborhood filters for gray and mask images
//!
//! - **Rank** ([`rank`]): median filter, used to clean segmentation masks
//! - **Convolution** ([`convolve`]): box mean filter, 5x5 Gaussian
//! - **Edges** ([`edge`]): Sobel and Prewitt gradient thresholding, Laplacian
//! - **Enhancement** ([`enhance`]): high-pass, high-boost sharpening,
//!   histogram equalization
//!
//! Every filter reads a one-channel source and writes a one-channel
//! destination of the same size. Windows are square with an odd side
//! greater than 1 and use only in-bounds samples near the border, except
//! the fixed 3x3 operators, which leave the outermost ring to a constant
//! or to the source.

pub mod convolve;
pub mod edge;
pub mod enhance;
pub mod error;
pub mod rank;

pub use convolve::{gaussian_filter, mean_filter};
pub use edge::{EdgeOperator, laplacian_edge, prewitt_edge, sobel_edge};
pub use enhance::{TrcLut, equalize_histogram, equalize_lut, highpass_enhance, highpass_filter};
pub use error::{FilterError, FilterResult};
pub use rank::median_filter;

use roadsign_core::{Channels, ImageBuffer};

/// Validate a window side: odd and > 1.
pub(crate) fn check_kernel_size(kernel: u32) -> FilterResult<()> {
    if kernel <= 1 || kernel % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "size must be odd and > 1, got {kernel}"
        )));
    }
    Ok(())
}

/// Validate a one-channel source/destination pair of equal size.
pub(crate) fn check_gray_pair(src: &ImageBuffer, dst: &ImageBuffer) -> FilterResult<()> {
    src.check_geometry(Channels::One, dst, Channels::One)?;
    Ok(())
}
