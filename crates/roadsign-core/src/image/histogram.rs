//! Gray histograms
//!
//! Level counts of one-channel images and a bar-chart rendering of them.

use super::{Channels, ImageBuffer};
use crate::error::Result;

impl ImageBuffer {
    /// Count the occurrences of each sample level.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ChannelMismatch`] unless the image has one
    /// channel.
    pub fn gray_histogram(&self) -> Result<[u32; 256]> {
        self.check_channels(Channels::One)?;
        let mut hist = [0u32; 256];
        for &v in &self.data {
            hist[v as usize] += 1;
        }
        Ok(hist)
    }

    /// Render the histogram of `self` as white bars into `dst`.
    ///
    /// `dst` is cleared to 0. Level `i` owns columns
    /// `i * width / 256 .. (i + 1) * width / 256` (at least one column), and
    /// its bar rises from the bottom row to a height proportional to its
    /// count, with the most frequent level spanning the full height. `dst`
    /// may have any size.
    ///
    /// # Errors
    ///
    /// Fails unless both images have one channel.
    pub fn draw_histogram(&self, dst: &mut ImageBuffer) -> Result<()> {
        let hist = self.gray_histogram()?;
        dst.check_channels(Channels::One)?;

        let w = dst.width as usize;
        let h = dst.height as usize;
        let peak = hist.iter().copied().max().unwrap_or(0).max(1) as u64;
        dst.data.fill(0);

        for (level, &count) in hist.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let x0 = (level * w / 256).min(w - 1);
            let x1 = ((level + 1) * w / 256).clamp(x0 + 1, w);
            let bar = ((count as u64 * h as u64 + peak / 2) / peak).max(1) as usize;
            for y in h - bar.min(h)..h {
                dst.data[y * w + x0..y * w + x1].fill(255);
            }
        }
        Ok(())
    }
}
