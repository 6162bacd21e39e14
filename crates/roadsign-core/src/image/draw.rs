//! Drawing primitives
//!
//! Rectangle outlines and cross-hairs burned into an image, used to mark
//! detected blobs on a copy of the frame. Everything is clipped to the
//! image bounds; shapes partly or fully outside the image are legal.

use super::ImageBuffer;
use crate::error::{Error, Result};
use crate::rect::Rect;

impl ImageBuffer {
    fn check_color(&self, color: &[u8]) -> Result<()> {
        let n = self.channels.count() as usize;
        if color.len() != n {
            return Err(Error::ChannelMismatch {
                expected: n as u32,
                actual: color.len() as u32,
            });
        }
        Ok(())
    }

    #[inline]
    fn put_clipped(&mut self, x: i32, y: i32, color: &[u8]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let n = color.len();
        let start = y as usize * self.stride() + x as usize * n;
        self.data[start..start + n].copy_from_slice(color);
    }

    fn hline(&mut self, x0: i32, x1: i32, y: i32, color: &[u8]) {
        let lo = x0.max(0);
        let hi = x1.min(self.width as i32 - 1);
        for x in lo..=hi {
            self.put_clipped(x, y, color);
        }
    }

    fn vline(&mut self, x: i32, y0: i32, y1: i32, color: &[u8]) {
        let lo = y0.max(0);
        let hi = y1.min(self.height as i32 - 1);
        for y in lo..=hi {
            self.put_clipped(x, y, color);
        }
    }

    /// Draw the outline of `rect` with lines `thickness` pixels wide,
    /// growing inward from the box edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if `color` has the wrong length.
    pub fn draw_rect_outline(&mut self, rect: &Rect, thickness: u32, color: &[u8]) -> Result<()> {
        self.check_color(color)?;
        if rect.is_empty() {
            return Ok(());
        }
        let right = rect.right() - 1;
        let bottom = rect.bottom() - 1;
        for t in 0..thickness as i32 {
            if 2 * t >= rect.w || 2 * t >= rect.h {
                break;
            }
            self.hline(rect.x + t, right - t, rect.y + t, color);
            self.hline(rect.x + t, right - t, bottom - t, color);
            self.vline(rect.x + t, rect.y + t, bottom - t, color);
            self.vline(right - t, rect.y + t, bottom - t, color);
        }
        Ok(())
    }

    /// Draw a cross-hair centered at (cx, cy) with arms `half_len` pixels long.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if `color` has the wrong length.
    pub fn draw_cross(&mut self, cx: i32, cy: i32, half_len: u32, color: &[u8]) -> Result<()> {
        self.check_color(color)?;
        let r = half_len as i32;
        self.hline(cx - r, cx + r, cy, color);
        self.vline(cx, cy - r, cy + r, color);
        Ok(())
    }
}
