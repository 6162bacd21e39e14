//! Per-channel access for three-channel images

use super::{Channels, ImageBuffer};
use crate::error::Result;

/// Byte position of a color component in a BGR frame
///
/// For RGB-ordered data `Blue` and `Red` name the opposite colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BgrComponent {
    /// First byte
    Blue = 0,
    /// Second byte
    Green = 1,
    /// Third byte
    Red = 2,
}

impl ImageBuffer {
    /// Extract one component as a one-channel image.
    pub fn component(&self, comp: BgrComponent) -> Result<ImageBuffer> {
        self.check_channels(Channels::Three)?;
        let data = self.data.chunks_exact(3).map(|px| px[comp as usize]).collect();
        ImageBuffer::from_raw(self.width, self.height, Channels::One, self.levels, data)
    }

    /// Copy one component over the other two, in place.
    ///
    /// The result is a gray-looking three-channel image showing the
    /// intensity of `comp`.
    pub fn replicate_component(&mut self, comp: BgrComponent) -> Result<()> {
        self.check_channels(Channels::Three)?;
        for px in self.data.chunks_exact_mut(3) {
            let v = px[comp as usize];
            px.fill(v);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component() {
        let img = ImageBuffer::from_bgr_frame(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        let red = img.component(BgrComponent::Red).unwrap();
        assert_eq!(red.channels(), Channels::One);
        assert_eq!(red.data(), &[3, 6]);
        assert_eq!(img.component(BgrComponent::Blue).unwrap().data(), &[1, 4]);
        assert!(red.component(BgrComponent::Red).is_err());
    }

    #[test]
    fn test_replicate_component() {
        let mut img = ImageBuffer::from_bgr_frame(2, 1, &[1, 2, 3, 4, 5, 6]).unwrap();
        img.replicate_component(BgrComponent::Green).unwrap();
        assert_eq!(img.data(), &[2, 2, 2, 5, 5, 5]);

        let mut gray = ImageBuffer::new(2, 2, Channels::One, 255).unwrap();
        assert!(gray.replicate_component(BgrComponent::Blue).is_err());
    }
}
