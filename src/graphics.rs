use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::PixelColor,
    pixelcolor::raw::RawU8,
};

use crate::FrameBuffer;

/// Palette index as an embedded-graphics color.
///
/// The transparent sentinel (255) keeps its skip semantics when drawn
/// through a [`DrawTarget`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Index(pub u8);

impl PixelColor for Index {
    type Raw = RawU8;
}

impl DrawTarget for FrameBuffer {
    type Color = Index;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.0);
        }

        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_core::geometry::Point;

    use super::*;

    #[test]
    fn draw_iter_writes_through_set_pixel() {
        let mut fb = FrameBuffer::new(8, 8).unwrap();

        fb.draw_iter([
            Pixel(Point::new(1, 1), Index(3)),
            Pixel(Point::new(2, 2), Index(crate::TRANSPARENT)),
            Pixel(Point::new(-1, 0), Index(3)),
        ])
        .unwrap();

        assert_eq!(fb.pixel(1, 1), Some(3));
        assert_eq!(fb.pixel(2, 2), Some(0));
        assert_eq!(fb.size(), Size::new(8, 8));
    }
}
