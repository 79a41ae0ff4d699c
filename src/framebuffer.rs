//! RAM frame buffer for monochrome panels.
//!
//! All widget drawing targets this buffer instead of the panel. The display
//! scheduler later copies damaged 8x8 blocks to the panel, so the bus only
//! carries what actually changed.
//!
//! Pixels are stored in panel (physical) orientation. Drawing happens in
//! logical coordinates and is rotated on the way in, which keeps block
//! transfers simple row copies.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::image::Image;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Primitive, Size as EgSize};
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use log::debug;

use crate::display_manager::Backend;
use crate::error::UiError;
use crate::ui::core::{BLOCK_SIZE, Canvas, RawImage, Rotation};
use crate::ui::geometry::{Area, Point, Size};

/// The physical display behind a [`FrameBuffer`].
///
/// Any embedded-graphics target with binary colors qualifies. Pixel
/// coordinates are in panel orientation; the frame buffer only ever sends
/// whole block rectangles via `fill_contiguous`.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    /// Switch the panel into (`true`) or out of (`false`) power save mode.
    fn set_power_save(&mut self, _enabled: bool) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Monochrome frame buffer implementing both the widget [`Canvas`] and
/// embedded-graphics' `DrawTarget`.
///
/// Every drawing operation, including plain embedded-graphics drawables, is
/// restricted to the clip area last set with [`Canvas::set_clip`].
pub struct FrameBuffer<P: Panel> {
    panel: P,
    pixels: Vec<BinaryColor>,
    physical: Size,
    rotation: Rotation,
    clip: Area,
}

impl<P: Panel> FrameBuffer<P> {
    /// Allocate a cleared buffer for a panel of `width` x `height` pixels
    /// (panel orientation), drawn with the given rotation.
    ///
    /// Both dimensions must be non-zero multiples of the block edge length.
    pub fn new(panel: P, width: u16, height: u16, rotation: Rotation) -> Result<Self, UiError> {
        if width == 0 || height == 0 || width % BLOCK_SIZE != 0 || height % BLOCK_SIZE != 0 {
            return Err(UiError::UnalignedFrameBuffer { width, height });
        }
        let physical = Size::new(width, height);
        let logical = Self::logical_size(physical, rotation);
        Ok(Self {
            panel,
            pixels: vec![BinaryColor::Off; width as usize * height as usize],
            physical,
            rotation,
            clip: Area::new(0, 0, logical.width, logical.height),
        })
    }

    fn logical_size(physical: Size, rotation: Rotation) -> Size {
        if rotation.is_transposed() {
            Size::new(physical.height, physical.width)
        } else {
            physical
        }
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Color of the pixel at logical `(x, y)`, `None` outside the buffer.
    pub fn pixel(&self, x: u16, y: u16) -> Option<BinaryColor> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Buffer index of logical `(x, y)`.
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        let logical = self.display_size();
        if x >= logical.width || y >= logical.height {
            return None;
        }
        let (px, py) = match self.rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (logical.height - 1 - y, x),
            Rotation::Deg180 => (logical.width - 1 - x, logical.height - 1 - y),
            Rotation::Deg270 => (y, logical.width - 1 - x),
        };
        Some(py as usize * self.physical.width as usize + px as usize)
    }

    /// Write a single pixel if it lies within the clip area.
    #[inline]
    fn set_pixel(&mut self, x: u16, y: u16, color: BinaryColor) {
        let clip = self.clip;
        if x < clip.left || x >= clip.right || y < clip.top || y >= clip.bottom {
            return;
        }
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }
}

impl<P: Panel> OriginDimensions for FrameBuffer<P> {
    fn size(&self) -> EgSize {
        self.display_size().to_size()
    }
}

impl<P: Panel> DrawTarget for FrameBuffer<P> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
    where
        I: IntoIterator<Item = Pixel<BinaryColor>>,
    {
        for Pixel(coord, color) in pixels {
            if (0..=u16::MAX as i32).contains(&coord.x) && (0..=u16::MAX as i32).contains(&coord.y)
            {
                self.set_pixel(coord.x as u16, coord.y as u16, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: BinaryColor) -> Result<(), Infallible> {
        let left = area.top_left.x.clamp(0, u16::MAX as i32) as u16;
        let top = area.top_left.y.clamp(0, u16::MAX as i32) as u16;
        let right = (area.top_left.x as i64 + area.size.width as i64).clamp(0, u16::MAX as i64);
        let bottom = (area.top_left.y as i64 + area.size.height as i64).clamp(0, u16::MAX as i64);
        self.fill(Area::new(left, top, right as u16, bottom as u16), color);
        Ok(())
    }
}

impl<P: Panel> Canvas for FrameBuffer<P> {
    fn display_size(&self) -> Size {
        Self::logical_size(self.physical, self.rotation)
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn set_clip(&mut self, area: Area) {
        self.clip = area.clamp_to(self.display_size());
    }

    fn fill(&mut self, area: Area, color: BinaryColor) {
        let area = area.intersect(self.clip);
        for y in area.top..area.bottom {
            for x in area.left..area.right {
                self.set_pixel(x, y, color);
            }
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: BinaryColor) {
        let Ok(()) = Line::new(from.to_point(), to.to_point())
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(self);
    }

    fn draw_bitmap(&mut self, top_left: Point, image: &RawImage) {
        let Ok(()) = Image::new(image, top_left.to_point()).draw(self);
    }

    fn draw_text(&mut self, top_left: Point, text: &str, font: &'static MonoFont<'static>) {
        let style = MonoTextStyle::new(font, BinaryColor::On);
        let Ok(_) = Text::with_baseline(text, top_left.to_point(), style, Baseline::Top).draw(self);
    }
}

impl<P: Panel> Backend for FrameBuffer<P> {
    type Error = P::Error;

    /// Copy the given block rectangle (panel orientation, in blocks) to the
    /// panel.
    fn update_blocks(&mut self, blocks: Area) -> Result<(), P::Error> {
        let pixels = Area::new(
            blocks.left.saturating_mul(BLOCK_SIZE),
            blocks.top.saturating_mul(BLOCK_SIZE),
            blocks.right.saturating_mul(BLOCK_SIZE),
            blocks.bottom.saturating_mul(BLOCK_SIZE),
        )
        .clamp_to(self.physical);
        if pixels.is_empty() {
            return Ok(());
        }

        debug!(
            "Flushing {}x{} blocks at ({}, {})",
            blocks.width(),
            blocks.height(),
            blocks.left,
            blocks.top
        );

        // Borrow the pixel slice so the closure captures a shared reference
        // while the panel is borrowed mutably.
        let buffer = &self.pixels;
        let stride = self.physical.width as usize;
        let (left, right) = (pixels.left as usize, pixels.right as usize);
        let rows = (pixels.top as usize..pixels.bottom as usize).flat_map(move |y| {
            buffer[y * stride + left..y * stride + right].iter().copied()
        });

        self.panel.fill_contiguous(&Rectangle::from(pixels), rows)
    }

    fn set_power_save(&mut self, enabled: bool) -> Result<(), P::Error> {
        self.panel.set_power_save(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::RecordingPanel;
    use embedded_graphics::prelude::Point as EgPoint;

    fn buffer(rotation: Rotation) -> FrameBuffer<RecordingPanel> {
        FrameBuffer::new(RecordingPanel::new(32, 16), 32, 16, rotation).unwrap()
    }

    #[test]
    fn test_rejects_partial_blocks() {
        assert_eq!(
            FrameBuffer::new(RecordingPanel::new(30, 16), 30, 16, Rotation::Deg0).err(),
            Some(UiError::UnalignedFrameBuffer {
                width: 30,
                height: 16
            })
        );
        assert!(FrameBuffer::new(RecordingPanel::new(0, 0), 0, 8, Rotation::Deg0).is_err());
    }

    #[test]
    fn test_rotation_swaps_logical_size() {
        assert_eq!(buffer(Rotation::Deg0).display_size(), Size::new(32, 16));
        assert_eq!(buffer(Rotation::Deg90).display_size(), Size::new(16, 32));
        assert_eq!(buffer(Rotation::Deg270).display_size(), Size::new(16, 32));
    }

    #[test]
    fn test_fill_respects_clip() {
        let mut fb = buffer(Rotation::Deg0);
        fb.set_clip(Area::new(4, 4, 8, 8));
        fb.fill(Area::new(0, 0, 32, 16), BinaryColor::On);
        assert_eq!(fb.pixel(4, 4), Some(BinaryColor::On));
        assert_eq!(fb.pixel(7, 7), Some(BinaryColor::On));
        assert_eq!(fb.pixel(8, 7), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(3, 4), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(40, 4), None);
    }

    #[test]
    fn test_rotated_pixels_land_in_panel_orientation() {
        let mut fb = buffer(Rotation::Deg90);
        fb.fill(Area::new(0, 0, 1, 1), BinaryColor::On);
        // logical top left is the physical top right
        assert_eq!(fb.pixels[31], BinaryColor::On);

        let mut fb = buffer(Rotation::Deg180);
        fb.fill(Area::new(0, 0, 1, 1), BinaryColor::On);
        assert_eq!(fb.pixels[32 * 16 - 1], BinaryColor::On);

        let mut fb = buffer(Rotation::Deg270);
        fb.fill(Area::new(0, 0, 1, 1), BinaryColor::On);
        assert_eq!(fb.pixels[32 * 15], BinaryColor::On);
    }

    #[test]
    fn test_update_blocks_sends_block_pixels() {
        let mut fb = buffer(Rotation::Deg0);
        fb.fill(Area::new(8, 0, 16, 8), BinaryColor::On);
        fb.update_blocks(Area::new(1, 0, 3, 1)).unwrap();
        let panel = fb.panel();
        assert_eq!(
            panel.flushed,
            alloc::vec![Rectangle::new(EgPoint::new(8, 0), EgSize::new(16, 8))]
        );
        assert_eq!(panel.pixels_on, 64);
    }

    #[test]
    fn test_update_blocks_clamps_to_panel() {
        let mut fb = buffer(Rotation::Deg0);
        fb.update_blocks(Area::new(3, 1, 9, 9)).unwrap();
        assert_eq!(
            fb.panel().flushed,
            alloc::vec![Rectangle::new(EgPoint::new(24, 8), EgSize::new(8, 8))]
        );
        fb.update_blocks(Area::new(5, 0, 9, 1)).unwrap();
        assert_eq!(fb.panel().flushed.len(), 1);
    }

    #[test]
    fn test_text_and_lines_draw_into_buffer() {
        let mut fb = buffer(Rotation::Deg0);
        fb.draw_line(Point::new(0, 15), Point::new(31, 15), BinaryColor::On);
        assert_eq!(fb.pixel(0, 15), Some(BinaryColor::On));
        assert_eq!(fb.pixel(31, 15), Some(BinaryColor::On));

        fb.draw_text(
            Point::new(0, 0),
            "|",
            &embedded_graphics::mono_font::ascii::FONT_6X10,
        );
        assert!((0..6).any(|x| fb.pixel(x, 4) == Some(BinaryColor::On)));
    }
}
