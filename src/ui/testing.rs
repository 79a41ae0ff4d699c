//! Test helpers: a canvas and a panel that record what they are asked to do

use alloc::string::String;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::geometry::OriginDimensions;
use embedded_graphics::prelude::{DrawTarget, Pixel, Size as EgSize};
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::BinaryColor;

use super::core::{Canvas, RawImage, Rotation};
use super::geometry::{Area, Point, Size};
use crate::framebuffer::Panel;

/// A drawing call seen by [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Clip(Area),
    Fill(Area, BinaryColor),
    Line(Point, Point),
    Image(Point, Size),
    Text(Point, String),
}

/// Canvas that draws nothing and remembers what it was asked to draw.
pub struct RecordingCanvas {
    size: Size,
    rotation: Rotation,
    ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: Size::new(width, height),
            rotation: Rotation::Deg0,
            ops: Vec::new(),
        }
    }

    /// All calls recorded so far, clearing the log.
    pub fn take(&mut self) -> Vec<Op> {
        core::mem::take(&mut self.ops)
    }

    /// Areas cleared (filled with `Off`) so far.
    pub fn clears(&self) -> Vec<Area> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(area, BinaryColor::Off) => Some(*area),
                _ => None,
            })
            .collect()
    }

    /// Texts drawn so far, with their positions.
    pub fn texts(&self) -> Vec<(Point, String)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(at, text) => Some((*at, text.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn display_size(&self) -> Size {
        self.size
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn set_clip(&mut self, area: Area) {
        self.ops.push(Op::Clip(area));
    }

    fn fill(&mut self, area: Area, color: BinaryColor) {
        self.ops.push(Op::Fill(area, color));
    }

    fn draw_line(&mut self, from: Point, to: Point, _color: BinaryColor) {
        self.ops.push(Op::Line(from, to));
    }

    fn draw_bitmap(&mut self, top_left: Point, image: &RawImage) {
        let size = image.size();
        self.ops.push(Op::Image(
            top_left,
            Size::new(size.width as u16, size.height as u16),
        ));
    }

    fn draw_text(&mut self, top_left: Point, text: &str, _font: &'static MonoFont<'static>) {
        self.ops.push(Op::Text(top_left, String::from(text)));
    }
}

/// Panel that remembers every rectangle flushed to it.
pub struct RecordingPanel {
    size: EgSize,
    pub flushed: Vec<Rectangle>,
    pub pixels_on: usize,
    pub power_save: Option<bool>,
}

impl RecordingPanel {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: EgSize::new(width, height),
            flushed: Vec::new(),
            pixels_on: 0,
            power_save: None,
        }
    }

    /// Number of 8x8 blocks flushed so far.
    pub fn blocks_flushed(&self) -> u32 {
        self.flushed
            .iter()
            .map(|rect| (rect.size.width / 8) * (rect.size.height / 8))
            .sum()
    }
}

impl OriginDimensions for RecordingPanel {
    fn size(&self) -> EgSize {
        self.size
    }
}

impl DrawTarget for RecordingPanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Infallible>
    where
        I: IntoIterator<Item = Pixel<BinaryColor>>,
    {
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Infallible>
    where
        I: IntoIterator<Item = BinaryColor>,
    {
        self.flushed.push(*area);
        self.pixels_on += colors
            .into_iter()
            .filter(|color| *color == BinaryColor::On)
            .count();
        Ok(())
    }
}

impl Panel for RecordingPanel {
    fn set_power_save(&mut self, enabled: bool) -> Result<(), Infallible> {
        self.power_save = Some(enabled);
        Ok(())
    }
}
