// src/ui/components/checkerboard.rs
//! Checker pattern filling its area, useful while building layouts

use embedded_graphics::image::ImageRaw;

use crate::ui::core::{Canvas, DirtyRegion, RawImage, Widget, WidgetBase};
use crate::ui::geometry::{Point, Size};

const TILE_LEN: u16 = 16;

#[rustfmt::skip]
static TILE_BITS: [u8; 32] = [
    0xaa, 0xaa, 0x55, 0x55, 0xaa, 0xaa, 0x55, 0x55,
    0xaa, 0xaa, 0x55, 0x55, 0xaa, 0xaa, 0x55, 0x55,
    0xaa, 0xaa, 0x55, 0x55, 0xaa, 0xaa, 0x55, 0x55,
    0xaa, 0xaa, 0x55, 0x55, 0xaa, 0xaa, 0x55, 0x55,
];

/// Tiles a 16x16 checker pattern over its whole area on forced renders.
#[derive(Default)]
pub struct Checkerboard {
    base: WidgetBase,
    preferred: Size,
}

impl Checkerboard {
    /// Checkerboard without a size preference of its own.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferred_size(mut self, size: Size) -> Self {
        self.preferred = size;
        self
    }
}

impl Widget for Checkerboard {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn compute_preferred_size(&mut self, _canvas: &mut dyn Canvas) -> Size {
        self.preferred
    }

    fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
        let area = self.base.area();
        if !force || area.is_empty() {
            return DirtyRegion::Clean;
        }
        self.base.clip(canvas);
        self.base.clear_full(canvas);

        let tile: RawImage = ImageRaw::new(&TILE_BITS, TILE_LEN as u32);
        for y in (area.top..area.bottom).step_by(TILE_LEN as usize) {
            for x in (area.left..area.right).step_by(TILE_LEN as usize) {
                canvas.draw_bitmap(Point::new(x, y), &tile);
            }
        }
        DirtyRegion::new(area)
    }
}
