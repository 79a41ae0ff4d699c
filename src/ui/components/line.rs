// src/ui/components/line.rs
//! Horizontal and vertical separator lines

use embedded_graphics::pixelcolor::BinaryColor;

use crate::ui::core::{Canvas, DirtyRegion, Widget, WidgetBase};
use crate::ui::geometry::{MAX_LEN, Point, Size};

/// One pixel high line through the vertical middle of its area, with
/// `border` empty pixels above and below in the preferred size.
///
/// Lines never change, so they only draw on forced renders.
#[derive(Default)]
pub struct HorizontalLine {
    base: WidgetBase,
    border: u16,
}

impl HorizontalLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_border(mut self, border: u16) -> Self {
        self.border = border;
        self
    }
}

impl Widget for HorizontalLine {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn compute_preferred_size(&mut self, _canvas: &mut dyn Canvas) -> Size {
        Size::new(0, self.border.saturating_mul(2).saturating_add(1))
    }

    fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
        let area = self.base.area();
        if !force || area.is_empty() {
            return DirtyRegion::Clean;
        }
        self.base.clip(canvas);
        self.base.clear_full(canvas);
        let y = ((area.top as u32 + area.bottom as u32) / 2) as u16;
        canvas.draw_line(
            Point::new(area.left, y),
            Point::new(area.right - 1, y),
            BinaryColor::On,
        );
        DirtyRegion::new(area)
    }
}

/// One pixel wide line through the horizontal middle of its area, with
/// `border` empty pixels left and right in the preferred size.
#[derive(Default)]
pub struct VerticalLine {
    base: WidgetBase,
    border: u16,
}

impl VerticalLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_border(mut self, border: u16) -> Self {
        self.border = border;
        self
    }
}

impl Widget for VerticalLine {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn compute_preferred_size(&mut self, _canvas: &mut dyn Canvas) -> Size {
        Size::new(self.border.saturating_mul(2).saturating_add(1), MAX_LEN)
    }

    fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
        let area = self.base.area();
        if !force || area.is_empty() {
            return DirtyRegion::Clean;
        }
        self.base.clip(canvas);
        self.base.clear_full(canvas);
        let x = ((area.left as u32 + area.right as u32) / 2) as u16;
        canvas.draw_line(
            Point::new(x, area.top),
            Point::new(x, area.bottom - 1),
            BinaryColor::On,
        );
        DirtyRegion::new(area)
    }
}
