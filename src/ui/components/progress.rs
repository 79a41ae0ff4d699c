// src/ui/components/progress.rs
//! Progress bar growing in one of four directions

use embedded_graphics::pixelcolor::BinaryColor;

use crate::ui::core::{Canvas, DirtyRegion, Widget, WidgetBase};
use crate::ui::geometry::{Area, Direction, Size};

/// Bar filled proportionally to a value in `0..=u16::MAX`.
///
/// After the first full draw only the pixels that switched between filled
/// and unfilled are reported as damage.
pub struct ProgressBar {
    base: WidgetBase,
    thickness: u16,
    length: u16,
    direction: Direction,
    value: u16,
    changed: bool,
    drawn: bool,
    last_filled: Area,
    last_unfilled: Area,
}

impl ProgressBar {
    /// Bar preferring `length` pixels along `direction` and `thickness`
    /// across it.
    pub fn new(thickness: u16, length: u16, direction: Direction) -> Self {
        Self {
            base: WidgetBase::new(),
            thickness,
            length,
            direction,
            value: 0,
            changed: false,
            drawn: false,
            last_filled: Area::EMPTY,
            last_unfilled: Area::EMPTY,
        }
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn set_value(&mut self, value: u16) {
        if self.value != value {
            self.value = value;
            self.changed = true;
            self.base.notify_parent_damaged();
        }
    }

    /// Same as `set_value(0)`.
    pub fn clear_value(&mut self) {
        self.set_value(0);
    }

    /// Filled and unfilled part of the assigned area for the current value.
    fn split(&self) -> (Area, Area) {
        let area = self.base.area();
        let span = if self.direction.is_horizontal() {
            area.width()
        } else {
            area.height()
        };
        let bar = ((self.value as u32 * span as u32 + 0x7FFF) / 0xFFFF).min(span as u32) as u16;

        let Area {
            left,
            top,
            right,
            bottom,
        } = area;
        match self.direction {
            Direction::LeftToRight => (
                Area::new(left, top, left + bar, bottom),
                Area::new(left + bar, top, right, bottom),
            ),
            Direction::RightToLeft => (
                Area::new(right - bar, top, right, bottom),
                Area::new(left, top, right - bar, bottom),
            ),
            Direction::TopToDown => (
                Area::new(left, top, right, top + bar),
                Area::new(left, top + bar, right, bottom),
            ),
            Direction::DownToTop => (
                Area::new(left, bottom - bar, right, bottom),
                Area::new(left, top, right, bottom - bar),
            ),
        }
    }
}

impl Widget for ProgressBar {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn compute_preferred_size(&mut self, _canvas: &mut dyn Canvas) -> Size {
        if self.direction.is_horizontal() {
            Size::new(self.length, self.thickness)
        } else {
            Size::new(self.thickness, self.length)
        }
    }

    fn layout(&mut self, _canvas: &mut dyn Canvas, area: Area) {
        self.base.set_area(area);
        self.drawn = false;
    }

    fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
        let area = self.base.area();
        if !(self.changed || force) || area.is_empty() {
            return DirtyRegion::Clean;
        }
        self.changed = false;
        self.base.clip(canvas);

        let (filled, unfilled) = self.split();
        let damage = if force || !self.drawn {
            self.base.clear_full(canvas);
            area
        } else {
            if self.last_filled.has_area() {
                canvas.fill(self.last_filled, BinaryColor::Off);
            }
            let grown = filled.intersect(self.last_unfilled);
            let shrunk = self.last_filled.intersect(unfilled);
            grown.union(shrunk)
        };
        if filled.has_area() {
            canvas.fill(filled, BinaryColor::On);
        }

        self.drawn = true;
        self.last_filled = filled;
        self.last_unfilled = unfilled;
        DirtyRegion::new(damage)
    }
}
