// src/ui/layouts/stack.rs
//! Row and column stacking of child widgets

use alloc::rc::Weak;
use log::trace;

use crate::ui::core::{Canvas, DamageSink, DirtyRegion, SharedWidget, Widget, WidgetBase};
use crate::ui::geometry::{Area, MAX_LEN, Size};

use super::group::WidgetGroup;

/// Stacking axis of a [`Stack`].
///
/// Children are laid out one after the other along this axis and span the
/// whole assigned area along the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Side by side, left to right (columns)
    Horizontal,
    /// One below the other, top to bottom (rows)
    Vertical,
}

impl Axis {
    fn main(self, size: Size) -> u16 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Start and end of `area` along this axis.
    fn span(self, area: Area) -> (u16, u16) {
        match self {
            Axis::Horizontal => (area.left, area.right),
            Axis::Vertical => (area.top, area.bottom),
        }
    }

    /// The part of `area` between `start` and `end` along this axis.
    fn slice(self, area: Area, start: u16, end: u16) -> Area {
        match self {
            Axis::Horizontal => Area::new(start, area.top, end, area.bottom),
            Axis::Vertical => Area::new(area.left, start, area.right, end),
        }
    }
}

/// Group that stacks its children along one axis.
///
/// Children preferring [`MAX_LEN`] along the stacking axis are "extending":
/// they share whatever the fixed-size children leave over. Children that no
/// longer fit into the assigned area get an empty area.
///
/// # Examples
/// ```ignore
/// let status = shared(TextLine::new(&FONT_6X10));
/// let rows = shared(
///     Stack::rows()
///         .child(status.clone())
///         .child(shared(HorizontalLine::new()))
///         .child(shared(Checkerboard::new())),
/// );
/// ```
pub struct Stack {
    group: WidgetGroup,
    axis: Axis,
}

impl Stack {
    pub fn new(axis: Axis) -> Self {
        Self {
            group: WidgetGroup::new(),
            axis,
        }
    }

    /// Children one below the other.
    pub fn rows() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Children side by side.
    pub fn columns() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// Append a child.
    pub fn child(mut self, child: SharedWidget) -> Self {
        self.group.push(child);
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn children(&self) -> &[SharedWidget] {
        self.group.children()
    }
}

impl Widget for Stack {
    fn base(&self) -> &WidgetBase {
        self.group.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.group.base_mut()
    }

    fn compute_preferred_size(&mut self, canvas: &mut dyn Canvas) -> Size {
        self.group
            .children()
            .iter()
            .map(|child| child.borrow_mut().measure(canvas))
            .fold(Size::EMPTY, |acc, size| match self.axis {
                Axis::Horizontal => acc.stack_horizontal(size),
                Axis::Vertical => acc.stack_vertical(size),
            })
    }

    fn invalidate_measurement(&mut self) {
        self.group.invalidate_measurement();
    }

    fn layout(&mut self, canvas: &mut dyn Canvas, area: Area) {
        self.group.base_mut().set_area(area);

        let mut fixed = 0u32;
        let mut extending = 0u32;
        for child in self.group.children() {
            let len = self.axis.main(child.borrow_mut().measure(canvas));
            if len == MAX_LEN {
                extending += 1;
            } else {
                fixed += len as u32;
            }
        }

        let (start, end) = self.axis.span(area);
        let total = end.saturating_sub(start) as u32;
        let extending_len = if extending == 0 || fixed >= total {
            0
        } else {
            (total - fixed) / extending
        };

        let mut cursor = start;
        for child in self.group.children() {
            let mut child = child.borrow_mut();
            let len = match self.axis.main(child.measure(canvas)) {
                MAX_LEN => extending_len,
                len => len as u32,
            };
            let stop = (cursor as u32 + len).min(end as u32) as u16;
            let slice = if cursor < end {
                self.axis.slice(area, cursor, stop)
            } else {
                Area::EMPTY
            };
            child.layout(canvas, slice);
            cursor = stop.max(cursor);
        }
    }

    fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
        let rendered = self.group.render(canvas, force);
        trace!("{:?} stack rendered: {:?}", self.axis, rendered);
        rendered
    }

    fn attach(&mut self, sink: Weak<dyn DamageSink>) {
        self.group.attach(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::core::shared;
    use crate::ui::testing::RecordingCanvas;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    /// Leaf with a fixed preference that only remembers its layout.
    struct Slot {
        base: WidgetBase,
        size: Size,
    }

    fn slot(width: u16, height: u16) -> Rc<RefCell<Slot>> {
        shared(Slot {
            base: WidgetBase::new(),
            size: Size::new(width, height),
        })
    }

    impl Widget for Slot {
        fn base(&self) -> &WidgetBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn compute_preferred_size(&mut self, _canvas: &mut dyn Canvas) -> Size {
            self.size
        }

        fn render(&mut self, _canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
            if force {
                DirtyRegion::new(self.base.area())
            } else {
                DirtyRegion::Clean
            }
        }
    }

    #[test]
    fn test_extending_column_takes_remainder() {
        let mut canvas = RecordingCanvas::new(100, 20);
        let a = slot(20, 5);
        let b = slot(MAX_LEN, 5);
        let c = slot(10, 8);
        let mut columns = Stack::columns()
            .child(a.clone())
            .child(b.clone())
            .child(c.clone());

        assert_eq!(columns.measure(&mut canvas), Size::new(MAX_LEN, 8));
        columns.layout(&mut canvas, Area::new(0, 0, 100, 20));

        assert_eq!(a.borrow().area(), Area::new(0, 0, 20, 20));
        assert_eq!(b.borrow().area(), Area::new(20, 0, 90, 20));
        assert_eq!(b.borrow().area().width(), 70);
        assert_eq!(c.borrow().area(), Area::new(90, 0, 100, 20));
    }

    #[test]
    fn test_rows_share_height_between_extending_children() {
        let mut canvas = RecordingCanvas::new(64, 64);
        let top = slot(30, 10);
        let first = slot(10, MAX_LEN);
        let second = slot(10, MAX_LEN);
        let mut rows = Stack::rows()
            .child(top.clone())
            .child(first.clone())
            .child(second.clone());

        assert_eq!(rows.measure(&mut canvas), Size::new(30, MAX_LEN));
        rows.layout(&mut canvas, Area::new(4, 0, 60, 51));

        assert_eq!(top.borrow().area(), Area::new(4, 0, 60, 10));
        assert_eq!(first.borrow().area(), Area::new(4, 10, 60, 30));
        assert_eq!(second.borrow().area(), Area::new(4, 30, 60, 50));
    }

    #[test]
    fn test_overflowing_children_are_clamped() {
        let mut canvas = RecordingCanvas::new(64, 64);
        let a = slot(10, 30);
        let b = slot(10, 30);
        let c = slot(10, 30);
        let d = slot(10, MAX_LEN);
        let mut rows = Stack::rows()
            .child(a.clone())
            .child(b.clone())
            .child(c.clone())
            .child(d.clone());
        rows.measure(&mut canvas);
        rows.layout(&mut canvas, Area::new(0, 0, 20, 40));

        assert_eq!(a.borrow().area(), Area::new(0, 0, 20, 30));
        assert_eq!(b.borrow().area(), Area::new(0, 30, 20, 40));
        assert!(c.borrow().area().is_empty());
        assert!(d.borrow().area().is_empty());
    }

    #[test]
    fn test_forced_render_covers_all_slices() {
        let mut canvas = RecordingCanvas::new(64, 64);
        let mut rows = Stack::rows().child(slot(10, 4)).child(slot(10, 6));
        rows.measure(&mut canvas);
        rows.layout(&mut canvas, Area::new(0, 0, 64, 64));
        assert_eq!(
            rows.render(&mut canvas, true).bounds(),
            Some(Area::new(0, 0, 64, 10))
        );
        assert_eq!(rows.render(&mut canvas, false), DirtyRegion::Clean);
    }
}
