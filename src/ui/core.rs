// src/ui/core.rs
//! Core UI traits and types for the widget tree
//!
//! Every widget follows the same three-phase protocol, called by the
//! framework in this order:
//!
//! 1. [`Widget::measure`] returns the size the widget wants. Either length may
//!    be [`MAX_LEN`](super::geometry::MAX_LEN), meaning "whatever is available".
//! 2. [`Widget::layout`] assigns the area the widget may draw in. It can be
//!    larger or smaller than the preferred size; the widget has to cope.
//! 3. [`Widget::render`] draws into the frame buffer, restricted to the
//!    assigned area, and reports the part it actually changed.
//!
//! Widgets whose state changes between renders tell their parent through a
//! [`DamageSink`] so that the next non-forced render visits them.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use embedded_graphics::image::ImageRaw;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::text::{Baseline, renderer::TextRenderer};

use super::geometry::{Area, Point, Size};

/// Edge length of a hardware update block in pixels.
pub const BLOCK_SIZE: u16 = 8;

/// Monochrome image data as accepted by [`Canvas::draw_bitmap`].
pub type RawImage = ImageRaw<'static, BinaryColor>;

/// Widget handle shared between the tree and the code updating the widget.
pub type SharedWidget = Rc<RefCell<dyn Widget>>;

/// Wrap a widget so it can be placed into the tree while the caller keeps a
/// typed handle for updates (`set_text`, `set_value`, ...).
///
/// The returned `Rc<RefCell<W>>` coerces to [`SharedWidget`] wherever a
/// child is expected.
pub fn shared<W: Widget + 'static>(widget: W) -> Rc<RefCell<W>> {
    Rc::new(RefCell::new(widget))
}

// ---------------------------------------------------------------------------
// Dirty region
// ---------------------------------------------------------------------------

/// Result of a render pass: either nothing changed or the changed area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirtyRegion {
    /// Nothing was drawn.
    #[default]
    Clean,
    /// Pixels inside this (non-empty) area may have changed.
    Dirty(Area),
}

impl DirtyRegion {
    /// Dirty region for `area`, or clean if the area is empty.
    pub fn new(area: Area) -> Self {
        if area.has_area() {
            DirtyRegion::Dirty(area)
        } else {
            DirtyRegion::Clean
        }
    }

    pub fn is_dirty(&self) -> bool {
        matches!(self, DirtyRegion::Dirty(_))
    }

    /// The changed area, if any.
    pub fn bounds(&self) -> Option<Area> {
        match self {
            DirtyRegion::Clean => None,
            DirtyRegion::Dirty(area) => Some(*area),
        }
    }

    /// Expand this dirty region to include another one.
    pub fn expand_to_include(&mut self, other: DirtyRegion) {
        if let DirtyRegion::Dirty(area) = other {
            *self = match *self {
                DirtyRegion::Clean => DirtyRegion::Dirty(area),
                DirtyRegion::Dirty(current) => DirtyRegion::Dirty(current.union(area)),
            };
        }
    }
}

impl From<Area> for DirtyRegion {
    fn from(area: Area) -> Self {
        DirtyRegion::new(area)
    }
}

// ---------------------------------------------------------------------------
// Drawing contract
// ---------------------------------------------------------------------------

/// Rotation of the logical drawing surface relative to the panel memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// 90° clockwise: the top left of the drawing is the top right of the panel.
    Deg90,
    /// 180°: the top left of the drawing is the bottom right of the panel.
    Deg180,
    /// 270° clockwise: the top left of the drawing is the bottom left of the panel.
    Deg270,
}

impl Rotation {
    /// True if logical width and height are swapped against the panel.
    pub fn is_transposed(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Narrow drawing contract used by widgets.
///
/// Drawing targets a RAM frame buffer, so none of these operations fail.
/// All coordinates are logical, i.e. already rotated.
pub trait Canvas {
    /// Logical size of the drawing surface.
    fn display_size(&self) -> Size;

    /// How the logical surface maps onto the panel memory.
    fn rotation(&self) -> Rotation;

    /// Restrict all following drawing to `area`.
    fn set_clip(&mut self, area: Area);

    /// Fill `area` with `color`.
    fn fill(&mut self, area: Area, color: BinaryColor);

    /// Draw a one pixel wide line between both points (inclusive).
    fn draw_line(&mut self, from: Point, to: Point, color: BinaryColor);

    /// Draw the outline of `area`.
    fn draw_frame(&mut self, area: Area, color: BinaryColor) {
        if area.is_empty() {
            return;
        }
        let right = area.right - 1;
        let bottom = area.bottom - 1;
        self.draw_line(area.top_left(), Point::new(right, area.top), color);
        self.draw_line(Point::new(area.left, bottom), Point::new(right, bottom), color);
        self.draw_line(area.top_left(), Point::new(area.left, bottom), color);
        self.draw_line(Point::new(right, area.top), Point::new(right, bottom), color);
    }

    /// Draw `image` with its top left corner at `top_left`.
    fn draw_bitmap(&mut self, top_left: Point, image: &RawImage);

    /// Draw `text` with its top left corner at `top_left`.
    fn draw_text(&mut self, top_left: Point, text: &str, font: &'static MonoFont<'static>);

    /// Pixel extent of `text` in `font`.
    fn text_size(&self, text: &str, font: &'static MonoFont<'static>) -> Size {
        let style = MonoTextStyle::new(font, BinaryColor::On);
        let metrics = style.measure_string(text, Point::default().to_point(), Baseline::Top);
        let size = metrics.bounding_box.size;
        Size::new(
            size.width.min(u16::MAX as u32) as u16,
            size.height.min(u16::MAX as u32) as u16,
        )
    }

    /// Height of a text line in `font`.
    fn font_height(&self, font: &'static MonoFont<'static>) -> u16 {
        font.character_size.height.min(u16::MAX as u32) as u16
    }
}

// ---------------------------------------------------------------------------
// Damage signalling
// ---------------------------------------------------------------------------

/// Receiver of "a child needs rendering" signals.
///
/// Implemented by widget groups and by the display. Widgets only hold a
/// [`Weak`] reference to their sink: it is used for upward notification,
/// never for ownership or traversal.
pub trait DamageSink {
    /// Called when a child changed and wants the next render pass to visit it.
    fn child_damaged(&self);
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// State every widget carries: its assigned area, the cached preferred size
/// and the link to the enclosing group.
#[derive(Default)]
pub struct WidgetBase {
    area: Area,
    preferred: Option<Size>,
    sink: Option<Weak<dyn DamageSink>>,
}

impl WidgetBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Area assigned in the last layout pass.
    pub fn area(&self) -> Area {
        self.area
    }

    pub fn set_area(&mut self, area: Area) {
        self.area = area;
    }

    pub fn preferred(&self) -> Option<Size> {
        self.preferred
    }

    pub fn set_preferred(&mut self, size: Option<Size>) {
        self.preferred = size;
    }

    pub fn attach(&mut self, sink: Weak<dyn DamageSink>) {
        self.sink = Some(sink);
    }

    /// Tell the enclosing group (or the display) that this widget has to be
    /// rendered again.
    pub fn notify_parent_damaged(&self) {
        if let Some(sink) = self.sink.as_ref().and_then(Weak::upgrade) {
            sink.child_damaged();
        }
    }

    /// Restrict drawing to this widget's area.
    pub fn clip(&self, canvas: &mut dyn Canvas) {
        canvas.set_clip(self.area);
    }

    /// Clear the whole area of this widget.
    pub fn clear_full(&self, canvas: &mut dyn Canvas) {
        canvas.fill(self.area, BinaryColor::Off);
    }
}

/// A node of the widget tree.
pub trait Widget {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Compute the preferred size of this widget.
    ///
    /// Called by [`measure`](Widget::measure) until it returns a non-empty
    /// size, and again only after
    /// [`invalidate_measurement`](Widget::invalidate_measurement).
    fn compute_preferred_size(&mut self, canvas: &mut dyn Canvas) -> Size;

    /// Preferred size of this widget. The first non-empty result is cached.
    fn measure(&mut self, canvas: &mut dyn Canvas) -> Size {
        if let Some(size) = self.base().preferred() {
            return size;
        }
        let size = self.compute_preferred_size(canvas).clamped();
        if !size.is_empty() {
            self.base_mut().set_preferred(Some(size));
        }
        size
    }

    /// Drop the cached preferred size, e.g. after a font change.
    ///
    /// The next [`measure`](Widget::measure) recomputes it; a new layout pass
    /// is needed for the change to take effect.
    fn invalidate_measurement(&mut self) {
        self.base_mut().set_preferred(None);
    }

    /// Assign the area this widget renders into.
    ///
    /// Composite widgets store the area (like this default does) before
    /// subdividing it among their children.
    fn layout(&mut self, _canvas: &mut dyn Canvas, area: Area) {
        self.base_mut().set_area(area);
    }

    /// Draw the widget.
    ///
    /// With `force` the widget redraws itself completely. Otherwise it may
    /// skip drawing if nothing changed. Returns the area that was actually
    /// modified, or [`DirtyRegion::Clean`].
    fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion;

    /// Connect this widget to the sink of its enclosing group.
    ///
    /// Called once while the tree is built.
    fn attach(&mut self, sink: Weak<dyn DamageSink>) {
        self.base_mut().attach(sink);
    }

    /// Area assigned in the last layout pass.
    fn area(&self) -> Area {
        self.base().area()
    }
}
