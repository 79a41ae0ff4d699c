// src/ui/components/text.rs
//! Single line of text that redraws only what changed

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::BinaryColor;
use log::trace;

use crate::ui::core::{Canvas, DirtyRegion, Widget, WidgetBase};
use crate::ui::geometry::{Alignment, Area, MAX_LEN, Size};

/// Maximum number of characters a [`TextLine`] keeps.
pub const TEXT_CAPACITY: usize = 64;

/// One line of text in a fixed font.
///
/// The widget remembers where it drew last time. A render after a change
/// clears only that old area, draws the new text and reports the union of
/// old and new text areas, not the whole line. Setting the text it already
/// shows is a no-op.
///
/// Longer texts than [`TEXT_CAPACITY`] characters are cut off.
///
/// # Examples
/// ```ignore
/// let clock = shared(TextLine::new(&FONT_6X10).with_alignment(Alignment::CenterRight));
/// clock.borrow_mut().set_text("12:45");
/// ```
pub struct TextLine {
    base: WidgetBase,
    font: &'static MonoFont<'static>,
    text: heapless::String<TEXT_CAPACITY>,
    alignment: Alignment,
    icon_size: Option<Size>,
    dirty: bool,
    last_area: Area,
}

impl TextLine {
    /// Empty, centered text line.
    pub fn new(font: &'static MonoFont<'static>) -> Self {
        Self {
            base: WidgetBase::new(),
            font,
            text: heapless::String::new(),
            alignment: Alignment::Center,
            icon_size: None,
            dirty: false,
            last_area: Area::EMPTY,
        }
    }

    /// Text line with a fixed preferred size, typically showing a single
    /// glyph of a symbol font.
    pub fn icon(font: &'static MonoFont<'static>, size: Size) -> Self {
        Self {
            icon_size: Some(size),
            ..Self::new(font)
        }
    }

    /// Position of the text within the assigned area.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Show `text`. Nothing happens if the same text is already shown.
    pub fn set_text(&mut self, text: &str) {
        let mut new_text: heapless::String<TEXT_CAPACITY> = heapless::String::new();
        for c in text.chars() {
            if new_text.push(c).is_err() {
                break;
            }
        }
        if self.text != new_text {
            self.text = new_text;
            self.update_text();
        }
    }

    /// Show nothing.
    pub fn clear_text(&mut self) {
        self.set_text("");
    }

    /// Redraw the current text on the next render even though it did not
    /// change.
    pub fn update_text(&mut self) {
        self.dirty = true;
        self.base.notify_parent_damaged();
    }

    /// True if the text changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl Widget for TextLine {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn compute_preferred_size(&mut self, canvas: &mut dyn Canvas) -> Size {
        self.icon_size
            .unwrap_or_else(|| Size::new(MAX_LEN, canvas.font_height(self.font)))
    }

    fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
        let area = self.base.area();
        if !(self.dirty || force) || area.is_empty() {
            return DirtyRegion::Clean;
        }
        self.dirty = false;

        self.base.clip(canvas);
        if self.last_area.has_area() {
            canvas.fill(self.last_area, BinaryColor::Off);
        }

        let this_area = if self.text.is_empty() {
            Area::EMPTY
        } else {
            let size = canvas.text_size(&self.text, self.font);
            let top_left = area.aligned_top_left(self.alignment, size);
            canvas.draw_text(top_left, &self.text, self.font);
            Area::from_point_size(top_left, size).intersect(area)
        };

        let damage = self.last_area.union(this_area);
        self.last_area = this_area;
        trace!("TextLine {:?}: redrew {:?}", self.text.as_str(), damage);
        DirtyRegion::new(damage)
    }
}
