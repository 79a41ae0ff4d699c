// src/ui/layouts/envelope.rs
//! Single-content wrapper adding a border, alignment and expansion

use alloc::rc::Weak;

use crate::ui::core::{Canvas, DamageSink, DirtyRegion, SharedWidget, Widget, WidgetBase};
use crate::ui::geometry::{Alignment, Area, Expansion, MAX_LEN, Size};

use super::group::WidgetGroup;

/// Wraps at most one widget.
///
/// The content is inset by `border` on every side. If the content prefers
/// less than the remaining space it is shrunk to its preferred size and
/// placed according to `alignment`. `expansion` makes the envelope itself
/// prefer [`MAX_LEN`] along the chosen axes, whatever the content wants.
///
/// # Examples
/// ```ignore
/// let centered = shared(
///     Envelope::new()
///         .with_expansion(Expansion::Both)
///         .with_alignment(Alignment::Center)
///         .with_border(Size::new(2, 2))
///         .content(label.clone()),
/// );
/// ```
pub struct Envelope {
    group: WidgetGroup,
    expansion: Expansion,
    alignment: Alignment,
    border: Size,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}

impl Envelope {
    /// Empty envelope: no border, centered, not expanding.
    pub fn new() -> Self {
        Self {
            group: WidgetGroup::new(),
            expansion: Expansion::None,
            alignment: Alignment::Center,
            border: Size::EMPTY,
        }
    }

    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Horizontal (`width`) and vertical (`height`) inset on each side.
    pub fn with_border(mut self, border: Size) -> Self {
        self.border = border;
        self
    }

    /// Set the wrapped widget. Only the first call has an effect.
    pub fn content(mut self, content: SharedWidget) -> Self {
        if self.group.is_empty() {
            self.group.push(content);
        }
        self
    }

    fn inner(&self) -> Option<&SharedWidget> {
        self.group.get(0)
    }
}

impl Widget for Envelope {
    fn base(&self) -> &WidgetBase {
        self.group.base()
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self.group.base_mut()
    }

    fn compute_preferred_size(&mut self, canvas: &mut dyn Canvas) -> Size {
        let mut size = self
            .inner()
            .map_or(Size::EMPTY, |content| content.borrow_mut().measure(canvas));
        if self.expansion.horizontal() {
            size.width = MAX_LEN;
        }
        if self.expansion.vertical() {
            size.height = MAX_LEN;
        }
        size.cumulate(self.border).cumulate(self.border)
    }

    fn invalidate_measurement(&mut self) {
        self.group.invalidate_measurement();
    }

    fn layout(&mut self, canvas: &mut dyn Canvas, area: Area) {
        self.group.base_mut().set_area(area);
        let Some(content) = self.inner() else {
            return;
        };
        let mut content = content.borrow_mut();

        let mut inner = area.shrink(self.border);
        let available = inner.size();
        let preferred = content.measure(canvas);
        if preferred.width < available.width || preferred.height < available.height {
            let fitted = preferred.min(available);
            inner = Area::from_point_size(inner.aligned_top_left(self.alignment, fitted), fitted);
        }
        content.layout(canvas, inner);
    }

    fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
        if force {
            self.group.take_needs_rendering();
            let base = self.group.base();
            base.clip(canvas);
            base.clear_full(canvas);
            if let Some(content) = self.inner() {
                content.borrow_mut().render(canvas, true);
            }
            DirtyRegion::new(base.area())
        } else {
            self.group.render(canvas, false)
        }
    }

    fn attach(&mut self, sink: Weak<dyn DamageSink>) {
        self.group.attach(sink);
    }
}
