// src/ui/layouts/cards.rs
//! Overlay of child widgets of which at most one is visible

use alloc::rc::Weak;
use log::debug;

use crate::error::UiError;
use crate::ui::core::{Canvas, DamageSink, DirtyRegion, SharedWidget, Widget, WidgetBase};
use crate::ui::geometry::{Area, Size};

use super::group::{Accept, WidgetGroup};

/// Group showing one of its children ("cards") at a time.
///
/// All cards get the same area, so switching never needs a new layout pass.
/// A switch clears the whole area and redraws the new card on the next
/// render; afterwards only the visible card is rendered incrementally.
/// Damage signals from hidden cards are ignored.
pub struct Cards {
    group: WidgetGroup,
    visible: Option<usize>,
    force_internally: bool,
}

impl Default for Cards {
    fn default() -> Self {
        Self::new()
    }
}

impl Cards {
    /// An empty card stack with no visible card.
    pub fn new() -> Self {
        let group = WidgetGroup::new();
        group.set_accept(Accept::Nothing);
        Self {
            group,
            visible: None,
            force_internally: false,
        }
    }

    /// Append a card.
    pub fn child(mut self, card: SharedWidget) -> Self {
        self.group.push(card);
        self
    }

    /// Index of the visible card, if any.
    pub fn visible(&self) -> Option<usize> {
        self.visible
    }

    /// Show the card at `index`, or none at all.
    ///
    /// Switching to the card already shown changes nothing.
    pub fn set_visible(&mut self, index: Option<usize>) -> Result<(), UiError> {
        if let Some(index) = index {
            let count = self.group.len();
            if index >= count {
                return Err(UiError::NoSuchCard { index, count });
            }
        }
        self.switch_to(index);
        Ok(())
    }

    /// Show no card; the area is cleared on the next render.
    pub fn hide(&mut self) {
        self.switch_to(None);
    }

    /// Show the first card, if there is one.
    pub fn show_first(&mut self) {
        if !self.group.is_empty() {
            self.switch_to(Some(0));
        }
    }

    /// `index` must be `None` or a valid card index.
    fn switch_to(&mut self, index: Option<usize>) {
        if self.visible == index {
            return;
        }
        debug!("Cards: switching visible card {:?} -> {:?}", self.visible, index);
        self.visible = index;
        self.group
            .set_accept(index.map_or(Accept::Nothing, Accept::Only));
        self.force_internally = true;
        self.group.base().notify_parent_damaged();
    }

    pub fn children(&self) -> &[SharedWidget] {
        self.group.children()
    }
}

impl Widget for Cards {
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
            .map(|card| card.borrow_mut().measure(canvas))
            .fold(Size::EMPTY, Size::max)
    }

    fn invalidate_measurement(&mut self) {
        self.group.invalidate_measurement();
    }

    fn layout(&mut self, canvas: &mut dyn Canvas, area: Area) {
        self.group.base_mut().set_area(area);
        for card in self.group.children() {
            card.borrow_mut().layout(canvas, area);
        }
    }

    fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
        let signalled = self.group.take_needs_rendering();
        let visible = self.visible.and_then(|index| self.group.get(index));

        if self.force_internally {
            self.force_internally = false;
            let base = self.group.base();
            base.clip(canvas);
            base.clear_full(canvas);
            if let Some(card) = visible {
                card.borrow_mut().render(canvas, true);
            }
            DirtyRegion::new(base.area())
        } else if force || signalled {
            match visible {
                Some(card) => card.borrow_mut().render(canvas, force),
                None => DirtyRegion::Clean,
            }
        } else {
            DirtyRegion::Clean
        }
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
    use core::cell::{Cell, RefCell};

    struct Card {
        base: WidgetBase,
        size: Size,
        changed: bool,
        renders: u32,
    }

    fn card(width: u16, height: u16) -> Rc<RefCell<Card>> {
        shared(Card {
            base: WidgetBase::new(),
            size: Size::new(width, height),
            changed: false,
            renders: 0,
        })
    }

    impl Card {
        fn change(&mut self) {
            self.changed = true;
            self.base.notify_parent_damaged();
        }
    }

    impl Widget for Card {
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
            self.renders += 1;
            if force || core::mem::take(&mut self.changed) {
                DirtyRegion::new(Area::from_point_size(
                    self.base.area().top_left(),
                    Size::new(2, 2),
                ))
            } else {
                DirtyRegion::Clean
            }
        }
    }

    struct CountingSink(Cell<u32>);

    impl DamageSink for CountingSink {
        fn child_damaged(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn laid_out(
        canvas: &mut RecordingCanvas,
    ) -> (Cards, Rc<RefCell<Card>>, Rc<RefCell<Card>>, Rc<CountingSink>) {
        let first = card(20, 8);
        let second = card(12, 16);
        let mut cards = Cards::new().child(first.clone()).child(second.clone());
        let sink = Rc::new(CountingSink(Cell::new(0)));
        cards.attach(Rc::downgrade(&sink) as Weak<dyn DamageSink>);
        assert_eq!(cards.measure(canvas), Size::new(20, 16));
        cards.layout(canvas, Area::new(0, 0, 32, 16));
        (cards, first, second, sink)
    }

    #[test]
    fn test_switch_forces_full_area() {
        let mut canvas = RecordingCanvas::new(32, 16);
        let (mut cards, first, second, sink) = laid_out(&mut canvas);

        cards.show_first();
        assert_eq!(sink.0.get(), 1);
        assert_eq!(
            cards.render(&mut canvas, false),
            DirtyRegion::Dirty(Area::new(0, 0, 32, 16))
        );
        assert_eq!(first.borrow().renders, 1);

        cards.set_visible(Some(1)).unwrap();
        // signal from the card that is now hidden
        first.borrow_mut().change();
        canvas.take();
        assert_eq!(
            cards.render(&mut canvas, false),
            DirtyRegion::Dirty(Area::new(0, 0, 32, 16))
        );
        assert_eq!(canvas.clears(), alloc::vec![Area::new(0, 0, 32, 16)]);
        assert_eq!(first.borrow().renders, 1);
        assert_eq!(second.borrow().renders, 1);
        assert_eq!(cards.render(&mut canvas, false), DirtyRegion::Clean);
    }

    #[test]
    fn test_hidden_card_signals_are_ignored() {
        let mut canvas = RecordingCanvas::new(32, 16);
        let (mut cards, first, second, sink) = laid_out(&mut canvas);
        cards.show_first();
        cards.render(&mut canvas, false);
        let signals = sink.0.get();

        second.borrow_mut().change();
        assert_eq!(sink.0.get(), signals);
        assert_eq!(cards.render(&mut canvas, false), DirtyRegion::Clean);
        assert_eq!(second.borrow().renders, 0);

        first.borrow_mut().change();
        assert_eq!(sink.0.get(), signals + 1);
        assert_eq!(
            cards.render(&mut canvas, false).bounds(),
            Some(Area::new(0, 0, 2, 2))
        );
    }

    #[test]
    fn test_hide_clears_area() {
        let mut canvas = RecordingCanvas::new(32, 16);
        let (mut cards, first, _second, _sink) = laid_out(&mut canvas);
        cards.show_first();
        cards.render(&mut canvas, false);
        canvas.take();

        cards.hide();
        assert_eq!(cards.visible(), None);
        assert_eq!(
            cards.render(&mut canvas, false).bounds(),
            Some(Area::new(0, 0, 32, 16))
        );
        assert_eq!(canvas.clears(), alloc::vec![Area::new(0, 0, 32, 16)]);
        assert_eq!(first.borrow().renders, 1);
    }

    #[test]
    fn test_unknown_card_is_rejected() {
        let mut canvas = RecordingCanvas::new(32, 16);
        let (mut cards, _first, _second, sink) = laid_out(&mut canvas);
        assert_eq!(
            cards.set_visible(Some(2)),
            Err(UiError::NoSuchCard { index: 2, count: 2 })
        );
        assert_eq!(cards.visible(), None);
        assert_eq!(sink.0.get(), 0);
    }

    #[test]
    fn test_repeated_switches_signal_once() {
        let mut canvas = RecordingCanvas::new(32, 16);
        let (mut cards, _first, _second, sink) = laid_out(&mut canvas);
        cards.show_first();
        cards.show_first();
        cards.set_visible(Some(0)).unwrap();
        assert_eq!(sink.0.get(), 1);

        cards.hide();
        cards.hide();
        assert_eq!(sink.0.get(), 2);

        let mut empty = Cards::new();
        empty.show_first();
        assert_eq!(empty.visible(), None);
    }
}
