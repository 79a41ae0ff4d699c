// src/ui/layouts/group.rs
//! Widget group: an ordered sequence of child widgets with shared damage
//! tracking
//!
//! The group owns the sequence; the children themselves are reference
//! counted and usually also held by the code that updates them. Every child
//! gets its own [`DamageSink`] link on adoption, so the group always knows
//! which child signalled. The signal is forwarded upwards only once until
//! the next render visits the children.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::ui::core::{Canvas, DamageSink, DirtyRegion, SharedWidget, WidgetBase};

/// Which children's damage signals are taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Accept {
    All,
    Only(usize),
    Nothing,
}

/// Damage bookkeeping shared between a group and the links of its children.
struct DamageHub {
    pending: Cell<bool>,
    accept: Cell<Accept>,
    upstream: RefCell<Option<Weak<dyn DamageSink>>>,
}

impl DamageHub {
    fn child_damaged(&self, index: usize) {
        let accepted = match self.accept.get() {
            Accept::All => true,
            Accept::Only(visible) => visible == index,
            Accept::Nothing => false,
        };
        if accepted && !self.pending.replace(true) {
            self.forward();
        }
    }

    fn forward(&self) {
        let upstream = self.upstream.borrow().as_ref().and_then(Weak::upgrade);
        if let Some(sink) = upstream {
            sink.child_damaged();
        }
    }
}

/// Sink handed to one child; knows the child's position in the group.
struct ChildLink {
    index: usize,
    hub: Weak<DamageHub>,
}

impl DamageSink for ChildLink {
    fn child_damaged(&self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.child_damaged(self.index);
        }
    }
}

/// Ordered children plus the damage state composite widgets build upon.
pub struct WidgetGroup {
    base: WidgetBase,
    children: Vec<SharedWidget>,
    links: Vec<Rc<ChildLink>>,
    hub: Rc<DamageHub>,
}

impl Default for WidgetGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetGroup {
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            children: Vec::new(),
            links: Vec::new(),
            hub: Rc::new(DamageHub {
                pending: Cell::new(false),
                accept: Cell::new(Accept::All),
                upstream: RefCell::new(None),
            }),
        }
    }

    /// Append a child and adopt it: its damage signals now reach this group.
    pub fn push(&mut self, child: SharedWidget) {
        let link = Rc::new(ChildLink {
            index: self.links.len(),
            hub: Rc::downgrade(&self.hub),
        });
        let sink: Weak<dyn DamageSink> = Rc::downgrade(&link) as Weak<dyn DamageSink>;
        child.borrow_mut().attach(sink);
        self.links.push(link);
        self.children.push(child);
    }

    pub fn children(&self) -> &[SharedWidget] {
        &self.children
    }

    pub fn get(&self, index: usize) -> Option<&SharedWidget> {
        self.children.get(index)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn base(&self) -> &WidgetBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    /// Connect the group to its own parent.
    pub fn attach(&mut self, sink: Weak<dyn DamageSink>) {
        *self.hub.upstream.borrow_mut() = Some(sink.clone());
        self.base.attach(sink);
    }

    /// True if a child signalled since the last render of the children.
    pub fn needs_rendering(&self) -> bool {
        self.hub.pending.get()
    }

    /// Read and reset the "children need rendering" flag.
    pub fn take_needs_rendering(&self) -> bool {
        self.hub.pending.replace(false)
    }

    /// Restrict which children's signals are considered.
    pub(crate) fn set_accept(&self, accept: Accept) {
        self.hub.accept.set(accept);
    }

    /// Drop the cached preferred sizes of the group and all children.
    pub fn invalidate_measurement(&mut self) {
        self.base.set_preferred(None);
        for child in &self.children {
            child.borrow_mut().invalidate_measurement();
        }
    }

    /// Default group rendering.
    ///
    /// If forced or if any child signalled, every child is rendered and the
    /// union of their dirty regions is returned. Otherwise the children are
    /// not visited at all.
    pub fn render(&mut self, canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
        let signalled = self.take_needs_rendering();
        let mut rendered = DirtyRegion::Clean;
        if force || signalled {
            for child in &self.children {
                rendered.expand_to_include(child.borrow_mut().render(canvas, force));
            }
        }
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::core::{Widget, shared};
    use crate::ui::geometry::{Area, Size};
    use crate::ui::testing::RecordingCanvas;

    /// Leaf that reports its whole area whenever it is rendered after a poke.
    struct Blinker {
        base: WidgetBase,
        poked: bool,
        renders: u32,
    }

    impl Blinker {
        fn new() -> Self {
            Self {
                base: WidgetBase::new(),
                poked: false,
                renders: 0,
            }
        }

        fn poke(&mut self) {
            self.poked = true;
            self.base.notify_parent_damaged();
        }
    }

    impl Widget for Blinker {
        fn base(&self) -> &WidgetBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn compute_preferred_size(&mut self, _canvas: &mut dyn Canvas) -> Size {
            Size::new(4, 4)
        }

        fn render(&mut self, _canvas: &mut dyn Canvas, force: bool) -> DirtyRegion {
            self.renders += 1;
            if force || core::mem::take(&mut self.poked) {
                DirtyRegion::new(self.base.area())
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

    fn group_of_two() -> (
        WidgetGroup,
        Rc<RefCell<Blinker>>,
        Rc<RefCell<Blinker>>,
        Rc<CountingSink>,
    ) {
        let a = shared(Blinker::new());
        let b = shared(Blinker::new());
        a.borrow_mut().base.set_area(Area::new(0, 0, 4, 4));
        b.borrow_mut().base.set_area(Area::new(10, 10, 14, 14));
        let mut group = WidgetGroup::new();
        group.push(a.clone());
        group.push(b.clone());
        let sink = Rc::new(CountingSink(Cell::new(0)));
        group.attach(Rc::downgrade(&sink) as Weak<dyn DamageSink>);
        (group, a, b, sink)
    }

    #[test]
    fn test_unsignalled_group_skips_children() {
        let mut canvas = RecordingCanvas::new(32, 32);
        let (mut group, a, b, _sink) = group_of_two();
        assert_eq!(group.render(&mut canvas, false), DirtyRegion::Clean);
        assert_eq!(a.borrow().renders, 0);
        assert_eq!(b.borrow().renders, 0);
    }

    #[test]
    fn test_forced_render_unites_children() {
        let mut canvas = RecordingCanvas::new(32, 32);
        let (mut group, _a, _b, _sink) = group_of_two();
        assert_eq!(
            group.render(&mut canvas, true).bounds(),
            Some(Area::new(0, 0, 14, 14))
        );
    }

    #[test]
    fn test_signals_collapse_until_next_render() {
        let mut canvas = RecordingCanvas::new(32, 32);
        let (mut group, a, b, sink) = group_of_two();
        a.borrow_mut().poke();
        b.borrow_mut().poke();
        a.borrow_mut().poke();
        assert_eq!(sink.0.get(), 1);
        assert!(group.needs_rendering());

        assert_eq!(
            group.render(&mut canvas, false).bounds(),
            Some(Area::new(0, 0, 14, 14))
        );
        assert!(!group.needs_rendering());

        b.borrow_mut().poke();
        assert_eq!(sink.0.get(), 2);
        assert_eq!(
            group.render(&mut canvas, false).bounds(),
            Some(Area::new(10, 10, 14, 14))
        );
    }

    #[test]
    fn test_accept_filters_signals() {
        let (group, a, b, sink) = group_of_two();
        group.set_accept(Accept::Only(1));
        a.borrow_mut().poke();
        assert_eq!(sink.0.get(), 0);
        assert!(!group.needs_rendering());
        b.borrow_mut().poke();
        assert_eq!(sink.0.get(), 1);
    }
}
