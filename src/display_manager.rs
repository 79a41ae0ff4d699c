//! Display manager driving the widget tree and throttling panel updates
//!
//! The [`Display`] owns the drawing backend and the root widget. Each call
//! to [`Display::render`]:
//! - renders the tree if it was forced or a widget signalled a change
//! - converts the damaged pixel area into 8x8 hardware blocks, taking the
//!   display rotation into account
//! - pushes at most a configured number of blocks to the panel, leaving the
//!   rest for later calls

use alloc::rc::{Rc, Weak};
use core::cell::Cell;
use log::{debug, trace};

use crate::config::UpdateLimits;
use crate::ui::core::{BLOCK_SIZE, Canvas, DamageSink, Rotation, SharedWidget};
use crate::ui::geometry::{Area, Size};

/// Hardware side of the drawing backend.
///
/// Drawing itself goes through [`Canvas`] into RAM and cannot fail; pushing
/// to the panel can.
pub trait Backend: Canvas {
    type Error;

    /// Copy a rectangle of blocks (panel orientation) to the panel.
    fn update_blocks(&mut self, blocks: Area) -> Result<(), Self::Error>;

    /// Switch the panel into (`true`) or out of (`false`) power save mode.
    fn set_power_save(&mut self, enabled: bool) -> Result<(), Self::Error>;
}

/// Damage sink of the root widget: remembers that a render is needed.
#[derive(Default)]
struct RenderRequest(Cell<bool>);

impl DamageSink for RenderRequest {
    fn child_damaged(&self) {
        self.0.set(true);
    }
}

/// Convert a damaged pixel area (logical coordinates) into the block area
/// of the panel memory that has to be updated.
///
/// `display` is the logical display size. The result is clamped to the
/// whole blocks of the panel.
pub fn pixel_to_block_area(pixels: Area, display: Size, rotation: Rotation) -> Area {
    let pixels = pixels.clamp_to(display);
    if pixels.is_empty() {
        return Area::EMPTY;
    }
    let (w, h) = (display.width, display.height);
    let Area {
        left: l,
        top: t,
        right: r,
        bottom: b,
    } = pixels;

    let start = |v: u16| v / BLOCK_SIZE;
    let end = |v: u16| v.div_ceil(BLOCK_SIZE);
    let blocks = match rotation {
        Rotation::Deg0 => Area::new(start(l), start(t), end(r), end(b)),
        Rotation::Deg90 => Area::new(start(h - b), start(l), end(h - t), end(r)),
        Rotation::Deg180 => Area::new(start(w - r), start(h - b), end(w - l), end(h - t)),
        Rotation::Deg270 => Area::new(start(t), start(w - r), end(b), end(w - l)),
    };

    let physical = if rotation.is_transposed() {
        Size::new(h, w)
    } else {
        display
    };
    blocks.clamp_to(Size::new(
        physical.width / BLOCK_SIZE,
        physical.height / BLOCK_SIZE,
    ))
}

/// Root of the widget tree and scheduler of panel updates.
///
/// The display is either enabled (panel powered, renders happen) or
/// disabled, and independently active or inactive. An inactive display
/// keeps showing its last content but ignores render requests, which frees
/// the CPU for time critical work without blanking the panel.
pub struct Display<B: Backend> {
    backend: B,
    root: SharedWidget,
    request: Rc<RenderRequest>,
    enabled: bool,
    active: bool,
    limits: UpdateLimits,
    pending: Area,
    overflow: Area,
}

impl<B: Backend> Display<B> {
    /// Bind `root` to `backend`. Nothing is drawn before [`init`](Self::init).
    pub fn new(backend: B, root: SharedWidget) -> Self {
        let request = Rc::new(RenderRequest::default());
        root.borrow_mut()
            .attach(Rc::downgrade(&request) as Weak<dyn DamageSink>);
        Self {
            backend,
            root,
            request,
            enabled: false,
            active: false,
            limits: UpdateLimits::default(),
            pending: Area::EMPTY,
            overflow: Area::EMPTY,
        }
    }

    pub fn with_update_limits(mut self, limits: UpdateLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Change the block caps; takes effect with the next flush.
    pub fn set_update_limits(&mut self, limits: UpdateLimits) {
        self.limits = limits;
    }

    pub fn update_limits(&self) -> UpdateLimits {
        self.limits
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn root(&self) -> &SharedWidget {
        &self.root
    }

    /// Measure and lay out the whole tree on the full display, then
    /// optionally enable the display and render it.
    pub fn init(&mut self, enable: bool, render: bool) -> Result<(), B::Error> {
        let size = self.backend.display_size();
        {
            let mut root = self.root.borrow_mut();
            root.measure(&mut self.backend);
            root.layout(&mut self.backend, Area::new(0, 0, size.width, size.height));
        }
        self.active = true;
        debug!("Display: initialized {}x{} widget tree", size.width, size.height);

        if enable {
            self.enabled = false;
            self.enable(render, true)
        } else if render {
            self.render(true)
        } else {
            Ok(())
        }
    }

    /// Power the panel up and optionally render right away.
    pub fn enable(&mut self, render: bool, force: bool) -> Result<(), B::Error> {
        if self.enabled {
            return Ok(());
        }
        self.backend.set_power_save(false)?;
        self.enabled = true;
        debug!("Display: enabled");
        if render {
            self.render(force)?;
        }
        Ok(())
    }

    /// Power the panel down; renders do nothing until enabled again.
    pub fn disable(&mut self) -> Result<(), B::Error> {
        if !self.enabled {
            return Ok(());
        }
        self.backend.set_power_save(true)?;
        self.enabled = false;
        debug!("Display: disabled");
        Ok(())
    }

    /// Resume rendering.
    pub fn activate(&mut self) {
        self.active = true;
        debug!("Display: activated");
    }

    /// Stop rendering while keeping the panel on.
    pub fn deactivate(&mut self) {
        self.active = false;
        debug!("Display: deactivated");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True while damaged blocks still wait to be sent to the panel.
    pub fn is_updating_display(&self) -> bool {
        self.pending.has_area() || self.overflow.has_area()
    }

    /// Bring the panel up to date with the widget tree.
    ///
    /// Does nothing while disabled. Without `force`, blocks left over from
    /// an earlier call are flushed first and the tree is not rendered in
    /// that call. Otherwise the tree is rendered if `force` is set or a
    /// widget signalled a change, and the damaged blocks are flushed up to
    /// the first-update cap.
    pub fn render(&mut self, force: bool) -> Result<(), B::Error> {
        if !self.enabled {
            return Ok(());
        }
        if !force && self.is_updating_display() {
            return self.flush(self.limits.max_follow_update_blocks);
        }
        if !(self.active && (force || self.request.0.get())) {
            return Ok(());
        }
        self.request.0.set(false);

        let rendered = self.root.borrow_mut().render(&mut self.backend, force);
        trace!("Display: rendered {:?}", rendered);
        let Some(pixels) = rendered.bounds() else {
            return Ok(());
        };

        let blocks = pixel_to_block_area(
            pixels,
            self.backend.display_size(),
            self.backend.rotation(),
        );
        self.pending = blocks.union(self.pending).union(self.overflow);
        self.overflow = Area::EMPTY;

        if self.limits.max_first_update_blocks > 0 {
            self.flush(self.limits.max_first_update_blocks)?;
        }
        Ok(())
    }

    /// Send up to `max_blocks` pending blocks to the panel.
    ///
    /// A pending area wider than the cap is split: the columns beyond the
    /// cap are set aside as overflow, or merged into the overflow already
    /// queued, and sent once the rest is done. At least one row is sent per
    /// call.
    fn flush(&mut self, max_blocks: u16) -> Result<(), B::Error> {
        if self.pending.is_empty() {
            self.pending = core::mem::take(&mut self.overflow);
            if self.pending.is_empty() {
                return Ok(());
            }
        }

        let max_blocks = max_blocks.max(1) as u32;
        let width = self.pending.width() as u32;
        let height = self.pending.height() as u32;

        if max_blocks >= width * height {
            self.backend.update_blocks(self.pending)?;
            self.pending = core::mem::take(&mut self.overflow);
            return Ok(());
        }

        if width > max_blocks {
            let split = self.pending.left + max_blocks as u16;
            let rest = Area::new(
                split,
                self.pending.top,
                self.pending.right,
                self.pending.bottom,
            );
            // may re-send a few blocks, never more than the cap per call
            self.overflow = if self.overflow.is_empty() {
                rest
            } else {
                self.overflow.union(rest)
            };
            self.pending.right = split;
        }

        let width = self.pending.width() as u32;
        let rows = (max_blocks / width).clamp(1, height) as u16;
        let chunk = Area::new(
            self.pending.left,
            self.pending.top,
            self.pending.right,
            self.pending.top + rows,
        );
        self.backend.update_blocks(chunk)?;
        self.pending.top += rows;

        if self.pending.is_empty() {
            self.pending = core::mem::take(&mut self.overflow);
        }
        Ok(())
    }
}
