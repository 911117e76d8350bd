//! Dirty tracking and redraw requests for a single view instance.
//!
//! There is no global state here: every view owns its flags, and procedural
//! drawables reach back to their view only through an [`Invalidator`] the
//! view hands them while they are attached.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bitflags::bitflags;

bitflags! {
    /// Derived state that must be rebuilt before (or during) the next paint.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct DirtyFlags: u8 {
        /// Geometry changed since the host last pulled the outline clip hint.
        const GEOMETRY       = 0b001;
        /// Shader transform and sampler must be rebuilt from the bitmap.
        const SHADER         = 0b010;
        /// Procedural content must be redrawn into the existing backing buffer.
        const SOURCE_CONTENT = 0b100;
    }
}

/// Called whenever the view needs the host to schedule a repaint.
pub type RedrawCallback = Rc<dyn Fn()>;

/// Handle a procedural drawable uses to report that its content changed.
///
/// Invalidating only records the request and asks the host for a repaint;
/// the owning view picks the request up at the start of its next paint.
#[derive(Clone)]
pub struct Invalidator {
    pending: Rc<Cell<bool>>,
    redraw: Option<RedrawCallback>,
}

impl Invalidator {
    pub(crate) fn new(pending: Rc<Cell<bool>>, redraw: Option<RedrawCallback>) -> Self {
        Self { pending, redraw }
    }

    pub fn invalidate(&self) {
        self.pending.set(true);
        if let Some(redraw) = &self.redraw {
            redraw();
        }
    }
}

impl std::fmt::Debug for Invalidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invalidator")
            .field("pending", &self.pending.get())
            .field("has_redraw", &self.redraw.is_some())
            .finish()
    }
}

/// Storage for the invalidator of a procedural drawable.
///
/// Implementors of [`ProceduralDrawable`](crate::widgets::ProceduralDrawable)
/// embed one of these and forward `set_invalidator` to it.
#[derive(Debug, Default)]
pub struct InvalidatorSlot {
    inner: RefCell<Option<Invalidator>>,
}

impl InvalidatorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, invalidator: Option<Invalidator>) {
        *self.inner.borrow_mut() = invalidator;
    }

    pub fn is_attached(&self) -> bool {
        self.inner.borrow().is_some()
    }

    /// Notify the attached view, if any. Returns whether anyone was notified.
    pub fn invalidate(&self) -> bool {
        // Clone out so the callback may re-enter the slot.
        let invalidator = self.inner.borrow().clone();
        match invalidator {
            Some(invalidator) => {
                invalidator.invalidate();
                true
            }
            None => false,
        }
    }
}
