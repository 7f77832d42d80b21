//! Pane resize: pointer position → bounded pane height.
//!
//! Out-of-bounds candidates are dropped rather than clamped, so a pointer
//! that wanders off the top of the screen does not drag the pane to its
//! maximum.

use super::listener::{ListenerGuard, ListenerKind, ListenerRegistry};

/// Upper bound as a fraction of the viewport height.
pub const MAX_PANE_FRACTION: f32 = 0.8;

/// Default lower bound, in terminal rows.
pub const DEFAULT_MIN_PANE_HEIGHT: u16 = 4;

/// Accepted range for a committed pane height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeBounds {
    pub min: u16,
    pub max_fraction: f32,
}

impl Default for ResizeBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_PANE_HEIGHT,
            max_fraction: MAX_PANE_FRACTION,
        }
    }
}

impl ResizeBounds {
    pub fn new(min: u16) -> Self {
        Self {
            min,
            ..Self::default()
        }
    }

    /// Largest accepted height for a viewport of `viewport_height` rows.
    pub fn max_for(&self, viewport_height: u16) -> f32 {
        f32::from(viewport_height) * self.max_fraction
    }

    pub fn accepts(&self, height: u16, viewport_height: u16) -> bool {
        height >= self.min && f32::from(height) <= self.max_for(viewport_height)
    }
}

/// Height implied by a pointer at `pointer_row` (relative to the viewport
/// top).  `None` when the pointer is at or below the bottom edge.
pub fn candidate_height(viewport_height: u16, pointer_row: u16) -> Option<u16> {
    viewport_height
        .checked_sub(pointer_row)
        .filter(|h| *h > 0)
}

/// Apply one pointer move to `current`.  Returns the new pane height,
/// which is `current` unless the candidate lies within `bounds`.
pub fn next_pane_height(
    current: u16,
    viewport_height: u16,
    pointer_row: u16,
    bounds: ResizeBounds,
) -> u16 {
    match candidate_height(viewport_height, pointer_row) {
        Some(h) if bounds.accepts(h, viewport_height) => h,
        _ => current,
    }
}

/// The listeners a drag gesture needs.  Both are global: the pointer keeps
/// being tracked after it leaves the handle.  Dropping the session ends
/// tracking.
#[derive(Debug)]
pub struct ResizeSession {
    _pointer_move: ListenerGuard,
    _pointer_up: ListenerGuard,
}

impl ResizeSession {
    pub fn begin(listeners: &ListenerRegistry) -> Self {
        Self {
            _pointer_move: listeners.attach(ListenerKind::PointerMove),
            _pointer_up: listeners.attach(ListenerKind::PointerUp),
        }
    }
}
