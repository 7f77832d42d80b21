//! Input handling: maps key/mouse events to widget transitions.
//!
//! Both entry points return whether the event was consumed.  Unconsumed
//! events belong to the host.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::keymap::Action;
use crate::ui::shell::HitTarget;

use super::devbar::DevBar;

/// Lines moved per wheel notch.
const WHEEL_STEP: i32 = 1;

// ── keyboard ────────────────────────────────────────────────────

pub fn handle_key(bar: &mut DevBar, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    // Only heard while the escape listener is attached (open pane).
    if key.code == KeyCode::Esc && bar.escape_guard.is_some() {
        let closed = bar.state.escape(bar.config.position);
        if closed {
            bar.slide.finish();
        }
        return closed;
    }

    let Some(action) = bar.config.keymap.match_key(key) else {
        return false;
    };
    if bar.state.collapsed && !action.live_when_collapsed() {
        return false;
    }

    match action {
        Action::ToggleOpen => {
            bar.toggle();
            true
        }
        Action::ToggleExpand => bar.toggle_expanded(),
        Action::Close => {
            bar.close();
            true
        }
        Action::NextTab => bar.next_tab(),
        Action::PrevTab => bar.prev_tab(),
        Action::ScrollUp => {
            bar.scroll_content(-1);
            true
        }
        Action::ScrollDown => {
            bar.scroll_content(1);
            true
        }
    }
}

// ── mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(bar: &mut DevBar, mouse: MouseEvent) -> bool {
    // A drag in progress owns the pointer, wherever it goes.
    if bar.resize_session.is_some() {
        if let Some(consumed) = handle_resize_mouse(bar, mouse) {
            return consumed;
        }
    }

    let Some(zones) = bar.hit_zones.as_ref() else {
        return false;
    };
    let target = zones.hit(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Moved => {
            if bar.hover != target {
                bar.hover = target.clone();
            }
            target.is_some()
        }
        MouseEventKind::Down(MouseButton::Left) => match target {
            Some(target) => {
                click(bar, target);
                true
            }
            None => false,
        },
        MouseEventKind::ScrollUp => scroll_if_over_panel(bar, target.as_ref(), -WHEEL_STEP),
        MouseEventKind::ScrollDown => scroll_if_over_panel(bar, target.as_ref(), WHEEL_STEP),
        _ => target.is_some(),
    }
}

/// Pointer events while resizing.  `None` lets the event fall through to
/// normal hit-testing.
fn handle_resize_mouse(bar: &mut DevBar, mouse: MouseEvent) -> Option<bool> {
    let viewport = bar.viewport?;
    match mouse.kind {
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            let row = mouse.row.saturating_sub(viewport.y);
            let bounds = bar.resize_bounds();
            bar.state.resize_to(viewport.height, row, bounds);
            Some(true)
        }
        MouseEventKind::Up(_) => {
            bar.state.end_resize();
            Some(true)
        }
        _ => None,
    }
}

fn click(bar: &mut DevBar, target: HitTarget) {
    match target {
        HitTarget::Trigger => bar.toggle(),
        HitTarget::Expand => {
            bar.toggle_expanded();
        }
        HitTarget::Close => bar.close(),
        HitTarget::Tab(id) => {
            bar.select_tab(&id);
        }
        HitTarget::Control(id) => {
            bar.activate_control(&id);
        }
        HitTarget::ResizeHandle => {
            bar.state.begin_resize(bar.config.position);
        }
        // Clicks inside the panel never reach the host.
        HitTarget::Content | HitTarget::Panel => {}
    }
}

fn scroll_if_over_panel(bar: &mut DevBar, target: Option<&HitTarget>, delta: i32) -> bool {
    match target {
        Some(HitTarget::Content | HitTarget::Panel | HitTarget::Control(_)) => {
            bar.scroll_content(delta);
            true
        }
        Some(_) => true,
        None => false,
    }
}
