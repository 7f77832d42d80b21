//! Listener reconciliation.
//!
//! Runs after every input, render and tick.  Each global listener exists
//! exactly while the state that needs it holds; entering the state attaches
//! it, leaving the state drops its guard.

use crate::core::listener::ListenerKind;
use crate::core::resize::ResizeSession;

use super::devbar::DevBar;

/// Bring listeners and the resolved theme in line with the current state.
/// Returns whether the resolved theme changed.
pub(crate) fn sync_effects(bar: &mut DevBar) -> bool {
    let mut theme_changed = false;
    if let Some(scheme) = bar.theme.sync(&bar.ambient.system_scheme, &bar.listeners) {
        if scheme != bar.state.resolved_theme {
            tracing::debug!(?scheme, "resolved theme changed");
            bar.state.resolved_theme = scheme;
            theme_changed = true;
        }
    }

    // Escape closes an open pane, so its key listener lives exactly as long.
    let wants_escape = bar.config.position.is_pane() && bar.state.is_open();
    match (wants_escape, bar.escape_guard.is_some()) {
        (true, false) => bar.escape_guard = Some(bar.listeners.attach(ListenerKind::KeyDown)),
        (false, true) => bar.escape_guard = None,
        _ => {}
    }

    match (bar.state.resizing, bar.resize_session.is_some()) {
        (true, false) => bar.resize_session = Some(ResizeSession::begin(&bar.listeners)),
        (false, true) => bar.resize_session = None,
        _ => {}
    }

    theme_changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Position, WidgetConfig};
    use crate::core::scheme::{ColorScheme, SystemScheme, ThemeMode};
    use crate::core::Ambient;
    use crate::ui::tabs::Tab;

    fn mount(position: Position, theme: ThemeMode, system: SystemScheme) -> DevBar {
        let config = WidgetConfig::builder()
            .tab(Tab::new("a", "A", "a"))
            .position(position)
            .theme(theme)
            .build()
            .unwrap();
        DevBar::mount(config, Ambient::default().with_system_scheme(system)).unwrap()
    }

    #[test]
    fn escape_listener_follows_open_pane() {
        let mut bar = mount(Position::Pane, ThemeMode::Dark, SystemScheme::default());
        sync_effects(&mut bar);
        assert!(!bar.listeners().is_attached(ListenerKind::KeyDown));

        bar.state.open();
        sync_effects(&mut bar);
        assert_eq!(bar.listeners().count(ListenerKind::KeyDown), 1);
        sync_effects(&mut bar);
        assert_eq!(bar.listeners().count(ListenerKind::KeyDown), 1, "idempotent");

        bar.state.close();
        sync_effects(&mut bar);
        assert!(!bar.listeners().is_attached(ListenerKind::KeyDown));
    }

    #[test]
    fn corner_never_attaches_escape() {
        let mut bar = mount(Position::BottomLeft, ThemeMode::Dark, SystemScheme::default());
        bar.state.open();
        sync_effects(&mut bar);
        assert_eq!(bar.listeners().total(), 0);
    }

    #[test]
    fn resize_session_follows_resizing() {
        let mut bar = mount(Position::Pane, ThemeMode::Light, SystemScheme::default());
        bar.state.open();
        bar.state.begin_resize(Position::Pane);
        sync_effects(&mut bar);
        assert!(bar.listeners().is_attached(ListenerKind::PointerMove));
        assert!(bar.listeners().is_attached(ListenerKind::PointerUp));

        bar.state.end_resize();
        sync_effects(&mut bar);
        assert!(!bar.listeners().is_attached(ListenerKind::PointerMove));
        assert!(!bar.listeners().is_attached(ListenerKind::PointerUp));
    }

    #[test]
    fn auto_theme_resolves_on_first_pass() {
        let system = SystemScheme::new(ColorScheme::Light);
        let mut bar = mount(Position::BottomRight, ThemeMode::Auto, system.clone());
        assert_eq!(bar.state().resolved_theme, ColorScheme::Dark);
        assert!(sync_effects(&mut bar));
        assert_eq!(bar.state().resolved_theme, ColorScheme::Light);
        assert_eq!(bar.listeners().count(ListenerKind::SchemeChange), 1);

        system.set(ColorScheme::Dark);
        assert!(sync_effects(&mut bar));
        assert_eq!(bar.state().resolved_theme, ColorScheme::Dark);
        assert!(!sync_effects(&mut bar));
    }
}
