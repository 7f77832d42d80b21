//! Widget state and the layout state machine.
//!
//! All mutable layout state lives here so that rendering can be a pure
//! function over `&WidgetState` and event handling a set of transitions on
//! `&mut WidgetState`.

use crate::config::{Dimension, Position, WidgetConfig};
use crate::core::resize::{self, ResizeBounds};
use crate::core::scheme::ColorScheme;

/// Which layout the widget is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Only the trigger is shown.
    Collapsed,
    /// Panel anchored to a screen corner.
    OpenCorner { expanded: bool },
    /// Panel docked to the bottom edge.
    OpenPane,
}

/// Per-instance mutable state.  Created on mount, dropped on unmount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    pub collapsed: bool,
    pub expanded: bool,
    pub active_tab_id: String,
    pub pane_height: Dimension,
    pub resizing: bool,
    pub resolved_theme: ColorScheme,
}

impl WidgetState {
    /// Initial state from the config.  An auto theme starts out dark until
    /// the first effect pass reads the system preference.
    pub fn from_config(config: &WidgetConfig) -> Self {
        let active_tab_id = config
            .default_tab_id
            .clone()
            .or_else(|| config.tabs.first().map(|t| t.id.clone()))
            .unwrap_or_default();
        Self {
            collapsed: !config.default_open,
            expanded: false,
            active_tab_id,
            pane_height: config.default_pane_height,
            resizing: false,
            resolved_theme: config.theme.explicit().unwrap_or_default(),
        }
    }

    pub fn layout(&self, position: Position) -> LayoutMode {
        if self.collapsed {
            LayoutMode::Collapsed
        } else if position.is_pane() {
            LayoutMode::OpenPane
        } else {
            LayoutMode::OpenCorner {
                expanded: self.expanded,
            }
        }
    }

    pub fn is_open(&self) -> bool {
        !self.collapsed
    }

    // ── transitions ────────────────────────────────────────────

    /// Trigger: Collapsed ↔ Open.
    pub fn toggle_open(&mut self) {
        if self.collapsed {
            self.open();
        } else {
            self.close();
        }
    }

    pub fn open(&mut self) {
        if self.collapsed {
            self.collapsed = false;
            tracing::debug!("devbar opened");
        }
    }

    /// Collapse from any open state.  A resize in progress ends with it.
    pub fn close(&mut self) {
        if !self.collapsed {
            self.collapsed = true;
            tracing::debug!("devbar closed");
        }
        self.resizing = false;
    }

    /// Expand button.  Corner variants only, while open.  Returns whether
    /// anything changed.
    pub fn toggle_expanded(&mut self, position: Position) -> bool {
        if position.is_pane() || self.collapsed {
            return false;
        }
        self.expanded = !self.expanded;
        tracing::debug!(expanded = self.expanded, "devbar expand toggled");
        true
    }

    /// Escape key.  Only closes an open pane.
    pub fn escape(&mut self, position: Position) -> bool {
        if position.is_pane() && !self.collapsed {
            self.close();
            true
        } else {
            false
        }
    }

    /// Resize handle pressed.  Open pane only.
    pub fn begin_resize(&mut self, position: Position) -> bool {
        if !position.is_pane() || self.collapsed || self.resizing {
            return false;
        }
        self.resizing = true;
        tracing::debug!("pane resize started");
        true
    }

    pub fn end_resize(&mut self) {
        if self.resizing {
            self.resizing = false;
            tracing::debug!(height = %self.pane_height, "pane resize finished");
        }
    }

    /// Pointer moved during a resize.  The pane height only changes when the
    /// implied height is within `bounds`.
    pub fn resize_to(&mut self, viewport_height: u16, pointer_row: u16, bounds: ResizeBounds) -> bool {
        if !self.resizing {
            return false;
        }
        let current = self.pane_height.resolve(viewport_height);
        let next = resize::next_pane_height(current, viewport_height, pointer_row, bounds);
        if next == current {
            return false;
        }
        self.pane_height = Dimension::Cells(next);
        true
    }

    /// Make `id` the active tab.  No side effects on the tab being left.
    pub fn select_tab(&mut self, id: &str) -> bool {
        if self.active_tab_id == id {
            return false;
        }
        tracing::debug!(from = %self.active_tab_id, to = id, "tab switched");
        self.active_tab_id = id.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheme::ThemeMode;
    use crate::ui::tabs::Tab;

    fn config(position: Position) -> WidgetConfig {
        WidgetConfig::builder()
            .tab(Tab::new("metrics", "Metrics", "m"))
            .tab(Tab::new("state", "State", "s"))
            .position(position)
            .build()
            .unwrap()
    }

    #[test]
    fn initial_state_from_defaults() {
        let state = WidgetState::from_config(&config(Position::BottomRight));
        assert!(state.collapsed);
        assert!(!state.expanded);
        assert!(!state.resizing);
        assert_eq!(state.active_tab_id, "metrics");
        assert_eq!(state.pane_height, WidgetConfig::DEFAULT_PANE_HEIGHT);
        assert_eq!(state.layout(Position::BottomRight), LayoutMode::Collapsed);
    }

    #[test]
    fn default_tab_and_open_are_honoured() {
        let mut config = config(Position::TopLeft);
        config.default_tab_id = Some("state".into());
        config.default_open = true;
        config.theme = ThemeMode::Light;
        let state = WidgetState::from_config(&config);
        assert!(!state.collapsed);
        assert_eq!(state.active_tab_id, "state");
        assert_eq!(state.resolved_theme, ColorScheme::Light);
    }

    #[test]
    fn no_tabs_means_empty_active_id() {
        let config = WidgetConfig::builder().build().unwrap();
        assert_eq!(WidgetState::from_config(&config).active_tab_id, "");
    }

    #[test]
    fn trigger_toggles() {
        let mut state = WidgetState::from_config(&config(Position::BottomLeft));
        state.toggle_open();
        assert_eq!(
            state.layout(Position::BottomLeft),
            LayoutMode::OpenCorner { expanded: false }
        );
        state.toggle_open();
        assert!(state.collapsed);
    }

    #[test]
    fn expand_is_corner_only() {
        let mut state = WidgetState::from_config(&config(Position::Pane));
        state.open();
        assert!(!state.toggle_expanded(Position::Pane));
        assert!(!state.expanded);

        let mut state = WidgetState::from_config(&config(Position::TopRight));
        assert!(!state.toggle_expanded(Position::TopRight), "collapsed");
        state.open();
        assert!(state.toggle_expanded(Position::TopRight));
        assert_eq!(
            state.layout(Position::TopRight),
            LayoutMode::OpenCorner { expanded: true }
        );
    }

    #[test]
    fn escape_closes_open_pane_only() {
        let mut corner = WidgetState::from_config(&config(Position::BottomRight));
        corner.open();
        assert!(!corner.escape(Position::BottomRight));
        assert!(corner.is_open());

        let mut pane = WidgetState::from_config(&config(Position::Pane));
        assert!(!pane.escape(Position::Pane));
        pane.open();
        assert_eq!(pane.layout(Position::Pane), LayoutMode::OpenPane);
        assert!(pane.escape(Position::Pane));
        assert!(pane.collapsed);
    }

    #[test]
    fn resize_requires_open_pane() {
        let mut state = WidgetState::from_config(&config(Position::Pane));
        assert!(!state.begin_resize(Position::Pane));
        state.open();
        assert!(state.begin_resize(Position::Pane));
        assert!(!state.begin_resize(Position::Pane), "already resizing");
        state.end_resize();
        assert!(!state.resizing);

        let mut corner = WidgetState::from_config(&config(Position::TopLeft));
        corner.open();
        assert!(!corner.begin_resize(Position::TopLeft));
    }

    #[test]
    fn closing_ends_resize() {
        let mut state = WidgetState::from_config(&config(Position::Pane));
        state.open();
        state.begin_resize(Position::Pane);
        state.close();
        assert!(!state.resizing);
    }

    #[test]
    fn resize_commits_only_in_bounds() {
        let mut state = WidgetState::from_config(&config(Position::Pane));
        state.open();
        state.pane_height = Dimension::Cells(300);
        let bounds = ResizeBounds::new(100);
        assert!(!state.resize_to(1000, 600, bounds), "not resizing yet");

        state.begin_resize(Position::Pane);
        assert!(!state.resize_to(1000, 950, bounds));
        assert_eq!(state.pane_height, Dimension::Cells(300));
        assert!(state.resize_to(1000, 600, bounds));
        assert_eq!(state.pane_height, Dimension::Cells(400));
    }

    #[test]
    fn select_tab_reassigns() {
        let mut state = WidgetState::from_config(&config(Position::BottomRight));
        assert!(state.select_tab("state"));
        assert!(!state.select_tab("state"));
        assert_eq!(state.active_tab_id, "state");
    }
}
