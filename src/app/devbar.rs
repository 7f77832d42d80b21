//! The mounted widget.
//!
//! A [`DevBar`] owns its configuration, tabs, layout state and every
//! listener guard.  Hosts feed it terminal events and render it over their
//! own frame:
//!
//! ```no_run
//! use devbar::{Ambient, DevBar, Tab, WidgetConfig};
//!
//! let config = WidgetConfig::builder()
//!     .tab(Tab::new("hello", "Hello", "world"))
//!     .build()?;
//! let mut bar = DevBar::mount(config, Ambient::detect())?;
//!
//! // in the draw closure, after the host's own widgets:
//! // frame.render_widget(&mut bar, frame.area());
//! // in the event loop:
//! // if !bar.handle_event(&event) { /* host handles it */ }
//! # Ok::<(), devbar::ConfigError>(())
//! ```
//!
//! Dropping the instance releases every listener it holds.

use crossterm::event::{Event, KeyEvent, MouseEvent};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::config::WidgetConfig;
use crate::core::listener::{ListenerGuard, ListenerRegistry};
use crate::core::resize::{ResizeBounds, ResizeSession};
use crate::core::scheme::{ColorScheme, ThemeMode, ThemeResolver};
use crate::core::visibility::resolve_visibility;
use crate::core::Ambient;
use crate::error::ConfigError;
use crate::ui::geometry::{geometry, Geometry, GeometryInput, PanelDims};
use crate::ui::shell::{HitTarget, HitZones, Shell, DEFAULT_TRIGGER_ICON};
use crate::ui::slide::SlideIn;
use crate::ui::tabs::TabRegistry;

use super::effects;
use super::handler;
use super::state::WidgetState;

pub struct DevBar {
    /// Host configuration, minus the tabs (moved into `tabs`).
    pub(crate) config: WidgetConfig,
    pub(crate) tabs: TabRegistry,
    pub(crate) state: WidgetState,
    pub(crate) theme: ThemeResolver,
    pub(crate) ambient: Ambient,
    pub(crate) listeners: ListenerRegistry,
    pub(crate) escape_guard: Option<ListenerGuard>,
    pub(crate) resize_session: Option<ResizeSession>,
    /// Last render area.  `None` until the first render.
    pub(crate) viewport: Option<Rect>,
    pub(crate) hit_zones: Option<HitZones>,
    pub(crate) hover: Option<HitTarget>,
    pub(crate) slide: SlideIn,
    pub(crate) content_scroll: u16,
    /// Height of the content drawn last frame, in wrapped rows.
    pub(crate) content_lines: u16,
}

impl std::fmt::Debug for DevBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevBar")
            .field("config", &self.config)
            .field("tabs", &self.tabs)
            .field("state", &self.state)
            .field("viewport", &self.viewport)
            .field("listeners", &self.listeners.total())
            .finish_non_exhaustive()
    }
}

impl DevBar {
    /// Validate `config` and create an instance.  No listener is attached
    /// until the first effect pass.
    pub fn mount(mut config: WidgetConfig, ambient: Ambient) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = WidgetState::from_config(&config);
        let tabs = TabRegistry::new(std::mem::take(&mut config.tabs));
        tracing::debug!(
            position = %config.position,
            tabs = tabs.len(),
            open = state.is_open(),
            "devbar mounted"
        );
        Ok(Self {
            theme: ThemeResolver::new(config.theme),
            config,
            tabs,
            state,
            ambient,
            listeners: ListenerRegistry::new(),
            escape_guard: None,
            resize_session: None,
            viewport: None,
            hit_zones: None,
            hover: None,
            slide: SlideIn::default(),
            content_scroll: 0,
            content_lines: 0,
        })
    }

    // ── accessors ──────────────────────────────────────────────

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn resolved_theme(&self) -> ColorScheme {
        self.state.resolved_theme
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn hit_zones(&self) -> Option<&HitZones> {
        self.hit_zones.as_ref()
    }

    pub fn content_scroll(&self) -> u16 {
        self.content_scroll
    }

    /// Rendered at all?  False before the first render and in production
    /// when `hide_in_production` is set.
    pub fn is_visible(&self) -> bool {
        resolve_visibility(
            self.viewport.is_some(),
            self.config.hide_in_production,
            self.config.environment.as_deref(),
            self.ambient.runtime_env.as_deref(),
        )
    }

    pub(crate) fn resize_bounds(&self) -> ResizeBounds {
        ResizeBounds::new(self.config.min_pane_height)
    }

    // ── input ──────────────────────────────────────────────────

    /// Route a terminal event.  Returns `true` when the widget consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => self.handle_mouse(*mouse),
            Event::Resize(width, height) => {
                match self.viewport.as_mut() {
                    Some(vp) => {
                        vp.width = *width;
                        vp.height = *height;
                    }
                    None => self.viewport = Some(Rect::new(0, 0, *width, *height)),
                }
                false
            }
            _ => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.is_visible() {
            return false;
        }
        let consumed = handler::handle_key(self, key);
        effects::sync_effects(self);
        consumed
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if !self.is_visible() {
            return false;
        }
        let consumed = handler::handle_mouse(self, mouse);
        effects::sync_effects(self);
        consumed
    }

    /// Advance the slide-in and pick up scheme changes.  Returns whether a
    /// redraw is due.
    pub fn tick(&mut self) -> bool {
        let animating = self.slide.is_animating();
        self.slide.tick();
        let theme_changed = effects::sync_effects(self);
        animating || theme_changed
    }

    // ── programmatic control ───────────────────────────────────

    pub fn open(&mut self) {
        if self.state.is_open() {
            return;
        }
        self.state.open();
        if self.config.position.is_pane() {
            if let Some(vp) = self.viewport {
                self.slide.start(self.state.pane_height.resolve(vp.height));
            }
        }
        effects::sync_effects(self);
    }

    pub fn close(&mut self) {
        self.state.close();
        self.slide.finish();
        effects::sync_effects(self);
    }

    pub fn toggle(&mut self) {
        if self.state.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Switch to the tab `id`.  Unknown ids are ignored.
    pub fn select_tab(&mut self, id: &str) -> bool {
        if !self.tabs.contains(id) || !self.state.select_tab(id) {
            return false;
        }
        self.content_scroll = 0;
        true
    }

    pub fn next_tab(&mut self) -> bool {
        match self.tabs.next_id(&self.state.active_tab_id).map(str::to_string) {
            Some(id) => self.select_tab(&id),
            None => false,
        }
    }

    pub fn prev_tab(&mut self) -> bool {
        match self.tabs.prev_id(&self.state.active_tab_id).map(str::to_string) {
            Some(id) => self.select_tab(&id),
            None => false,
        }
    }

    /// Click the control `id` of the active tab.  Returns whether it exists.
    pub fn activate_control(&mut self, id: &str) -> bool {
        self.tabs.activate_control(&self.state.active_tab_id, id)
    }

    pub fn toggle_expanded(&mut self) -> bool {
        self.state.toggle_expanded(self.config.position)
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme.set_mode(mode);
        effects::sync_effects(self);
    }

    /// Scroll the content area by `delta` lines, within what was drawn.
    pub fn scroll_content(&mut self, delta: i32) -> bool {
        let max = i32::from(self.content_lines.saturating_sub(1));
        let next = (i32::from(self.content_scroll) + delta).clamp(0, max);
        let next = u16::try_from(next).unwrap_or_default();
        let changed = next != self.content_scroll;
        self.content_scroll = next;
        changed
    }

    fn geometry(&self, viewport: Rect) -> Geometry {
        geometry(
            self.config.position,
            GeometryInput {
                collapsed: self.state.collapsed,
                expanded: self.state.expanded,
                pane_height: self.state.pane_height,
                slide_offset: self.slide.row_offset(),
            },
            PanelDims {
                width: self.config.width,
                max_height: self.config.max_height,
            },
            viewport,
        )
    }
}

impl Widget for &mut DevBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.viewport = Some(area);
        effects::sync_effects(self);
        if !self.is_visible() {
            self.hit_zones = None;
            return;
        }

        // Only the active tab of an open panel is evaluated.
        let content = if self.state.is_open() {
            self.tabs.resolve_content(&self.state.active_tab_id)
        } else {
            None
        };
        let zones = Shell {
            position: self.config.position,
            title: &self.config.title,
            trigger_icon: self.config.trigger_icon.as_deref().unwrap_or(DEFAULT_TRIGGER_ICON),
            state: &self.state,
            geometry: self.geometry(area),
            tabs: &self.tabs,
            content,
            content_scroll: self.content_scroll,
            hovered: self.hover.as_ref(),
        }
        .render_and_hit(buf);
        self.content_lines = zones.content_rows;
        self.content_scroll = self.content_scroll.min(self.content_lines.saturating_sub(1));
        self.hit_zones = Some(zones);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Position;
    use crate::core::listener::ListenerKind;
    use crate::ui::tabs::Tab;
    use std::cell::Cell;
    use std::rc::Rc;

    fn config(position: Position) -> WidgetConfig {
        WidgetConfig::builder()
            .tab(Tab::new("a", "A", "first"))
            .tab(Tab::new("b", "B", "second"))
            .position(position)
            .theme(ThemeMode::Dark)
            .build()
            .unwrap()
    }

    fn render(bar: &mut DevBar) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        buf
    }

    #[test]
    fn duplicate_tab_ids_fail_to_mount() {
        let mut cfg = config(Position::TopLeft);
        cfg.tabs.push(Tab::new("a", "Again", "x"));
        let err = DevBar::mount(cfg, Ambient::default()).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateTabId("a".into()));
    }

    #[test]
    fn invisible_until_first_render() {
        let mut bar = DevBar::mount(config(Position::TopLeft), Ambient::default()).unwrap();
        assert!(!bar.is_visible());
        assert!(!bar.handle_event(&Event::FocusGained));
        render(&mut bar);
        assert!(bar.is_visible());
        assert!(bar.hit_zones().is_some());
    }

    #[test]
    fn resize_event_hydrates_before_any_render() {
        let mut bar = DevBar::mount(config(Position::TopLeft), Ambient::default()).unwrap();
        assert!(!bar.handle_event(&Event::Resize(80, 24)));
        assert!(bar.is_visible());
        assert_eq!(bar.viewport, Some(Rect::new(0, 0, 80, 24)));
        assert!(bar.handle_event(&Event::Key(KeyEvent::from(crossterm::event::KeyCode::F(12)))));
        assert!(bar.state().is_open());
    }

    #[test]
    fn hidden_in_production() {
        let ambient = Ambient::default().with_runtime_env("production");
        let mut bar = DevBar::mount(config(Position::TopLeft), ambient).unwrap();
        let buf = render(&mut bar);
        assert!(!bar.is_visible());
        assert!(bar.hit_zones().is_none());
        assert_eq!(buf, Buffer::empty(Rect::new(0, 0, 80, 24)));
    }

    #[test]
    fn unknown_tab_is_ignored_and_switch_resets_scroll() {
        let mut bar = DevBar::mount(config(Position::TopLeft), Ambient::default()).unwrap();
        assert!(!bar.select_tab("missing"));
        bar.content_scroll = 3;
        assert!(bar.next_tab());
        assert_eq!(bar.state().active_tab_id, "b");
        assert_eq!(bar.content_scroll(), 0);
        assert!(bar.next_tab());
        assert_eq!(bar.state().active_tab_id, "a", "wraps");
        assert!(bar.prev_tab());
        assert_eq!(bar.state().active_tab_id, "b");
    }

    #[test]
    fn opening_a_pane_slides_in() {
        let mut bar = DevBar::mount(config(Position::Pane), Ambient::default()).unwrap();
        render(&mut bar);
        bar.open();
        assert!(bar.slide.is_animating());
        let mut frames = 0;
        while bar.tick() {
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(bar.slide.row_offset(), 0);
        render(&mut bar);
        let panel = bar.hit_zones().unwrap().panel.unwrap();
        assert_eq!(panel, Rect::new(0, 8, 80, 16));
    }

    #[test]
    fn lazy_tab_is_not_evaluated_while_collapsed() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let cfg = WidgetConfig::builder()
            .tab(Tab::lazy("lazy", "Lazy", move || {
                counter.set(counter.get() + 1);
                "produced".into()
            }))
            .build()
            .unwrap();
        let mut bar = DevBar::mount(cfg, Ambient::default()).unwrap();
        render(&mut bar);
        assert_eq!(calls.get(), 0);
        bar.open();
        render(&mut bar);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn dropping_releases_every_listener() {
        let mut bar = DevBar::mount(config(Position::Pane), Ambient::default()).unwrap();
        let listeners = bar.listeners().clone();
        render(&mut bar);
        bar.open();
        bar.state.begin_resize(Position::Pane);
        effects::sync_effects(&mut bar);
        assert_eq!(listeners.count(ListenerKind::KeyDown), 1);
        assert_eq!(listeners.count(ListenerKind::PointerMove), 1);
        drop(bar);
        assert_eq!(listeners.total(), 0);
    }
}
