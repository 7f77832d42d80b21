//! Tabs: registry, lazy content and the tab strip.
//!
//! A tab's content is either fixed text or a producer closure.  Producers
//! run only when their tab is actually drawn, and run again on every draw,
//! so a tab can show live data without the widget caching anything.

use std::fmt;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Widget,
};

use crate::ui::controls::Control;
use crate::ui::theme::Theme;

// ───────────────────────────────────────── content ───────────

/// Producer for lazily rendered content.
pub type Producer = Box<dyn FnMut() -> Text<'static>>;

/// What a tab shows.
pub enum TabContent {
    Static(Text<'static>),
    Lazy(Producer),
}

impl TabContent {
    pub fn lazy(producer: impl FnMut() -> Text<'static> + 'static) -> Self {
        TabContent::Lazy(Box::new(producer))
    }

    /// Evaluate now.  Static content is cloned; a producer is invoked, and
    /// if it panics the panic propagates to the host.
    pub fn resolve(&mut self) -> Text<'static> {
        match self {
            TabContent::Static(text) => text.clone(),
            TabContent::Lazy(producer) => producer(),
        }
    }
}

impl fmt::Debug for TabContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabContent::Static(text) => f.debug_tuple("Static").field(&text.height()).finish(),
            TabContent::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<Text<'static>> for TabContent {
    fn from(text: Text<'static>) -> Self {
        TabContent::Static(text)
    }
}

impl From<Line<'static>> for TabContent {
    fn from(line: Line<'static>) -> Self {
        TabContent::Static(Text::from(line))
    }
}

impl From<&'static str> for TabContent {
    fn from(s: &'static str) -> Self {
        TabContent::Static(Text::from(s))
    }
}

impl From<String> for TabContent {
    fn from(s: String) -> Self {
        TabContent::Static(Text::from(s))
    }
}

// ───────────────────────────────────────── tab ───────────────

/// One diagnostic tab.
#[derive(Debug)]
pub struct Tab {
    pub id: String,
    pub label: String,
    /// Short symbol drawn before the label.
    pub icon: Option<String>,
    pub content: TabContent,
    /// Buttons and toggles drawn under the content.
    pub controls: Vec<Control>,
}

impl Tab {
    pub fn new(id: impl Into<String>, label: impl Into<String>, content: impl Into<TabContent>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            content: content.into(),
            controls: Vec::new(),
        }
    }

    /// A tab whose content is produced on every draw while it is shown.
    pub fn lazy(
        id: impl Into<String>,
        label: impl Into<String>,
        producer: impl FnMut() -> Text<'static> + 'static,
    ) -> Self {
        Self::new(id, label, TabContent::lazy(producer))
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }
}

// ───────────────────────────────────────── registry ──────────

/// The mounted widget's tabs, in configuration order.  Never reordered or
/// extended after mount.
#[derive(Debug, Default)]
pub struct TabRegistry {
    tabs: Vec<Tab>,
}

impl TabRegistry {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self { tabs }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// The tab strip is only drawn when there is something to switch to.
    pub fn has_strip(&self) -> bool {
        self.tabs.len() > 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    /// Id of the tab after `id`, wrapping.  Unknown ids start from the first.
    pub fn next_id(&self, id: &str) -> Option<&str> {
        let next = self.position(id).map_or(0, |i| (i + 1) % self.tabs.len());
        self.tabs.get(next).map(|t| t.id.as_str())
    }

    /// Id of the tab before `id`, wrapping.
    pub fn prev_id(&self, id: &str) -> Option<&str> {
        let len = self.tabs.len();
        let prev = self.position(id).map_or(0, |i| (i + len - 1) % len);
        self.tabs.get(prev).map(|t| t.id.as_str())
    }

    /// Evaluate the content of the tab `id`.  Only the named tab is
    /// touched.
    pub fn resolve_content(&mut self, id: &str) -> Option<Text<'static>> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == id)
            .map(|t| t.content.resolve())
    }

    /// Controls of the tab `id`; empty for unknown ids.
    pub fn controls(&self, id: &str) -> &[Control] {
        self.get(id).map(|t| t.controls.as_slice()).unwrap_or_default()
    }

    /// Run the callback of `control_id` on tab `tab_id`.  Returns whether
    /// such a control exists.
    pub fn activate_control(&mut self, tab_id: &str, control_id: &str) -> bool {
        let control = self
            .tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .and_then(|t| t.controls.iter_mut().find(|c| c.id == control_id));
        match control {
            Some(control) => {
                control.activate();
                true
            }
            None => false,
        }
    }
}

// ───────────────────────────────────────── strip ─────────────

/// One-row tab strip.  Every tab gets an equal share of the width.
pub struct TabStrip<'a> {
    pub tabs: &'a TabRegistry,
    pub active: &'a str,
    pub hovered: Option<&'a str>,
    pub theme: Theme,
}

impl<'a> TabStrip<'a> {
    /// Column spans for each tab, in order.
    pub fn segments(count: usize, area: Rect) -> Vec<Rect> {
        if count == 0 || area.width == 0 {
            return Vec::new();
        }
        let count_u16 = u16::try_from(count).unwrap_or(u16::MAX);
        let base = area.width / count_u16;
        let extra = area.width % count_u16;
        let mut x = area.x;
        (0..count_u16)
            .map(|i| {
                // spread the remainder over the leftmost tabs
                let w = base + u16::from(i < extra);
                let rect = Rect::new(x, area.y, w, 1);
                x = x.saturating_add(w);
                rect
            })
            .collect()
    }

    /// Render and return each tab's id with its clickable rect.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> Vec<(String, Rect)> {
        let segments = Self::segments(self.tabs.len(), area);
        let mut hits = Vec::with_capacity(segments.len());

        for (tab, rect) in self.tabs.iter().zip(segments) {
            let active = tab.id == self.active;
            let hovered = self.hovered == Some(tab.id.as_str());
            let style = self.theme.tab_style(active, hovered);

            buf.set_style(rect, style);
            let mut label = String::new();
            if let Some(icon) = &tab.icon {
                label.push_str(icon);
                label.push(' ');
            }
            label.push_str(&tab.label.to_uppercase());

            let line = Line::from(Span::styled(label, style)).centered();
            line.render(rect, buf);

            hits.push((tab.id.clone(), rect));
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn counting_tab(id: &str, calls: &Rc<Cell<u32>>) -> Tab {
        let calls = Rc::clone(calls);
        let label = id.to_string();
        Tab::lazy(id, id, move || {
            calls.set(calls.get() + 1);
            Text::from(format!("{label} #{}", calls.get()))
        })
    }

    #[test]
    fn lazy_content_runs_only_when_resolved() {
        let metrics = Rc::new(Cell::new(0));
        let state = Rc::new(Cell::new(0));
        let mut registry =
            TabRegistry::new(vec![counting_tab("metrics", &metrics), counting_tab("state", &state)]);

        assert_eq!(metrics.get(), 0);
        registry.resolve_content("metrics");
        registry.resolve_content("metrics");
        assert_eq!(metrics.get(), 2);
        assert_eq!(state.get(), 0);
    }

    #[test]
    fn static_content_is_cloned() {
        let mut registry = TabRegistry::new(vec![Tab::new("about", "About", "hello")]);
        let text = registry.resolve_content("about").unwrap();
        assert_eq!(text, Text::from("hello"));
        assert!(registry.resolve_content("missing").is_none());
    }

    #[test]
    #[should_panic(expected = "host bug")]
    fn producer_panics_propagate() {
        let mut registry = TabRegistry::new(vec![Tab::lazy("boom", "Boom", || panic!("host bug"))]);
        registry.resolve_content("boom");
    }

    #[test]
    fn next_and_prev_wrap() {
        let registry = TabRegistry::new(vec![
            Tab::new("a", "A", "a"),
            Tab::new("b", "B", "b"),
            Tab::new("c", "C", "c"),
        ]);
        assert_eq!(registry.next_id("a"), Some("b"));
        assert_eq!(registry.next_id("c"), Some("a"));
        assert_eq!(registry.prev_id("a"), Some("c"));
        assert_eq!(registry.next_id("zzz"), Some("a"));
        assert_eq!(TabRegistry::default().next_id("a"), None);
    }

    #[test]
    fn controls_are_scoped_to_their_tab() {
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let mut registry = TabRegistry::new(vec![
            Tab::new("a", "A", "a").control(Control::button("go", "Go", move || counter.set(counter.get() + 1))),
            Tab::new("b", "B", "b"),
        ]);
        assert_eq!(registry.controls("a").len(), 1);
        assert!(registry.controls("missing").is_empty());

        assert!(!registry.activate_control("b", "go"));
        assert!(!registry.activate_control("a", "stop"));
        assert!(registry.activate_control("a", "go"));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn strip_only_with_several_tabs() {
        assert!(!TabRegistry::new(vec![Tab::new("a", "A", "a")]).has_strip());
        assert!(TabRegistry::new(vec![Tab::new("a", "A", "a"), Tab::new("b", "B", "b")]).has_strip());
    }

    #[test]
    fn segments_cover_the_row() {
        let area = Rect::new(3, 7, 20, 1);
        let segments = TabStrip::segments(3, area);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Rect::new(3, 7, 7, 1));
        assert_eq!(segments[1], Rect::new(10, 7, 7, 1));
        assert_eq!(segments[2], Rect::new(17, 7, 6, 1));
        assert!(TabStrip::segments(0, area).is_empty());
    }
}
