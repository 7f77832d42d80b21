//! The drawn widget: trigger button and panel.
//!
//! ## Layout of an open panel
//!
//! ```text
//! ╭ DEV ─────────────────[+][x]╮   title and buttons on the top border
//! │  METRICS   │    STATE      │   tab strip (only with 2+ tabs)
//! │ content…                   │
//! │ [ Reset ]                  │   tab controls, one per row
//! ╰────────────────────────[◆]─╯   trigger drawn last, on top
//! ```
//!
//! A pane has only the top border, and that row doubles as the resize
//! handle.  Rendering returns [`HitZones`] so the input handler can
//! hit-test mouse events against what was actually drawn.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::state::WidgetState;
use crate::config::Position;
use crate::ui::geometry::Geometry;
use crate::ui::tabs::{TabRegistry, TabStrip};
use crate::ui::theme::Theme;

pub const DEFAULT_TRIGGER_ICON: &str = "◆";
const BUTTON_WIDTH: u16 = 3;
/// Narrower panels drop the header buttons.
const MIN_WIDTH_FOR_BUTTONS: u16 = 12;

/// Something the pointer can be over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Trigger,
    Expand,
    Close,
    Tab(String),
    /// A button or toggle of the active tab, by control id.
    Control(String),
    ResizeHandle,
    Content,
    /// Panel chrome with no action of its own.
    Panel,
}

/// Clickable regions from the last render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitZones {
    pub trigger: Rect,
    pub panel: Option<Rect>,
    pub expand: Option<Rect>,
    pub close: Option<Rect>,
    pub resize_handle: Option<Rect>,
    pub tabs: Vec<(String, Rect)>,
    pub controls: Vec<(String, Rect)>,
    pub content: Option<Rect>,
    /// Rows the content wraps to at the drawn width.
    pub content_rows: u16,
}

impl HitZones {
    /// Topmost target under `(col, row)`.
    pub fn hit(&self, col: u16, row: u16) -> Option<HitTarget> {
        let inside = |r: &Rect| point_in_rect(*r, col, row);
        if inside(&self.trigger) {
            return Some(HitTarget::Trigger);
        }
        if self.expand.as_ref().is_some_and(inside) {
            return Some(HitTarget::Expand);
        }
        if self.close.as_ref().is_some_and(inside) {
            return Some(HitTarget::Close);
        }
        if let Some((id, _)) = self.tabs.iter().find(|(_, r)| inside(r)) {
            return Some(HitTarget::Tab(id.clone()));
        }
        if let Some((id, _)) = self.controls.iter().find(|(_, r)| inside(r)) {
            return Some(HitTarget::Control(id.clone()));
        }
        if self.resize_handle.as_ref().is_some_and(inside) {
            return Some(HitTarget::ResizeHandle);
        }
        if self.content.as_ref().is_some_and(inside) {
            return Some(HitTarget::Content);
        }
        if self.panel.as_ref().is_some_and(inside) {
            return Some(HitTarget::Panel);
        }
        None
    }
}

pub(crate) fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Everything needed to draw one frame of the widget.
pub struct Shell<'a> {
    pub position: Position,
    pub title: &'a str,
    pub trigger_icon: &'a str,
    pub state: &'a WidgetState,
    pub geometry: Geometry,
    pub tabs: &'a TabRegistry,
    /// Active tab content, already resolved.  `None` while collapsed.
    pub content: Option<Text<'static>>,
    pub content_scroll: u16,
    pub hovered: Option<&'a HitTarget>,
}

impl<'a> Shell<'a> {
    fn theme(&self) -> Theme {
        Theme::new(self.state.resolved_theme)
    }

    fn is_hovered(&self, target: &HitTarget) -> bool {
        self.hovered == Some(target)
    }

    /// Draw panel (when open) then trigger, and report the hit zones.
    pub fn render_and_hit(self, buf: &mut Buffer) -> HitZones {
        let mut zones = HitZones::default();
        let panel_rect = self.geometry.panel.rect;
        if self.state.is_open() && !panel_rect.is_empty() {
            self.render_panel(panel_rect, buf, &mut zones);
        }
        zones.trigger = self.render_trigger(buf);
        zones
    }

    fn render_panel(&self, area: Rect, buf: &mut Buffer, zones: &mut HitZones) {
        let theme = self.theme();
        let is_pane = self.position.is_pane();
        Clear.render(area, buf);

        let handle_active = is_pane && (self.state.resizing || self.is_hovered(&HitTarget::ResizeHandle));
        let block = if is_pane {
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Double)
                .border_style(theme.resize_handle_style(handle_active))
        } else {
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_style())
        };
        let block = block.style(theme.panel_style());
        let inner = block.inner(area);
        block.render(area, buf);
        zones.panel = Some(area);

        // In the top corners the trigger sits on the header row; keep the
        // title and buttons clear of it.
        let trigger = self.geometry.trigger;
        let trigger_on_header = trigger.y == area.y && !trigger.is_empty();
        let mid = area.x + area.width / 2;
        let title_x = if trigger_on_header && trigger.x < mid {
            trigger.right() + 1
        } else {
            area.x + 1
        };
        let buttons_end = if trigger_on_header && trigger.x >= mid {
            trigger.x
        } else {
            area.right() - 1
        };

        // ── title and header buttons ───────────────────────────
        let title = Span::styled(format!(" {} ", self.title.to_uppercase()), theme.title_style());
        buf.set_span(title_x, area.y, &title, buttons_end.saturating_sub(title_x));

        if area.width >= MIN_WIDTH_FOR_BUTTONS {
            let close = Rect::new(buttons_end - BUTTON_WIDTH, area.y, BUTTON_WIDTH, 1);
            self.render_button("[x]", close, &HitTarget::Close, buf);
            zones.close = Some(close);

            if !is_pane {
                let label = if self.state.expanded { "[-]" } else { "[+]" };
                let expand = Rect::new(close.x - BUTTON_WIDTH, area.y, BUTTON_WIDTH, 1);
                self.render_button(label, expand, &HitTarget::Expand, buf);
                zones.expand = Some(expand);
            }
        }
        if is_pane {
            zones.resize_handle = Some(Rect::new(area.x, area.y, area.width, 1));
        }

        // ── tab strip ──────────────────────────────────────────
        let mut content_area = inner;
        if self.tabs.has_strip() && inner.height > 0 {
            let strip = Rect::new(inner.x, inner.y, inner.width, 1);
            let hovered_tab = match self.hovered {
                Some(HitTarget::Tab(id)) => Some(id.as_str()),
                _ => None,
            };
            zones.tabs = TabStrip {
                tabs: self.tabs,
                active: &self.state.active_tab_id,
                hovered: hovered_tab,
                theme,
            }
            .render_and_hit(strip, buf);
            content_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
        }

        // ── content and controls ───────────────────────────────
        let padded = Rect::new(
            content_area.x.saturating_add(1),
            content_area.y,
            content_area.width.saturating_sub(2),
            content_area.height,
        );
        let controls = self.tabs.controls(&self.state.active_tab_id);
        let control_rows = u16::try_from(controls.len())
            .unwrap_or(u16::MAX)
            .min(padded.height);
        let text_area = Rect {
            height: padded.height - control_rows,
            ..padded
        };
        if let Some(text) = &self.content {
            let paragraph = Paragraph::new(text.clone())
                .style(theme.panel_style())
                .wrap(Wrap { trim: false });
            let rows = u16::try_from(paragraph.line_count(text_area.width)).unwrap_or(u16::MAX);
            zones.content_rows = rows;
            paragraph
                .scroll((self.content_scroll.min(rows.saturating_sub(1)), 0))
                .render(text_area, buf);
        }
        zones.content = Some(content_area);

        let mut y = text_area.bottom();
        for control in controls.iter().take(usize::from(control_rows)) {
            let hovered = matches!(self.hovered, Some(HitTarget::Control(id)) if *id == control.id);
            let line = control.line(self.state.resolved_theme, hovered);
            let width = u16::try_from(line.width()).unwrap_or(u16::MAX).min(padded.width);
            let rect = Rect::new(padded.x, y, width, 1);
            line.render(rect, buf);
            zones.controls.push((control.id.clone(), rect));
            y += 1;
        }
    }

    fn render_button(&self, label: &'static str, rect: Rect, target: &HitTarget, buf: &mut Buffer) {
        let style = self.theme().button_style(self.is_hovered(target));
        buf.set_span(rect.x, rect.y, &Span::styled(label, style), rect.width);
    }

    fn render_trigger(&self, buf: &mut Buffer) -> Rect {
        let theme = self.theme();
        let rect = self.geometry.trigger;
        if rect.is_empty() {
            return rect;
        }
        let hovered = self.is_hovered(&HitTarget::Trigger);
        let mut style = theme.trigger_style(hovered);
        if self.state.is_open() {
            style = style.add_modifier(Modifier::BOLD);
        }
        buf.set_style(rect, style);
        Line::from(Span::styled(self.trigger_icon.to_string(), style))
            .centered()
            .render(rect, buf);

        if hovered {
            self.render_trigger_hint(rect, buf);
        }
        rect
    }

    /// Tooltip beside the trigger, on whichever side has room.
    fn render_trigger_hint(&self, trigger: Rect, buf: &mut Buffer) {
        let verb = if self.state.collapsed { "Show" } else { "Hide" };
        let hint = format!(" {verb} {} toolbar ", self.title.to_lowercase());
        let width = u16::try_from(Span::raw(hint.as_str()).width()).unwrap_or(u16::MAX);
        let area = buf.area;

        let x = if trigger.x >= area.x.saturating_add(width).saturating_add(1) {
            trigger.x - width - 1
        } else if trigger.right().saturating_add(1).saturating_add(width) <= area.right() {
            trigger.right() + 1
        } else {
            return;
        };
        buf.set_span(x, trigger.y, &Span::styled(hint, self.theme().hint_style()), width);
    }
}
