//! Colour palette and text styles used across the widget.

use ratatui::style::{Color, Modifier, Style};

use crate::core::scheme::ColorScheme;
use crate::ui::controls::ButtonVariant;

/// Styles for one resolved scheme.  Change colours here and they propagate
/// everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    scheme: ColorScheme,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl Theme {
    pub fn new(scheme: ColorScheme) -> Self {
        Self { scheme }
    }

    fn pick(self, light: Color, dark: Color) -> Color {
        match self.scheme {
            ColorScheme::Light => light,
            ColorScheme::Dark => dark,
        }
    }

    // ── palette ────────────────────────────────────────────────
    pub fn panel_bg(self) -> Color {
        self.pick(rgb(0xffffff), rgb(0x1a1a1a))
    }

    pub fn text(self) -> Color {
        self.pick(rgb(0x111827), rgb(0xffffff))
    }

    pub fn muted(self) -> Color {
        self.pick(rgb(0x6b7280), rgb(0x9ca3af))
    }

    pub fn accent(self) -> Color {
        self.pick(rgb(0x3b82f6), rgb(0x60a5fa))
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn panel_style(self) -> Style {
        Style::default().bg(self.panel_bg()).fg(self.text())
    }

    pub fn border_style(self) -> Style {
        Style::default()
            .bg(self.panel_bg())
            .fg(self.pick(rgb(0xe5e7eb), rgb(0x374151)))
    }

    pub fn title_style(self) -> Style {
        Style::default()
            .bg(self.panel_bg())
            .fg(self.pick(rgb(0x374151), rgb(0xe5e7eb)))
            .add_modifier(Modifier::BOLD)
    }

    /// Header buttons (`[+]`, `[x]`).
    pub fn button_style(self, hovered: bool) -> Style {
        let base = Style::default().bg(self.panel_bg());
        if hovered {
            base.fg(self.pick(rgb(0x374151), rgb(0xe5e7eb)))
                .add_modifier(Modifier::BOLD)
        } else {
            base.fg(self.pick(rgb(0x9ca3af), rgb(0x6b7280)))
        }
    }

    /// Top border of a pane while it is hovered or being dragged.
    pub fn resize_handle_style(self, active: bool) -> Style {
        if active {
            self.border_style().fg(self.accent())
        } else {
            self.border_style()
        }
    }

    pub fn tab_style(self, active: bool, hovered: bool) -> Style {
        if active {
            Style::default()
                .bg(self.pick(rgb(0xf9fafb), rgb(0x1f2937)))
                .fg(self.text())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if hovered {
            Style::default()
                .bg(self.pick(rgb(0xf3f4f6), rgb(0x374151)))
                .fg(self.text())
        } else {
            Style::default().bg(self.panel_bg()).fg(self.muted())
        }
    }

    pub fn trigger_style(self, hovered: bool) -> Style {
        let style = Style::default()
            .bg(self.pick(rgb(0xffffff), rgb(0x0a0a0a)))
            .fg(self.pick(rgb(0x374151), rgb(0xd1d5db)));
        if hovered {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }

    pub fn hint_style(self) -> Style {
        Style::default()
            .bg(self.pick(rgb(0x111827), rgb(0xe5e7eb)))
            .fg(self.pick(rgb(0xffffff), rgb(0x111827)))
    }

    // ── content helpers ────────────────────────────────────────
    pub fn section_title_style(self) -> Style {
        Style::default().fg(self.muted()).add_modifier(Modifier::BOLD)
    }

    pub fn label_style(self) -> Style {
        Style::default().fg(self.muted())
    }

    pub fn value_style(self) -> Style {
        Style::default().fg(self.pick(rgb(0x374151), rgb(0xe5e7eb)))
    }

    /// In-tab buttons.  Hover inverts the colours.
    pub fn control_style(self, variant: ButtonVariant, hovered: bool) -> Style {
        let fg = match variant {
            ButtonVariant::Default => self.pick(rgb(0x374151), rgb(0xe5e7eb)),
            ButtonVariant::Success => self.pick(rgb(0x059669), rgb(0x34d399)),
            ButtonVariant::Warning => self.pick(rgb(0xd97706), rgb(0xfbbf24)),
            ButtonVariant::Danger => self.pick(rgb(0xdc2626), rgb(0xf87171)),
            ButtonVariant::Primary => self.accent(),
        };
        let style = Style::default().fg(fg).add_modifier(Modifier::BOLD);
        if hovered {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    pub fn toggle_style(self, checked: bool) -> Style {
        if checked {
            Style::default().fg(rgb(0x3b82f6)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(rgb(0x4b5563))
        }
    }
}
