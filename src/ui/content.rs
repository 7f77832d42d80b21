//! Building blocks for tab content, drawn in the widget's palette.
//!
//! ```
//! use devbar::ui::content::{info, section, toggle};
//! use devbar::ColorScheme;
//!
//! let scheme = ColorScheme::Dark;
//! let text = section(
//!     Some("Runtime"),
//!     vec![info("fps", 60, scheme), toggle("vsync", true, scheme)],
//!     scheme,
//! );
//! assert_eq!(text.lines.len(), 4);
//! ```

use std::fmt::Display;

use ratatui::text::{Line, Span, Text};

use crate::core::scheme::ColorScheme;
use crate::ui::theme::Theme;

/// A titled group of lines followed by a blank spacer line.
pub fn section(
    title: Option<&str>,
    lines: Vec<Line<'static>>,
    scheme: ColorScheme,
) -> Text<'static> {
    let theme = Theme::new(scheme);
    let mut out = Vec::with_capacity(lines.len() + 2);
    if let Some(title) = title {
        out.push(Line::from(Span::styled(
            title.to_uppercase(),
            theme.section_title_style(),
        )));
    }
    out.extend(lines);
    out.push(Line::raw(""));
    Text::from(out)
}

/// `label: value`
pub fn info(label: &str, value: impl Display, scheme: ColorScheme) -> Line<'static> {
    let theme = Theme::new(scheme);
    Line::from(vec![
        Span::styled(format!("{label}:"), theme.label_style()),
        Span::raw(" "),
        Span::styled(value.to_string(), theme.value_style()),
    ])
}

/// `label  ━●` / `label  ○━` switch indicator.
pub fn toggle(label: &str, checked: bool, scheme: ColorScheme) -> Line<'static> {
    let theme = Theme::new(scheme);
    let knob = if checked { "━●" } else { "○━" };
    Line::from(vec![
        Span::styled(label.to_string(), theme.label_style()),
        Span::raw("  "),
        Span::styled(knob, theme.toggle_style(checked)),
    ])
}

/// Stack several pieces of content vertically.
pub fn stack(parts: impl IntoIterator<Item = Text<'static>>) -> Text<'static> {
    let mut lines = Vec::new();
    for part in parts {
        lines.extend(part.lines);
    }
    Text::from(lines)
}
