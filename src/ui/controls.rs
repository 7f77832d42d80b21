//! Clickable controls drawn under a tab's content.
//!
//! A tab can carry buttons and toggles alongside its text.  The widget draws
//! them one per row at the bottom of the content area and calls back into
//! the host when one is clicked.  Toggles are controlled: the host owns the
//! checked state and the widget only reads it.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use devbar::ui::controls::{ButtonVariant, Control};
//!
//! let resets = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&resets);
//! let mut reset = Control::button("reset", "Reset", move || counter.set(counter.get() + 1))
//!     .variant(ButtonVariant::Danger);
//! reset.activate();
//! assert_eq!(resets.get(), 1);
//! ```

use std::fmt;

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::core::scheme::ColorScheme;
use crate::ui::content;
use crate::ui::theme::Theme;

/// Colour role of a button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Default,
    Success,
    Warning,
    Danger,
    Primary,
}

enum ControlKind {
    Button {
        variant: ButtonVariant,
        on_click: Box<dyn FnMut()>,
    },
    Toggle {
        checked: Box<dyn Fn() -> bool>,
        on_change: Box<dyn FnMut(bool)>,
    },
}

/// A button or toggle inside a tab.
pub struct Control {
    pub id: String,
    pub label: String,
    kind: ControlKind,
}

impl Control {
    pub fn button(id: impl Into<String>, label: impl Into<String>, on_click: impl FnMut() + 'static) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ControlKind::Button {
                variant: ButtonVariant::Default,
                on_click: Box::new(on_click),
            },
        }
    }

    /// `checked` is read on every draw; `on_change` receives the flipped
    /// value when the toggle is clicked.
    pub fn toggle(
        id: impl Into<String>,
        label: impl Into<String>,
        checked: impl Fn() -> bool + 'static,
        on_change: impl FnMut(bool) + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ControlKind::Toggle {
                checked: Box::new(checked),
                on_change: Box::new(on_change),
            },
        }
    }

    /// Set the colour role.  Ignored for toggles.
    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        if let ControlKind::Button { variant: v, .. } = &mut self.kind {
            *v = variant;
        }
        self
    }

    pub fn is_checked(&self) -> Option<bool> {
        match &self.kind {
            ControlKind::Button { .. } => None,
            ControlKind::Toggle { checked, .. } => Some(checked()),
        }
    }

    /// Run the control's callback, as a click would.
    pub fn activate(&mut self) {
        match &mut self.kind {
            ControlKind::Button { on_click, .. } => on_click(),
            ControlKind::Toggle { checked, on_change } => {
                let next = !checked();
                tracing::debug!(id = %self.id, checked = next, "toggle changed");
                on_change(next);
            }
        }
    }

    pub fn line(&self, scheme: ColorScheme, hovered: bool) -> Line<'static> {
        match &self.kind {
            ControlKind::Button { variant, .. } => Line::from(Span::styled(
                format!("[ {} ]", self.label),
                Theme::new(scheme).control_style(*variant, hovered),
            )),
            ControlKind::Toggle { checked, .. } => {
                let line = content::toggle(&self.label, checked(), scheme);
                if hovered {
                    line.patch_style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    line
                }
            }
        }
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            ControlKind::Button { variant, .. } => format!("Button({variant:?})"),
            ControlKind::Toggle { .. } => "Toggle".to_string(),
        };
        f.debug_struct("Control")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("kind", &kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn toggle_passes_the_flipped_value() {
        let on = Rc::new(Cell::new(false));
        let (read, write) = (Rc::clone(&on), Rc::clone(&on));
        let mut toggle = Control::toggle("vsync", "vsync", move || read.get(), move |v| write.set(v));

        assert_eq!(toggle.is_checked(), Some(false));
        toggle.activate();
        assert!(on.get());
        assert_eq!(plain(&toggle.line(ColorScheme::Dark, false)), "vsync  ━●");
        toggle.activate();
        assert!(!on.get());
    }

    #[test]
    fn button_label_and_variant() {
        let button = Control::button("clear", "Clear", || {}).variant(ButtonVariant::Warning);
        assert_eq!(button.is_checked(), None);
        let line = button.line(ColorScheme::Light, false);
        assert_eq!(plain(&line), "[ Clear ]");
        let theme = Theme::new(ColorScheme::Light);
        assert_eq!(line.spans[0].style, theme.control_style(ButtonVariant::Warning, false));
        assert_ne!(
            theme.control_style(ButtonVariant::Warning, false),
            theme.control_style(ButtonVariant::Default, false)
        );
    }

    #[test]
    fn variant_is_ignored_on_toggles() {
        let toggle = Control::toggle("t", "t", || true, |_| {}).variant(ButtonVariant::Danger);
        assert_eq!(format!("{toggle:?}"), r#"Control { id: "t", label: "t", kind: "Toggle" }"#);
    }
}
