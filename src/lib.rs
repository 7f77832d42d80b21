//! A developer toolbar that floats over a ratatui application.
//!
//! The widget is a trigger button in a screen corner that opens a panel of
//! host-supplied tabs.  It can sit in any corner or dock to the bottom edge
//! as a resizable pane, follows a light/dark scheme, and hides itself in
//! production unless told otherwise.
//!
//! Mount a [`DevBar`] from a [`WidgetConfig`], render it after your own
//! widgets and offer it every terminal event first.

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod keymap;
pub mod ui;

pub use crate::app::devbar::DevBar;
pub use crate::config::{Dimension, Position, WidgetConfig, WidgetConfigBuilder};
pub use crate::core::scheme::{ColorScheme, SystemScheme, ThemeMode};
pub use crate::core::Ambient;
pub use crate::error::ConfigError;
pub use crate::keymap::{Action, KeyBind, Keymap};
pub use crate::ui::controls::{ButtonVariant, Control};
pub use crate::ui::tabs::{Tab, TabContent};
