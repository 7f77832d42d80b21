//! Configuration errors.

use thiserror::Error;

/// Everything that can be wrong with a [`WidgetConfig`](crate::WidgetConfig)
/// or one of its string-typed fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid dimension `{0}` (expected cells like `40` / `40c` or a percentage like `30%`)")]
    InvalidDimension(String),

    #[error("unknown position `{0}` (expected bottom-right, bottom-left, top-right, top-left or pane)")]
    UnknownPosition(String),

    #[error("unknown theme `{0}` (expected light, dark or auto)")]
    UnknownThemeMode(String),

    #[error("duplicate tab id `{0}`")]
    DuplicateTabId(String),
}
