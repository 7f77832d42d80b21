//! Core logic: visibility, scheme resolution, resize bounds and listener
//! bookkeeping.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod listener;
pub mod resize;
pub mod scheme;
pub mod visibility;

use self::scheme::SystemScheme;

/// Signals the widget reads from its surroundings rather than its config.
#[derive(Debug, Clone, Default)]
pub struct Ambient {
    /// Runtime environment name (e.g. `"production"`), if one is known.
    pub runtime_env: Option<String>,
    /// System colour-scheme publisher followed in auto theme mode.
    pub system_scheme: SystemScheme,
}

impl Ambient {
    /// Read the process environment and terminal hints.
    pub fn detect() -> Self {
        Self {
            runtime_env: visibility::runtime_environment_name(),
            system_scheme: SystemScheme::detect(),
        }
    }

    pub fn with_runtime_env(mut self, name: impl Into<String>) -> Self {
        self.runtime_env = Some(name.into());
        self
    }

    pub fn with_system_scheme(mut self, system_scheme: SystemScheme) -> Self {
        self.system_scheme = system_scheme;
        self
    }
}
