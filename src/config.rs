//! Host-supplied widget configuration.
//!
//! Built once with [`WidgetConfig::builder`] and handed to
//! [`DevBar::mount`](crate::DevBar::mount); nothing in it changes while the
//! widget is mounted.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::core::resize::DEFAULT_MIN_PANE_HEIGHT;
use crate::core::scheme::ThemeMode;
use crate::error::ConfigError;
use crate::keymap::Keymap;
use crate::ui::tabs::Tab;

// ───────────────────────────────────────── position ──────────

/// Where the widget lives on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
    /// Docked full-width to the bottom edge with adjustable height.
    Pane,
}

impl Position {
    pub const ALL: &[Position] = &[
        Position::BottomRight,
        Position::BottomLeft,
        Position::TopRight,
        Position::TopLeft,
        Position::Pane,
    ];

    pub fn is_pane(self) -> bool {
        self == Position::Pane
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
            Position::TopRight => "top-right",
            Position::TopLeft => "top-left",
            Position::Pane => "pane",
        }
    }
}

impl FromStr for Position {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Position::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| ConfigError::UnknownPosition(s.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ───────────────────────────────────────── dimension ─────────

/// A length along one viewport axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Absolute number of terminal cells.
    Cells(u16),
    /// Percentage of the viewport axis.
    Percent(u16),
}

impl Dimension {
    /// Resolve against an axis of `axis` cells.
    pub fn resolve(self, axis: u16) -> u16 {
        match self {
            Dimension::Cells(n) => n,
            Dimension::Percent(pct) => {
                let cells = u32::from(axis) * u32::from(pct) / 100;
                u16::try_from(cells).unwrap_or(u16::MAX)
            }
        }
    }
}

impl FromStr for Dimension {
    type Err = ConfigError;

    /// Accepts `"40"`, `"40c"` and `"40%"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ConfigError::InvalidDimension(s.to_string());
        let t = s.trim();
        if let Some(pct) = t.strip_suffix('%') {
            return pct.trim().parse().map(Dimension::Percent).map_err(|_| err());
        }
        let cells = t.strip_suffix('c').unwrap_or(t);
        cells.trim().parse().map(Dimension::Cells).map_err(|_| err())
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Cells(n) => write!(f, "{n}"),
            Dimension::Percent(p) => write!(f, "{p}%"),
        }
    }
}

// ───────────────────────────────────────── config ────────────

/// Everything the host decides about a widget instance.
pub struct WidgetConfig {
    pub tabs: Vec<Tab>,
    pub position: Position,
    /// Tab shown first; defaults to the first tab.
    pub default_tab_id: Option<String>,
    pub theme: ThemeMode,
    /// Hide when the environment is `"production"`.
    pub hide_in_production: bool,
    /// Explicit environment name; takes precedence over the ambient one.
    pub environment: Option<String>,
    pub title: String,
    /// Corner panel width.
    pub width: Dimension,
    /// Corner panel height.
    pub max_height: Dimension,
    /// Initial pane height.
    pub default_pane_height: Dimension,
    pub default_open: bool,
    /// Replaces the default trigger glyph.
    pub trigger_icon: Option<String>,
    /// Smallest height a pane can be dragged to, in rows.
    pub min_pane_height: u16,
    pub keymap: Keymap,
}

impl WidgetConfig {
    pub const DEFAULT_TITLE: &str = "Dev";
    pub const DEFAULT_WIDTH: Dimension = Dimension::Cells(40);
    pub const DEFAULT_MAX_HEIGHT: Dimension = Dimension::Cells(12);
    pub const DEFAULT_PANE_HEIGHT: Dimension = Dimension::Cells(16);

    /// Defaults for everything except the tabs.
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self {
            tabs,
            position: Position::default(),
            default_tab_id: None,
            theme: ThemeMode::default(),
            hide_in_production: true,
            environment: None,
            title: Self::DEFAULT_TITLE.to_string(),
            width: Self::DEFAULT_WIDTH,
            max_height: Self::DEFAULT_MAX_HEIGHT,
            default_pane_height: Self::DEFAULT_PANE_HEIGHT,
            default_open: false,
            trigger_icon: None,
            min_pane_height: DEFAULT_MIN_PANE_HEIGHT,
            keymap: Keymap::default(),
        }
    }

    pub fn builder() -> WidgetConfigBuilder {
        WidgetConfigBuilder {
            config: Self::new(Vec::new()),
        }
    }

    /// Check the invariants a host could break: tab ids must be unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for tab in &self.tabs {
            if !seen.insert(tab.id.as_str()) {
                return Err(ConfigError::DuplicateTabId(tab.id.clone()));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("tabs", &self.tabs.iter().map(|t| t.id.as_str()).collect::<Vec<_>>())
            .field("position", &self.position)
            .field("default_tab_id", &self.default_tab_id)
            .field("theme", &self.theme)
            .field("hide_in_production", &self.hide_in_production)
            .field("environment", &self.environment)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("max_height", &self.max_height)
            .field("default_pane_height", &self.default_pane_height)
            .field("default_open", &self.default_open)
            .finish_non_exhaustive()
    }
}

/// Fluent construction for [`WidgetConfig`].
pub struct WidgetConfigBuilder {
    config: WidgetConfig,
}

impl WidgetConfigBuilder {
    pub fn tab(mut self, tab: Tab) -> Self {
        self.config.tabs.push(tab);
        self
    }

    pub fn tabs(mut self, tabs: impl IntoIterator<Item = Tab>) -> Self {
        self.config.tabs.extend(tabs);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.config.position = position;
        self
    }

    pub fn default_tab(mut self, id: impl Into<String>) -> Self {
        self.config.default_tab_id = Some(id.into());
        self
    }

    pub fn theme(mut self, theme: ThemeMode) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn hide_in_production(mut self, hide: bool) -> Self {
        self.config.hide_in_production = hide;
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.config.environment = Some(environment.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn width(mut self, width: Dimension) -> Self {
        self.config.width = width;
        self
    }

    pub fn max_height(mut self, max_height: Dimension) -> Self {
        self.config.max_height = max_height;
        self
    }

    pub fn default_pane_height(mut self, height: Dimension) -> Self {
        self.config.default_pane_height = height;
        self
    }

    pub fn default_open(mut self, open: bool) -> Self {
        self.config.default_open = open;
        self
    }

    pub fn trigger_icon(mut self, icon: impl Into<String>) -> Self {
        self.config.trigger_icon = Some(icon.into());
        self
    }

    pub fn min_pane_height(mut self, rows: u16) -> Self {
        self.config.min_pane_height = rows;
        self
    }

    pub fn keymap(mut self, keymap: Keymap) -> Self {
        self.config.keymap = keymap;
        self
    }

    pub fn build(self) -> Result<WidgetConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_round_trips_through_its_name() {
        for &p in Position::ALL {
            assert_eq!(p.as_str().parse::<Position>().unwrap(), p);
        }
        assert_eq!("Top_Left".parse::<Position>().unwrap(), Position::TopLeft);
        assert_eq!(
            "middle".parse::<Position>(),
            Err(ConfigError::UnknownPosition("middle".into()))
        );
    }

    #[test]
    fn dimension_forms() {
        assert_eq!("40".parse::<Dimension>().unwrap(), Dimension::Cells(40));
        assert_eq!("40c".parse::<Dimension>().unwrap(), Dimension::Cells(40));
        assert_eq!(" 30% ".parse::<Dimension>().unwrap(), Dimension::Percent(30));
        assert!("280px".parse::<Dimension>().is_err());
        assert!("%".parse::<Dimension>().is_err());
        assert!("-3".parse::<Dimension>().is_err());
    }

    #[test]
    fn dimension_resolves_against_axis() {
        assert_eq!(Dimension::Cells(40).resolve(10), 40);
        assert_eq!(Dimension::Percent(50).resolve(81), 40);
        assert_eq!(Dimension::Percent(100).resolve(0), 0);
    }

    #[test]
    fn defaults() {
        let config = WidgetConfig::builder().build().unwrap();
        assert_eq!(config.position, Position::BottomRight);
        assert_eq!(config.theme, ThemeMode::Auto);
        assert!(config.hide_in_production);
        assert!(!config.default_open);
        assert_eq!(config.title, "Dev");
        assert_eq!(config.width, Dimension::Cells(40));
        assert_eq!(config.min_pane_height, DEFAULT_MIN_PANE_HEIGHT);
    }

    #[test]
    fn duplicate_tab_ids_are_rejected() {
        let result = WidgetConfig::builder()
            .tab(Tab::new("metrics", "Metrics", "a"))
            .tab(Tab::new("state", "State", "b"))
            .tab(Tab::new("metrics", "Metrics again", "c"))
            .build();
        assert_eq!(
            result.err(),
            Some(ConfigError::DuplicateTabId("metrics".into()))
        );
    }
}
