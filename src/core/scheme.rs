//! Light/dark scheme resolution.
//!
//! A widget either pins its scheme (`ThemeMode::Light` / `ThemeMode::Dark`)
//! or follows the system preference (`ThemeMode::Auto`).  The system
//! preference is published through a [`SystemScheme`] handle backed by a
//! `tokio::sync::watch` channel; following it means holding a receiver.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::watch;

use super::listener::{ListenerGuard, ListenerKind, ListenerRegistry};
use crate::error::ConfigError;

/// Effective colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl ColorScheme {
    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        })
    }
}

/// Configured theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemeMode {
    /// The pinned scheme, or `None` for `Auto`.
    pub fn explicit(self) -> Option<ColorScheme> {
        match self {
            ThemeMode::Light => Some(ColorScheme::Light),
            ThemeMode::Dark => Some(ColorScheme::Dark),
            ThemeMode::Auto => None,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "auto" | "system" => Ok(ThemeMode::Auto),
            _ => Err(ConfigError::UnknownThemeMode(s.to_string())),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        })
    }
}

/// Interpret a `COLORFGBG` value (`"fg;bg"`, ANSI indices).
///
/// Background 7 or 15 means a light terminal; everything else, including a
/// missing or malformed value, is treated as dark.
pub fn parse_colorfgbg(value: Option<&str>) -> ColorScheme {
    let bg = value
        .and_then(|v| v.split(';').next_back())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(7) | Some(15) => ColorScheme::Light,
        _ => ColorScheme::Dark,
    }
}

/// Publisher of the system colour-scheme preference.
///
/// Cheap to clone; all clones publish to the same subscribers.
#[derive(Debug, Clone)]
pub struct SystemScheme {
    tx: Arc<watch::Sender<ColorScheme>>,
}

impl SystemScheme {
    pub fn new(initial: ColorScheme) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Seed from the terminal's `COLORFGBG` hint.
    pub fn detect() -> Self {
        let scheme = parse_colorfgbg(std::env::var("COLORFGBG").ok().as_deref());
        tracing::debug!(?scheme, "detected system colour scheme");
        Self::new(scheme)
    }

    pub fn current(&self) -> ColorScheme {
        *self.tx.borrow()
    }

    /// Publish a new preference.  Subscribers are only notified when the
    /// value actually changes.
    pub fn set(&self, scheme: ColorScheme) {
        self.tx.send_if_modified(|current| {
            if *current == scheme {
                false
            } else {
                *current = scheme;
                true
            }
        });
    }

    pub fn subscribe(&self) -> SchemeSubscription {
        SchemeSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SystemScheme {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

/// A live subscription to [`SystemScheme`] changes.
#[derive(Debug)]
pub struct SchemeSubscription {
    rx: watch::Receiver<ColorScheme>,
}

impl SchemeSubscription {
    /// Read the current preference and mark it seen.
    pub fn current(&mut self) -> ColorScheme {
        *self.rx.borrow_and_update()
    }

    /// The new preference if one was published since the last read.
    pub fn poll_change(&mut self) -> Option<ColorScheme> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }

    /// Wait for the next change.  `None` once every publisher is gone.
    pub async fn changed(&mut self) -> Option<ColorScheme> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

/// Tracks the theme mode and, in `Auto`, holds the subscription.
#[derive(Debug)]
pub struct ThemeResolver {
    mode: ThemeMode,
    subscription: Option<(SchemeSubscription, ListenerGuard)>,
}

impl ThemeResolver {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            subscription: None,
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Scheme known without waiting for an effect pass.
    pub fn seed(&self) -> Option<ColorScheme> {
        self.mode.explicit()
    }

    /// Switch mode.  Leaving `Auto` releases the subscription immediately.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        if self.mode == mode {
            return;
        }
        tracing::debug!(from = %self.mode, to = %mode, "theme mode changed");
        self.mode = mode;
        if mode != ThemeMode::Auto {
            self.subscription = None;
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Reconcile the subscription with the mode and return the scheme to
    /// apply, if it should change.
    ///
    /// In `Auto` the first call subscribes and reads the preference once;
    /// later calls report published changes.
    pub fn sync(
        &mut self,
        system: &SystemScheme,
        listeners: &ListenerRegistry,
    ) -> Option<ColorScheme> {
        if let Some(scheme) = self.mode.explicit() {
            self.subscription = None;
            return Some(scheme);
        }
        match self.subscription.as_mut() {
            Some((sub, _)) => sub.poll_change(),
            None => {
                let mut sub = system.subscribe();
                let scheme = sub.current();
                let guard = listeners.attach(ListenerKind::SchemeChange);
                self.subscription = Some((sub, guard));
                Some(scheme)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn colorfgbg_light_backgrounds() {
        assert_eq!(parse_colorfgbg(Some("0;15")), ColorScheme::Light);
        assert_eq!(parse_colorfgbg(Some("0;7")), ColorScheme::Light);
        assert_eq!(parse_colorfgbg(Some("0;default;15")), ColorScheme::Light);
    }

    #[test]
    fn colorfgbg_defaults_to_dark() {
        assert_eq!(parse_colorfgbg(Some("15;0")), ColorScheme::Dark);
        assert_eq!(parse_colorfgbg(Some("")), ColorScheme::Dark);
        assert_eq!(parse_colorfgbg(Some("abc")), ColorScheme::Dark);
        assert_eq!(parse_colorfgbg(None), ColorScheme::Dark);
    }

    #[test]
    fn theme_mode_parses() {
        assert_eq!("Dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!("system".parse::<ThemeMode>().unwrap(), ThemeMode::Auto);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn explicit_mode_never_subscribes() {
        let system = SystemScheme::new(ColorScheme::Light);
        let listeners = ListenerRegistry::new();
        let mut resolver = ThemeResolver::new(ThemeMode::Dark);
        assert_eq!(resolver.seed(), Some(ColorScheme::Dark));
        assert_eq!(resolver.sync(&system, &listeners), Some(ColorScheme::Dark));
        assert!(!resolver.is_subscribed());
        assert_eq!(system.subscriber_count(), 0);
        assert_eq!(listeners.total(), 0);
    }

    #[test]
    fn auto_reads_current_preference_on_first_sync() {
        let system = SystemScheme::new(ColorScheme::Light);
        let listeners = ListenerRegistry::new();
        let mut resolver = ThemeResolver::new(ThemeMode::Auto);
        assert_eq!(resolver.seed(), None);
        assert_eq!(resolver.sync(&system, &listeners), Some(ColorScheme::Light));
        assert_eq!(system.subscriber_count(), 1);
        assert!(listeners.is_attached(ListenerKind::SchemeChange));
        // nothing published since
        assert_eq!(resolver.sync(&system, &listeners), None);
    }

    #[test]
    fn auto_follows_published_changes() {
        let system = SystemScheme::new(ColorScheme::Dark);
        let listeners = ListenerRegistry::new();
        let mut resolver = ThemeResolver::new(ThemeMode::Auto);
        resolver.sync(&system, &listeners);

        system.set(ColorScheme::Light);
        assert_eq!(resolver.sync(&system, &listeners), Some(ColorScheme::Light));
        system.set(ColorScheme::Light);
        assert_eq!(resolver.sync(&system, &listeners), None);
        system.set(ColorScheme::Dark);
        assert_eq!(resolver.sync(&system, &listeners), Some(ColorScheme::Dark));
    }

    #[test]
    fn leaving_auto_releases_subscription() {
        let system = SystemScheme::new(ColorScheme::Dark);
        let listeners = ListenerRegistry::new();
        let mut resolver = ThemeResolver::new(ThemeMode::Auto);
        resolver.sync(&system, &listeners);
        assert_eq!(system.subscriber_count(), 1);

        resolver.set_mode(ThemeMode::Light);
        assert_eq!(system.subscriber_count(), 0);
        assert_eq!(listeners.total(), 0);
        assert_eq!(resolver.sync(&system, &listeners), Some(ColorScheme::Light));
    }

    #[test]
    fn dropping_resolver_releases_subscription() {
        let system = SystemScheme::new(ColorScheme::Dark);
        let listeners = ListenerRegistry::new();
        let mut resolver = ThemeResolver::new(ThemeMode::Auto);
        resolver.sync(&system, &listeners);
        drop(resolver);
        assert_eq!(system.subscriber_count(), 0);
        assert_eq!(listeners.total(), 0);
    }

    #[tokio::test]
    async fn subscription_wakes_on_change() {
        let system = SystemScheme::new(ColorScheme::Dark);
        let mut sub = system.subscribe();
        let publisher = system.clone();
        tokio::spawn(async move {
            publisher.set(ColorScheme::Light);
        });
        assert_eq!(sub.changed().await, Some(ColorScheme::Light));
    }

    proptest! {
        #[test]
        fn auto_tracks_any_toggle_sequence(toggles in proptest::collection::vec(any::<bool>(), 0..40)) {
            let system = SystemScheme::new(ColorScheme::Dark);
            let listeners = ListenerRegistry::new();
            let mut resolver = ThemeResolver::new(ThemeMode::Auto);
            let mut resolved = resolver.sync(&system, &listeners).unwrap_or_default();
            prop_assert_eq!(resolved, system.current());

            for dark in toggles {
                system.set(if dark { ColorScheme::Dark } else { ColorScheme::Light });
                if let Some(next) = resolver.sync(&system, &listeners) {
                    resolved = next;
                }
                prop_assert_eq!(resolved, system.current());
            }
        }
    }
}
