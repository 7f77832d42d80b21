//! Keyboard shortcuts for the widget.
//!
//! The trigger and the panel buttons are mouse targets; these bindings are
//! their keyboard equivalents.  A keymap can be loaded from a small text
//! format, one `action = Key1, Key2` line per action:
//!
//! ```text
//! # devbar keymap
//! toggle_open = F12, Ctrl+d
//! next_tab = Alt+Right
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// Widget actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ToggleOpen,
    ToggleExpand,
    Close,
    NextTab,
    PrevTab,
    ScrollUp,
    ScrollDown,
}

impl Action {
    /// Ordered list of all actions.
    pub const ALL: &[Action] = &[
        Action::ToggleOpen,
        Action::ToggleExpand,
        Action::Close,
        Action::NextTab,
        Action::PrevTab,
        Action::ScrollUp,
        Action::ScrollDown,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Action::ToggleOpen => "Show / Hide",
            Action::ToggleExpand => "Expand / Shrink",
            Action::Close => "Close",
            Action::NextTab => "Next Tab",
            Action::PrevTab => "Prev Tab",
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
        }
    }

    /// Key used in keymap files.
    pub fn config_key(self) -> &'static str {
        match self {
            Action::ToggleOpen => "toggle_open",
            Action::ToggleExpand => "toggle_expand",
            Action::Close => "close",
            Action::NextTab => "next_tab",
            Action::PrevTab => "prev_tab",
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }

    /// Whether the action does anything while the panel is collapsed.
    pub fn live_when_collapsed(self) -> bool {
        matches!(self, Action::ToggleOpen)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
        .union(KeyModifiers::ALT)
        .union(KeyModifiers::SHIFT);

    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self {
            code,
            modifiers: modifiers & Self::MODIFIER_MASK,
        }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT are
    /// compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && self.modifiers == (event.modifiers & Self::MODIFIER_MASK)
    }

    /// User-facing form, e.g. `"Alt+↑"`.
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }
}

/// Keymap-file spelling of a key code.
fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

/// Keymap-file form, e.g. `"Alt+Up"`.
impl fmt::Display for KeyBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.modifier_prefix(), key_name(self.code))
    }
}

/// Error for an unparseable key string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised key `{0}`")]
pub struct KeyParseError(pub String);

impl FromStr for KeyBind {
    type Err = KeyParseError;

    /// Parse `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"F12"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || KeyParseError(s.to_string());
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.trim().split('+').collect();
        let (key_part, modifier_parts) = parts.split_last().ok_or_else(err)?;

        for part in modifier_parts {
            match part.trim().to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(err()),
            }
        }

        let key_part = key_part.trim();
        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => {
                let n: u8 = lower[1..].parse().map_err(|_| err())?;
                KeyCode::F(n)
            }
            _ => {
                // Single characters keep their case.
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(err()),
                }
            }
        };

        Ok(KeyBind::new(code, modifiers))
    }
}

// ───────────────────────────────────────── keymap ────────────

/// Action → bindings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<Action, Vec<KeyBind>>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
        }
    }
}

impl Keymap {
    /// Built-in bindings.  Alt-chords keep clear of the host's own keys.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let alt = KeyModifiers::ALT;
        let mut m = HashMap::new();

        m.insert(ToggleOpen, vec![KeyBind::new(F(12), n)]);
        m.insert(ToggleExpand, vec![KeyBind::new(Char('e'), alt)]);
        m.insert(Close, vec![KeyBind::new(Char('x'), alt)]);
        m.insert(NextTab, vec![KeyBind::new(Right, alt), KeyBind::new(Char('l'), alt)]);
        m.insert(PrevTab, vec![KeyBind::new(Left, alt), KeyBind::new(Char('h'), alt)]);
        m.insert(ScrollUp, vec![KeyBind::new(Up, alt)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, alt)]);

        m
    }

    /// Find the action bound to a key event.  When several bindings match,
    /// the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds.iter().filter(|b| b.matches(event)) {
                let mc = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, best_mc)| mc > best_mc) {
                    best = Some((action, mc));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    /// Add a binding for `action`, removing the key from any other action.
    pub fn bind(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    pub fn bindings(&self, action: Action) -> &[KeyBind] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Bindings for `action` joined for display (e.g. `"Alt+→/Alt+l"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(KeyBind::display).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Parse a keymap file on top of the defaults.  Lines that name an
    /// unknown action or contain no valid key are skipped with a warning.
    pub fn from_config_str(s: &str) -> Self {
        let mut keymap = Self::default();

        for (lineno, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::warn!(line = lineno + 1, "keymap line without `=` skipped");
                continue;
            };
            let Some(action) = Action::from_config_key(key.trim()) else {
                tracing::warn!(line = lineno + 1, action = key.trim(), "unknown keymap action");
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                match part.trim().trim_matches('"').parse::<KeyBind>() {
                    Ok(bind) => parsed.push(bind),
                    Err(e) => tracing::warn!(line = lineno + 1, "{e}"),
                }
            }
            if !parsed.is_empty() {
                keymap.bindings.insert(action, parsed);
            }
        }

        keymap
    }

    /// Serialise to the keymap file format.
    pub fn to_config_string(&self) -> String {
        let mut lines = vec![
            "# devbar keymap".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];
        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(ToString::to_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_modifiers_and_named_keys() {
        let bind: KeyBind = "Ctrl+Alt+Up".parse().unwrap();
        assert_eq!(bind.code, KeyCode::Up);
        assert_eq!(bind.modifiers, KeyModifiers::CONTROL | KeyModifiers::ALT);
        assert_eq!("F12".parse::<KeyBind>().unwrap().code, KeyCode::F(12));
        assert_eq!("Space".parse::<KeyBind>().unwrap().code, KeyCode::Char(' '));
        assert_eq!("D".parse::<KeyBind>().unwrap().code, KeyCode::Char('D'));
    }

    #[test]
    fn rejects_garbage() {
        assert!("Hyper+x".parse::<KeyBind>().is_err());
        assert!("Fx".parse::<KeyBind>().is_err());
        assert!("ab".parse::<KeyBind>().is_err());
        assert!("".parse::<KeyBind>().is_err());
    }

    #[test]
    fn display_and_config_forms() {
        let bind = KeyBind::new(KeyCode::Up, KeyModifiers::ALT);
        assert_eq!(bind.display(), "Alt+↑");
        assert_eq!(bind.to_string(), "Alt+Up");
        assert_eq!(bind.to_string().parse::<KeyBind>().unwrap(), bind);
    }

    #[test]
    fn default_bindings_match() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.match_key(key(KeyCode::F(12), KeyModifiers::NONE)),
            Some(Action::ToggleOpen)
        );
        assert_eq!(
            keymap.match_key(key(KeyCode::Char('l'), KeyModifiers::ALT)),
            Some(Action::NextTab)
        );
        assert_eq!(keymap.match_key(key(KeyCode::Char('l'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn platform_modifiers_are_ignored() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.match_key(key(KeyCode::F(12), KeyModifiers::SUPER)),
            Some(Action::ToggleOpen)
        );
    }

    #[test]
    fn bind_moves_key_between_actions() {
        let mut keymap = Keymap::default();
        let f12 = KeyBind::new(KeyCode::F(12), KeyModifiers::NONE);
        keymap.bind(Action::Close, f12.clone());
        assert!(keymap.bindings(Action::ToggleOpen).is_empty());
        assert_eq!(keymap.bindings(Action::Close).last(), Some(&f12));
        assert_eq!(keymap.display_bindings(Action::ToggleOpen), "unbound");
    }

    #[test]
    fn config_overrides_defaults_and_skips_bad_lines() {
        let keymap = Keymap::from_config_str(
            "# comment\n\
             toggle_open = F2, Ctrl+d\n\
             warp_drive = F9\n\
             close = nonsense\n\
             no equals sign\n",
        );
        assert_eq!(
            keymap.match_key(key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(Action::ToggleOpen)
        );
        assert_eq!(keymap.match_key(key(KeyCode::F(12), KeyModifiers::NONE)), None);
        // invalid keys leave the default in place
        assert_eq!(keymap.display_bindings(Action::Close), "Alt+x");
    }

    #[test]
    fn serialised_keymap_reloads_identically() {
        let mut keymap = Keymap::default();
        keymap.bind(Action::ScrollDown, KeyBind::new(KeyCode::PageDown, KeyModifiers::NONE));
        let reloaded = Keymap::from_config_str(&keymap.to_config_string());
        assert_eq!(reloaded, keymap);
    }
}
