//! Keyboard shortcuts
//!
//! The primary modifier is Ctrl or Meta (Cmd on macOS).
//! - primary + Enter: classify the current form
//! - primary + Shift + L: load sample data

use std::str::FromStr;

use crate::error::ClassifierError;

/// A key press as reported by the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Parses chords such as `ctrl+enter` or `Cmd+Shift+L`.
impl FromStr for KeyEvent {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut event = KeyEvent::default();
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let Some((key, modifiers)) = parts.split_last() else {
            return Err(ClassifierError::Validation(format!("Empty key chord: '{}'", s)));
        };

        for modifier in modifiers {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => event.ctrl = true,
                "meta" | "cmd" | "super" => event.meta = true,
                "shift" => event.shift = true,
                other => {
                    return Err(ClassifierError::Validation(format!("Unknown modifier '{}' in '{}'", other, s)));
                }
            }
        }

        if key.is_empty() {
            return Err(ClassifierError::Validation(format!("Missing key in '{}'", s)));
        }
        event.key = if key.eq_ignore_ascii_case("enter") { "Enter".to_string() } else { key.to_string() };
        Ok(event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Predict,
    LoadSample,
}

impl Shortcut {
    pub const ALL: [Shortcut; 2] = [Shortcut::Predict, Shortcut::LoadSample];

    pub fn resolve(event: &KeyEvent) -> Option<Self> {
        if !event.primary() {
            return None;
        }
        if event.key == "Enter" {
            return Some(Shortcut::Predict);
        }
        if event.shift && event.key.eq_ignore_ascii_case("l") {
            return Some(Shortcut::LoadSample);
        }
        None
    }

    /// Human-readable chord
    pub fn label(self) -> &'static str {
        match self {
            Shortcut::Predict => "Ctrl+Enter",
            Shortcut::LoadSample => "Ctrl+Shift+L",
        }
    }

    /// htmx trigger expression that fires on this chord anywhere in the page
    pub fn hx_trigger(self) -> &'static str {
        match self {
            Shortcut::Predict => "keydown[(ctrlKey||metaKey)&&key=='Enter'] from:body",
            Shortcut::LoadSample => "keydown[(ctrlKey||metaKey)&&shiftKey&&(key=='L'||key=='l')] from:body",
        }
    }
}
