//! URL normalisation and the shell's copy of the current location.
//!
//! `NavigationState` is the only thing the URL field is bound to. It is
//! written by engine location reports, by user submission, and by local file
//! open/save; nothing else touches it.

use url::{ParseError, Url};

pub const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// True when `input` starts with a scheme (`http://x`, `file:///x`,
/// `about:blank`), even if the rest of it is malformed. Bare hosts such as
/// `example.com` have no scheme.
pub fn has_scheme(input: &str) -> bool {
    !matches!(Url::parse(input), Err(ParseError::RelativeUrlWithoutBase))
}

pub fn with_default_scheme(input: &str) -> String {
    if has_scheme(input) {
        input.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{input}")
    }
}

/// What the URL bar submits: `None` for blank input.
pub fn normalize_input(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(with_default_scheme(trimmed))
}

/// Engine-internal locations produced by loading raw content.
fn is_placeholder_location(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "about" | "data"))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NavigationState {
    location: String,
    cursor: usize,
    cursor_reset: bool,
    // set while the field shows a local file path
    showing_path: bool,
}

impl NavigationState {
    pub fn new(initial: &str) -> Self {
        let mut s = Self::default();
        s.set(initial.to_string());
        s
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// The editable field contents.
    pub fn location_mut(&mut self) -> &mut String {
        &mut self.location
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// One-shot: true once after every programmatic update.
    pub fn take_cursor_reset(&mut self) -> bool {
        std::mem::take(&mut self.cursor_reset)
    }

    /// Mirrors a location reported by the engine. Returns the displayed
    /// value, or `None` when the report was a placeholder for raw content
    /// that is already represented by a file path.
    pub fn apply_engine_location(&mut self, url: &str) -> Option<&str> {
        if self.showing_path && is_placeholder_location(url) {
            return None;
        }
        self.showing_path = false;
        self.set(with_default_scheme(url.trim()));
        Some(&self.location)
    }

    /// Submits the field; the field then shows the normalised target.
    pub fn submit(&mut self) -> Option<String> {
        let target = normalize_input(&self.location)?;
        self.showing_path = false;
        self.set(target.clone());
        Some(target)
    }

    pub fn show_path(&mut self, path: &str) {
        self.showing_path = true;
        self.set(path.to_string());
    }

    fn set(&mut self, value: String) {
        self.location = value;
        self.cursor = 0;
        self.cursor_reset = true;
    }
}
