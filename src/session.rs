//! Session context — explicit replacement for ambient globals
//!
//! The current language, content domain, and interaction settings live in
//! one value handed to the loader and controller at construction. A
//! session is created when a language is selected and reset when it
//! changes.

use serde::{Deserialize, Serialize};

/// Default hover debounce delay.
pub const DEFAULT_HOVER_DELAY_MS: u64 = 1000;
/// Default content domain articles and images are resolved against.
pub const DEFAULT_CONTENT_DOMAIN: &str = "wikipedia.org";

/// User-adjustable interaction settings, read at binding time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Hover dwell time before a lookup fires.
    pub hover_delay_ms: u64,
    /// Whether a successful geocode also drops a map marker.
    pub markers_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hover_delay_ms: DEFAULT_HOVER_DELAY_MS,
            markers_enabled: true,
        }
    }
}

/// Per-language session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Active content language code, e.g. "en".
    pub language: String,
    /// Domain that relative article and image references resolve under.
    pub content_domain: String,
    pub settings: Settings,
}

impl SessionContext {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            content_domain: DEFAULT_CONTENT_DOMAIN.to_string(),
            settings: Settings::default(),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_content_domain(mut self, domain: impl Into<String>) -> Self {
        self.content_domain = domain.into();
        self
    }
}
