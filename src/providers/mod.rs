//! Collaborator contracts
//!
//! The engine core never talks to a network or a rendering surface
//! directly. Content, geocoding, map, and timeline are trait seams; the
//! concrete transports live outside the crate. [`memory`] provides
//! in-process implementations for tests and the demo CLI.

pub mod memory;

pub use memory::{MemoryContent, MemoryGeocoder};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::ArticleDocument;

/// Errors a collaborator can fail with.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type for collaborator operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// One search result from the content provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
}

/// A geographic coordinate returned by the geocoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Source of searchable, fetchable article content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Search articles in the given language.
    async fn search(&self, query: &str, language: &str) -> ProviderResult<Vec<SearchHit>>;

    /// Fetch one article by title.
    ///
    /// Fails with [`ProviderError::NotFound`] for unknown titles and
    /// [`ProviderError::Transport`] for network failure.
    async fn fetch(&self, title: &str, language: &str) -> ProviderResult<ArticleDocument>;
}

/// Resolves a place name to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up a place by its matched text. `Ok(None)` means the place
    /// is unknown; `Err` means the lookup itself failed.
    async fn lookup(&self, place: &str) -> ProviderResult<Option<GeoPoint>>;
}

/// Map rendering surface — a consumer of lookup results. Requests are
/// in-process and infallible; failure only exists on the network seams.
pub trait MapSurface: Send + Sync {
    fn recenter(&self, lat: f64, lon: f64, zoom: f64);
    fn place_marker(&self, lat: f64, lon: f64, label: &str);
}

/// Timeline indicator — a consumer of year activations.
pub trait Timeline: Send + Sync {
    /// Move the timeline to an ISO date (first day of the chosen year).
    fn set_date(&self, iso_date: &str);
    /// Show the year as it appeared in the text ("1850s", "500 BCE").
    fn set_indicator(&self, text: &str);
}
