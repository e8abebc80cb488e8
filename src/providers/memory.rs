//! In-memory collaborator implementations
//!
//! Deterministic stand-ins for the network providers, used by the demo
//! CLI and throughout the test suites.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::document::{ArticleDocument, Inline};

use super::{ContentProvider, GeoPoint, Geocoder, ProviderError, ProviderResult, SearchHit};

/// Content provider backed by a map of `(language, title)` to documents.
#[derive(Debug, Default)]
pub struct MemoryContent {
    articles: HashMap<(String, String), ArticleDocument>,
}

impl MemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_article(mut self, language: impl Into<String>, document: ArticleDocument) -> Self {
        self.articles
            .insert((language.into(), document.title.clone()), document);
        self
    }

    fn first_text(document: &ArticleDocument) -> &str {
        document
            .blocks
            .iter()
            .flat_map(|b| &b.inlines)
            .find_map(|inline| match inline {
                Inline::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or("")
    }
}

#[async_trait]
impl ContentProvider for MemoryContent {
    async fn search(&self, query: &str, language: &str) -> ProviderResult<Vec<SearchHit>> {
        let needle = query.to_lowercase();
        let mut hits: Vec<SearchHit> = self
            .articles
            .iter()
            .filter(|((lang, title), _)| {
                lang == language && title.to_lowercase().contains(&needle)
            })
            .map(|((_, title), document)| SearchHit {
                title: title.clone(),
                snippet: Self::first_text(document).to_string(),
            })
            .collect();
        hits.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(hits)
    }

    async fn fetch(&self, title: &str, language: &str) -> ProviderResult<ArticleDocument> {
        self.articles
            .get(&(language.to_string(), title.to_string()))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(title.to_string()))
    }
}

/// Geocoder backed by a fixed place table. Can be flipped into a failing
/// mode to exercise transport-error paths.
#[derive(Debug, Default)]
pub struct MemoryGeocoder {
    places: HashMap<String, GeoPoint>,
    failing: bool,
}

impl MemoryGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        self.places.insert(name.into(), GeoPoint { lat, lon });
        self
    }

    /// A geocoder whose every lookup fails with a transport error.
    pub fn failing() -> Self {
        Self {
            places: HashMap::new(),
            failing: true,
        }
    }
}

#[async_trait]
impl Geocoder for MemoryGeocoder {
    async fn lookup(&self, place: &str) -> ProviderResult<Option<GeoPoint>> {
        if self.failing {
            return Err(ProviderError::Transport("geocoder unreachable".to_string()));
        }
        Ok(self.places.get(place).copied())
    }
}
