//! Shared helpers for the pipeline and interaction test suites:
//! recording map/timeline sinks, a latency-injecting content provider,
//! and sample article builders.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use chronomap::{
    ArticleDocument, ArticleLoader, Block, ContentProvider, Inline, InteractionController,
    MapSurface, MemoryContent, MemoryGeocoder, ProviderResult, SearchHit, SessionContext,
    Settings, Timeline,
};

pub struct RecordingMap {
    pub recenters: Mutex<Vec<(f64, f64, f64)>>,
    pub markers: Mutex<Vec<(f64, f64, String)>>,
}

impl RecordingMap {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            recenters: Mutex::new(Vec::new()),
            markers: Mutex::new(Vec::new()),
        })
    }
}

impl MapSurface for RecordingMap {
    fn recenter(&self, lat: f64, lon: f64, zoom: f64) {
        self.recenters.lock().unwrap().push((lat, lon, zoom));
    }

    fn place_marker(&self, lat: f64, lon: f64, label: &str) {
        self.markers.lock().unwrap().push((lat, lon, label.to_string()));
    }
}

pub struct RecordingTimeline {
    pub dates: Mutex<Vec<String>>,
    pub indicators: Mutex<Vec<String>>,
}

impl RecordingTimeline {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            dates: Mutex::new(Vec::new()),
            indicators: Mutex::new(Vec::new()),
        })
    }
}

impl Timeline for RecordingTimeline {
    fn set_date(&self, iso_date: &str) {
        self.dates.lock().unwrap().push(iso_date.to_string());
    }

    fn set_indicator(&self, text: &str) {
        self.indicators.lock().unwrap().push(text.to_string());
    }
}

/// Content provider that answers after a fixed delay. Used to overlap
/// in-flight loads deterministically under the paused clock.
pub struct SlowContent {
    inner: MemoryContent,
    delay: Duration,
}

impl SlowContent {
    pub fn new(inner: MemoryContent, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl ContentProvider for SlowContent {
    async fn search(&self, query: &str, language: &str) -> ProviderResult<Vec<SearchHit>> {
        tokio::time::sleep(self.delay).await;
        self.inner.search(query, language).await
    }

    async fn fetch(&self, title: &str, language: &str) -> ProviderResult<ArticleDocument> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch(title, language).await
    }
}

pub fn paris_article() -> ArticleDocument {
    ArticleDocument::new("Paris")
        .with_category("Capitals in Europe")
        .with_paragraph("Visit Paris in the 1920s.")
        .with_block(
            Block::paragraph("Twinned with ")
                .with_inline(Inline::Link {
                    href: "/wiki/Rome".to_string(),
                    text: "Rome".to_string(),
                })
                .with_inline(Inline::Image {
                    src: "//upload.wikimedia.org/tower.jpg".to_string(),
                }),
        )
}

pub fn rome_article() -> ArticleDocument {
    ArticleDocument::new("Rome").with_paragraph("Rome was founded in 753 BC.")
}

pub fn lisbon_article() -> ArticleDocument {
    ArticleDocument::new("Lisbon").with_paragraph("Lisbon was rebuilt after 1755.")
}

pub fn default_content() -> MemoryContent {
    MemoryContent::new()
        .with_article("en", paris_article())
        .with_article("en", rome_article())
        .with_article("en", lisbon_article())
}

pub fn default_geocoder() -> MemoryGeocoder {
    MemoryGeocoder::new()
        .with_place("Paris", 48.8566, 2.3522)
        .with_place("Rome", 41.9028, 12.4964)
        .with_place("Lisbon", 38.7223, -9.1393)
}

pub struct Harness {
    pub loader: Arc<ArticleLoader>,
    pub map: Arc<RecordingMap>,
    pub timeline: Arc<RecordingTimeline>,
}

/// Loader wired to recording sinks over the given provider.
pub fn harness(provider: Arc<dyn ContentProvider>) -> Harness {
    let map = RecordingMap::new();
    let timeline = RecordingTimeline::new();
    let settings = Settings::default();
    let controller = InteractionController::new(
        &settings,
        Arc::new(default_geocoder()),
        map.clone(),
        timeline.clone(),
    );
    let loader = Arc::new(ArticleLoader::new(
        SessionContext::new("en"),
        provider,
        controller,
    ));
    Harness {
        loader,
        map,
        timeline,
    }
}

pub fn default_harness() -> Harness {
    harness(Arc::new(default_content()))
}
