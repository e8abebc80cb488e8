//! InteractionController — hover/click behavior over annotation elements
//!
//! Binds debounced hover and immediate click/keyboard activation to
//! rendered annotation elements, driving the geocoding, map, and
//! timeline collaborators. Collaborator failures never escape the
//! controller; they surface only as the `Error` feedback state.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::annotate::ContentNode;
use crate::document::AnnotatedElement;
use crate::providers::{Geocoder, MapSurface, Timeline};
use crate::session::Settings;

use super::schedule::ScheduledTask;
use super::state::{BoundElement, ElementId, Feedback};

/// How long `Found`/`NotFound`/`Error` stay visible before reverting.
pub const FEEDBACK_REVERT_MS: u64 = 2000;
/// Zoom level applied when the map recenters on a geocoded place.
pub const PLACE_ZOOM: f64 = 8.0;

enum Activation {
    Place(String),
    Year,
}

/// Cheap-clone handle over the shared controller state.
#[derive(Clone)]
pub struct InteractionController {
    inner: Arc<Inner>,
}

struct Inner {
    hover_delay: Duration,
    markers_enabled: bool,
    geocoder: Arc<dyn Geocoder>,
    map: Arc<dyn MapSurface>,
    timeline: Arc<dyn Timeline>,
    elements: DashMap<ElementId, BoundElement>,
}

impl InteractionController {
    /// Settings are read once, at construction — the binding-time
    /// snapshot the session hands out.
    pub fn new(
        settings: &Settings,
        geocoder: Arc<dyn Geocoder>,
        map: Arc<dyn MapSurface>,
        timeline: Arc<dyn Timeline>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                hover_delay: Duration::from_millis(settings.hover_delay_ms),
                markers_enabled: settings.markers_enabled,
                geocoder,
                map,
                timeline,
                elements: DashMap::new(),
            }),
        }
    }

    /// Register rendered annotation elements. Idempotent per element:
    /// an id that is already bound is left untouched.
    pub fn bind(&self, elements: &[AnnotatedElement]) {
        for element in elements {
            if self.inner.elements.contains_key(&element.id) {
                continue;
            }
            self.inner
                .elements
                .insert(element.id, BoundElement::new(element.node.clone()));
        }
        tracing::debug!(bound = self.inner.elements.len(), "annotation elements bound");
    }

    /// Cancel every pending timer and drop all bindings. Called when the
    /// rendered content is replaced.
    pub fn teardown(&self) {
        for mut entry in self.inner.elements.iter_mut() {
            entry.cancel_timers();
        }
        self.inner.elements.clear();
    }

    // === Event entry points ==============================================

    /// Pointer entered an element: start its debounce timer. A hover
    /// that begins while a timer is already pending does not reset it —
    /// each element owns at most one live timer.
    pub fn pointer_enter(&self, id: ElementId) {
        let Some(mut entry) = self.inner.elements.get_mut(&id) else {
            return;
        };
        if entry.debounce.as_ref().map(ScheduledTask::is_pending).unwrap_or(false) {
            return;
        }
        let controller = self.clone();
        entry.debounce = Some(ScheduledTask::spawn(self.inner.hover_delay, async move {
            controller.hover_fired(id).await;
        }));
    }

    /// Pointer left an element: cancel its pending debounce, clear a
    /// year element's hover highlight.
    pub fn pointer_leave(&self, id: ElementId) {
        let Some(mut entry) = self.inner.elements.get_mut(&id) else {
            return;
        };
        if let Some(task) = entry.debounce.take() {
            task.cancel();
        }
        if matches!(entry.node, ContentNode::Year(_)) {
            entry.active = false;
        }
    }

    /// Click: trigger immediately, bypassing the debounce. A clicked
    /// year element becomes the single active one.
    pub async fn activate(&self, id: ElementId) {
        let activation = {
            let Some(entry) = self.inner.elements.get(&id) else {
                return;
            };
            match &entry.node {
                ContentNode::Place(span) => Activation::Place(span.text.clone()),
                ContentNode::Year(_) => Activation::Year,
                ContentNode::Text(_) => return,
            }
        };
        match activation {
            Activation::Place(query) => self.lookup_place(query).await,
            Activation::Year => self.trigger_year(id, true),
        }
    }

    /// Keyboard activation: Enter and Space behave like a click.
    pub async fn key_activate(&self, id: ElementId, key: &str) {
        if matches!(key, "Enter" | " ") {
            self.activate(id).await;
        }
    }

    // === Accessors =======================================================

    pub fn is_bound(&self, id: ElementId) -> bool {
        self.inner.elements.contains_key(&id)
    }

    pub fn bound_count(&self) -> usize {
        self.inner.elements.len()
    }

    pub fn feedback(&self, id: ElementId) -> Option<Feedback> {
        self.inner.elements.get(&id).map(|e| e.feedback)
    }

    pub fn is_active(&self, id: ElementId) -> bool {
        self.inner
            .elements
            .get(&id)
            .map(|e| e.active)
            .unwrap_or(false)
    }

    // === Internals =======================================================

    /// Debounce expiry: same effect as a click, except a hovered year
    /// highlights without stealing other elements' active state.
    async fn hover_fired(&self, id: ElementId) {
        let activation = {
            let Some(entry) = self.inner.elements.get(&id) else {
                return;
            };
            match &entry.node {
                ContentNode::Place(span) => Activation::Place(span.text.clone()),
                ContentNode::Year(_) => Activation::Year,
                ContentNode::Text(_) => return,
            }
        };
        match activation {
            Activation::Place(query) => self.lookup_place(query).await,
            Activation::Year => self.trigger_year(id, false),
        }
    }

    /// Run one geocode lookup for `query`, reflecting progress on every
    /// bound element sharing that place text.
    async fn lookup_place(&self, query: String) {
        self.apply_feedback(&query, Feedback::Searching);
        let feedback = match self.inner.geocoder.lookup(&query).await {
            Ok(Some(point)) => {
                self.inner.map.recenter(point.lat, point.lon, PLACE_ZOOM);
                if self.inner.markers_enabled {
                    self.inner.map.place_marker(point.lat, point.lon, &query);
                }
                Feedback::Found
            }
            Ok(None) => Feedback::NotFound,
            Err(error) => {
                tracing::warn!(%query, %error, "geocode lookup failed");
                Feedback::Error
            }
        };
        self.apply_feedback(&query, feedback);
    }

    /// Set feedback on every place element matching `query`; terminal
    /// states schedule their own revert to idle.
    fn apply_feedback(&self, query: &str, feedback: Feedback) {
        for mut entry in self.inner.elements.iter_mut() {
            let is_match = matches!(&entry.node, ContentNode::Place(span) if span.text == query);
            if !is_match {
                continue;
            }
            entry.feedback = feedback;
            if let Some(task) = entry.revert.take() {
                task.cancel();
            }
            if feedback.is_terminal() {
                let controller = self.clone();
                let id = *entry.key();
                entry.revert = Some(ScheduledTask::spawn(
                    Duration::from_millis(FEEDBACK_REVERT_MS),
                    async move {
                        controller.clear_feedback(id);
                    },
                ));
            }
        }
    }

    fn clear_feedback(&self, id: ElementId) {
        if let Some(mut entry) = self.inner.elements.get_mut(&id) {
            entry.feedback = Feedback::Idle;
            entry.revert = None;
        }
    }

    /// Move the timeline to the element's year. `exclusive` enforces the
    /// single-active-year invariant of a click.
    fn trigger_year(&self, id: ElementId, exclusive: bool) {
        if exclusive {
            for mut entry in self.inner.elements.iter_mut() {
                if *entry.key() != id && matches!(entry.node, ContentNode::Year(_)) {
                    entry.active = false;
                }
            }
        }
        let target = {
            let Some(mut entry) = self.inner.elements.get_mut(&id) else {
                return;
            };
            let target = match &entry.node {
                ContentNode::Year(span) => {
                    span.year_info().map(|info| (info.year, span.text.clone()))
                }
                _ => None,
            };
            if target.is_some() {
                entry.active = true;
            }
            target
        };
        if let Some((year, display)) = target {
            self.inner.timeline.set_date(&first_day_iso(year));
            self.inner.timeline.set_indicator(&display);
        }
    }
}

/// ISO date of January 1st of `year`; negative years carry the sign
/// ("-0500-01-01").
fn first_day_iso(year: i32) -> String {
    chrono::NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| format!("{year}-01-01"))
}
