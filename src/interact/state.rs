//! Per-element interaction state

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::annotate::ContentNode;

use super::schedule::ScheduledTask;

/// Identity of one rendered annotation element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new random ElementId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ephemeral result-state feedback shown on an annotation element.
///
/// Terminal states revert to `Idle` after a fixed display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Idle,
    Searching,
    Found,
    NotFound,
    Error,
}

impl Feedback {
    /// True for states that schedule an auto-revert to `Idle`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Feedback::Found | Feedback::NotFound | Feedback::Error)
    }
}

/// Controller-private state of one bound element.
#[derive(Debug)]
pub(crate) struct BoundElement {
    pub node: ContentNode,
    pub feedback: Feedback,
    /// Year highlight flag; at most one year element is active after a click.
    pub active: bool,
    /// Live hover debounce timer, at most one per element.
    pub debounce: Option<ScheduledTask>,
    /// Pending feedback auto-revert.
    pub revert: Option<ScheduledTask>,
}

impl BoundElement {
    pub fn new(node: ContentNode) -> Self {
        Self {
            node,
            feedback: Feedback::Idle,
            active: false,
            debounce: None,
            revert: None,
        }
    }

    /// Cancel every pending timer this element owns.
    pub fn cancel_timers(&mut self) {
        if let Some(task) = self.debounce.take() {
            task.cancel();
        }
        if let Some(task) = self.revert.take() {
            task.cancel();
        }
    }
}
