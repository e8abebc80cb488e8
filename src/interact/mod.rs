//! Interaction layer: debounced hover, immediate activation, and
//! per-element feedback state over bound annotation elements.

mod controller;
mod schedule;
mod state;

pub use controller::{InteractionController, FEEDBACK_REVERT_MS, PLACE_ZOOM};
pub use schedule::ScheduledTask;
pub use state::{ElementId, Feedback};
