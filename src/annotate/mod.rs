//! Pure annotation pipeline: pattern cascade, span resolution, fragmenting
//!
//! No IO, no async, no error conditions — every function here is total
//! over string input. The pipeline for one piece of text is
//! `detect` → `resolve` → `fragment`, or [`annotate`] for all three.

mod fragment;
mod pattern;
mod resolve;
mod span;

#[cfg(test)]
mod tests;

pub use fragment::{fragment, ContentNode};
pub use pattern::{
    detect, detect_places, detect_years, BC_MAGNITUDE_MAX, DECADE_MAX, YEAR_MAX, YEAR_MIN,
};
pub use resolve::{resolve, ResolvedSpans};
pub use span::{Span, SpanKind, YearInfo};

/// Run the full pipeline over one piece of text.
pub fn annotate(text: &str) -> Vec<ContentNode> {
    fragment(text, &resolve(detect(text)))
}
