//! Span representation for annotation candidates

use serde::{Deserialize, Serialize};

/// Kind-specific payload of a span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum SpanKind {
    /// A place-name candidate. The matched text is used verbatim
    /// as the geocoding query.
    Place,
    /// A calendar-year candidate with its parsed payload.
    Year(YearInfo),
}

/// Parsed payload of a year span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearInfo {
    /// Numeric year; negative values are before the common era.
    pub year: i32,
    /// True for decade matches like "1850s".
    pub is_decade: bool,
    /// True for matches carrying an explicit era marker like "44 BC".
    pub is_bc_era: bool,
}

impl YearInfo {
    pub fn standard(year: i32) -> Self {
        Self {
            year,
            is_decade: false,
            is_bc_era: false,
        }
    }

    pub fn decade(year: i32) -> Self {
        Self {
            year,
            is_decade: true,
            is_bc_era: false,
        }
    }

    pub fn bc_era(magnitude: i32) -> Self {
        Self {
            year: -magnitude,
            is_decade: false,
            is_bc_era: true,
        }
    }
}

/// A typed, offset-bounded annotation over a source string.
///
/// Offsets are byte offsets into the exact input text. Every matched
/// character is ASCII, so `start..end` always falls on UTF-8 boundaries.
/// Invariant: `0 <= start < end <= source.len()`. Spans are immutable
/// once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub kind: SpanKind,
    /// The matched text, exactly as it appears in the source.
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn place(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind: SpanKind::Place,
            text: text.into(),
            start,
            end,
        }
    }

    pub fn year(text: impl Into<String>, start: usize, end: usize, info: YearInfo) -> Self {
        Self {
            kind: SpanKind::Year(info),
            text: text.into(),
            start,
            end,
        }
    }

    pub fn is_place(&self) -> bool {
        matches!(self.kind, SpanKind::Place)
    }

    pub fn is_year(&self) -> bool {
        matches!(self.kind, SpanKind::Year(_))
    }

    /// The year payload, if this is a year span.
    pub fn year_info(&self) -> Option<&YearInfo> {
        match &self.kind {
            SpanKind::Year(info) => Some(info),
            SpanKind::Place => None,
        }
    }

    /// True when this span and `other` cover at least one common offset.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}
