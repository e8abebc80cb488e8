//! Chronomap: Annotated Text Interaction Engine
//!
//! Detects place and year references in article prose, fragments the
//! text around them, and drives the interaction protocol those
//! annotations carry: debounced hover lookups, immediate activation,
//! map and timeline updates, and linear navigation history.
//!
//! # Core Concepts
//!
//! - **Spans**: place and year references located in raw text
//! - **Fragments**: the text split into plain runs and annotated nodes
//! - **Elements**: rendered annotations the controller binds behavior to
//!
//! # Example
//!
//! ```
//! use chronomap::annotate;
//!
//! let nodes = annotate("Visit Paris in the 1920s.");
//! assert_eq!(nodes.len(), 5);
//! ```

pub mod annotate;
pub mod document;
pub mod history;
pub mod interact;
pub mod loader;
pub mod providers;
pub mod session;

pub use annotate::{annotate, ContentNode, ResolvedSpans, Span, SpanKind, YearInfo};
pub use document::{
    AnnotatedElement, ArticleDocument, Block, BlockKind, Inline, LinkAction, RenderedArticle,
    RenderedBlock, RenderedNode,
};
pub use history::{HistoryEntry, NavigationHistory};
pub use interact::{ElementId, Feedback, InteractionController};
pub use loader::{ArticleLoader, LoadError, LoadOutcome, LoadResult, NavState};
pub use providers::{
    ContentProvider, GeoPoint, Geocoder, MapSurface, MemoryContent, MemoryGeocoder, ProviderError,
    ProviderResult, SearchHit, Timeline,
};
pub use session::{SessionContext, Settings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
