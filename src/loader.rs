//! Article load orchestration
//!
//! Fetches an article through the content provider, runs every prose
//! text run through the annotation pipeline, rewires internal links,
//! normalizes image references, records history, and rebinds the
//! interaction controller to the freshly rendered elements. Each load
//! carries a generation stamp so a response that arrives after a newer
//! load started is discarded instead of clobbering it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::annotate::{annotate, ContentNode};
use crate::document::{
    AnnotatedElement, ArticleDocument, Block, Inline, LinkAction, RenderedArticle, RenderedBlock,
    RenderedNode,
};
use crate::history::{HistoryEntry, NavigationHistory};
use crate::interact::InteractionController;
use crate::providers::{ContentProvider, ProviderError, SearchHit};
use crate::session::SessionContext;

/// Search snippets are clipped to this many characters after tag removal.
pub const SNIPPET_MAX_CHARS: usize = 100;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("content fetch failed: {0}")]
    ContentFetch(#[from] ProviderError),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// What a completed load produced.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Rendered(RenderedArticle),
    /// A newer load started while this one was in flight; its result
    /// was dropped and the controller bindings were left untouched.
    Superseded,
}

/// Snapshot of the history cursor for driving navigation affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavState {
    pub can_back: bool,
    pub can_next: bool,
}

pub struct ArticleLoader {
    session: Mutex<SessionContext>,
    history: Mutex<NavigationHistory>,
    provider: Arc<dyn ContentProvider>,
    controller: InteractionController,
    generation: AtomicU64,
}

impl ArticleLoader {
    pub fn new(
        session: SessionContext,
        provider: Arc<dyn ContentProvider>,
        controller: InteractionController,
    ) -> Self {
        Self {
            session: Mutex::new(session),
            history: Mutex::new(NavigationHistory::new()),
            provider,
            controller,
            generation: AtomicU64::new(0),
        }
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Fetch, annotate, and render one article. `add_to_history` is false
    /// for loads driven by history navigation itself.
    pub async fn load(&self, title: &str, add_to_history: bool) -> LoadResult<LoadOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (language, domain) = {
            let session = self.session_guard();
            (session.language.clone(), session.content_domain.clone())
        };

        let document = self.provider.fetch(title, &language).await?;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(%title, generation, "stale article response discarded");
            return Ok(LoadOutcome::Superseded);
        }

        let rendered = render(document, &language, &domain);
        if add_to_history {
            self.history_guard()
                .load_new(HistoryEntry::new(title, &language));
        }
        self.controller.teardown();
        self.controller.bind(&rendered.annotation_elements());
        tracing::info!(
            title = %rendered.title,
            blocks = rendered.blocks.len(),
            elements = self.controller.bound_count(),
            "article rendered"
        );
        Ok(LoadOutcome::Rendered(rendered))
    }

    /// Step back in history and reload that entry. `None` at the oldest
    /// entry; the cursor does not move on a no-op.
    pub async fn back(&self) -> LoadResult<Option<LoadOutcome>> {
        let target = self.history_guard().back().cloned();
        match target {
            Some(entry) => self.load(&entry.title, false).await.map(Some),
            None => Ok(None),
        }
    }

    /// Step forward in history and reload that entry.
    pub async fn next(&self) -> LoadResult<Option<LoadOutcome>> {
        let target = self.history_guard().next().cloned();
        match target {
            Some(entry) => self.load(&entry.title, false).await.map(Some),
            None => Ok(None),
        }
    }

    /// Search the provider, stripping markup from snippets and clipping
    /// them for display.
    pub async fn search(&self, query: &str) -> LoadResult<Vec<SearchHit>> {
        let language = self.session_guard().language.clone();
        let hits = self.provider.search(query, &language).await?;
        Ok(hits
            .into_iter()
            .map(|hit| SearchHit {
                title: hit.title,
                snippet: clip_snippet(&strip_tags(&hit.snippet)),
            })
            .collect())
    }

    /// Switch the content language. History entries reference articles in
    /// the old language, so the trail resets.
    pub fn set_language(&self, language: impl Into<String>) {
        let language = language.into();
        tracing::info!(%language, "content language changed, history reset");
        self.session_guard().language = language;
        self.history_guard().reset();
    }

    pub fn language(&self) -> String {
        self.session_guard().language.clone()
    }

    pub fn nav_state(&self) -> NavState {
        let history = self.history_guard();
        NavState {
            can_back: history.can_back(),
            can_next: history.can_next(),
        }
    }

    pub fn history_len(&self) -> usize {
        self.history_guard().len()
    }

    fn session_guard(&self) -> MutexGuard<'_, SessionContext> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn history_guard(&self) -> MutexGuard<'_, NavigationHistory> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn render(document: ArticleDocument, language: &str, domain: &str) -> RenderedArticle {
    let blocks = document
        .blocks
        .iter()
        .map(|block| RenderedBlock {
            kind: block.kind,
            nodes: render_block(block, language, domain),
        })
        .collect();
    RenderedArticle {
        title: document.title,
        blocks,
        categories: document.categories,
    }
}

fn render_block(block: &Block, language: &str, domain: &str) -> Vec<RenderedNode> {
    let mut nodes = Vec::new();
    for inline in &block.inlines {
        match inline {
            Inline::Text(text) => {
                if block.kind.is_prose() {
                    for node in annotate(text) {
                        nodes.push(match node {
                            ContentNode::Text(plain) => RenderedNode::Text(plain),
                            annotated => RenderedNode::Annotation(AnnotatedElement::new(annotated)),
                        });
                    }
                } else {
                    nodes.push(RenderedNode::Text(text.clone()));
                }
            }
            Inline::Link { href, text } => nodes.push(RenderedNode::Link {
                action: rewire_link(href, domain),
                text: text.clone(),
            }),
            Inline::Image { src } => nodes.push(RenderedNode::Image {
                src: normalize_image_src(src, language, domain),
            }),
        }
    }
    nodes
}

/// Internal content links become load actions carrying the decoded
/// article title; everything else opens externally. A link is internal
/// only when it is relative or its host sits under the content domain.
fn rewire_link(href: &str, domain: &str) -> LinkAction {
    if let Some((prefix, title)) = href.split_once("/wiki/") {
        if !title.is_empty() && is_internal_host(prefix, domain) {
            return LinkAction::LoadArticle(percent_decode(title));
        }
    }
    LinkAction::External(href.to_string())
}

fn is_internal_host(prefix: &str, domain: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    let host = prefix
        .strip_prefix("https://")
        .or_else(|| prefix.strip_prefix("http://"))
        .or_else(|| prefix.strip_prefix("//"));
    match host {
        Some(host) => host == domain || host.ends_with(&format!(".{domain}")),
        None => false,
    }
}

/// Resolve protocol-relative, absolute-path, and bare image references
/// against the session's content domain.
fn normalize_image_src(src: &str, language: &str, domain: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") {
        src.to_string()
    } else if let Some(rest) = src.strip_prefix("//") {
        format!("https://{rest}")
    } else if src.starts_with('/') {
        format!("https://{language}.{domain}{src}")
    } else {
        format!("https://{language}.{domain}/wiki/{src}")
    }
}

fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn clip_snippet(input: &str) -> String {
    let mut chars = input.char_indices();
    match chars.nth(SNIPPET_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &input[..cut]),
        None => input.to_string(),
    }
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let Some(byte) = hex_pair(bytes[i + 1], bytes[i + 2]) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}
