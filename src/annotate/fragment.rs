//! Fragmenter — rewrite source text into plain and annotated segments

use serde::{Deserialize, Serialize};

use super::resolve::ResolvedSpans;
use super::span::{Span, SpanKind};

/// One segment of annotated article text.
///
/// Concatenating the text of a fragmented node sequence reproduces the
/// source string exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ContentNode {
    /// A run of text with no annotation.
    Text(String),
    /// An annotated place-name segment.
    Place(Span),
    /// An annotated year segment.
    Year(Span),
}

impl ContentNode {
    /// The surface text of this node, as it appeared in the source.
    pub fn text(&self) -> &str {
        match self {
            ContentNode::Text(text) => text,
            ContentNode::Place(span) | ContentNode::Year(span) => &span.text,
        }
    }

    pub fn is_annotation(&self) -> bool {
        !matches!(self, ContentNode::Text(_))
    }

    pub fn span(&self) -> Option<&Span> {
        match self {
            ContentNode::Text(_) => None,
            ContentNode::Place(span) | ContentNode::Year(span) => Some(span),
        }
    }
}

fn annotation_node(span: Span) -> ContentNode {
    match span.kind {
        SpanKind::Place => ContentNode::Place(span),
        SpanKind::Year(_) => ContentNode::Year(span),
    }
}

/// Walk the resolved spans left to right, emitting a text node for every
/// gap and an annotation node for every span. An empty span sequence
/// yields the whole input as a single text node.
pub fn fragment(text: &str, spans: &ResolvedSpans) -> Vec<ContentNode> {
    if spans.is_empty() {
        return vec![ContentNode::Text(text.to_string())];
    }

    let mut nodes = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;
    for span in spans.iter() {
        if span.start > cursor {
            nodes.push(ContentNode::Text(text[cursor..span.start].to_string()));
        }
        cursor = span.end;
        nodes.push(annotation_node(span.clone()));
    }
    if cursor < text.len() {
        nodes.push(ContentNode::Text(text[cursor..].to_string()));
    }
    nodes
}
