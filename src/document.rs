//! Article document model
//!
//! What the content provider hands back (blocks of inline runs) and what
//! the loader renders it into (annotated nodes with element identities,
//! rewired links, normalized images). The model deliberately carries no
//! styling or layout — it is the text-bearing skeleton the annotation
//! pipeline walks.

use serde::{Deserialize, Serialize};

use crate::annotate::ContentNode;
use crate::interact::ElementId;

/// A fetched article before annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDocument {
    pub title: String,
    pub blocks: Vec<Block>,
    /// Category labels the provider attached to the article.
    pub categories: Vec<String>,
}

impl ArticleDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Convenience for a plain paragraph of text.
    pub fn with_paragraph(self, text: impl Into<String>) -> Self {
        self.with_block(Block::paragraph(text))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Paragraph,
    Heading,
    /// Embedded code — not prose, never annotated.
    Code,
    /// Embedded style rules — not prose, never annotated.
    Style,
}

impl BlockKind {
    /// Whether the annotation pipeline runs over this block's text.
    pub fn is_prose(&self) -> bool {
        matches!(self, BlockKind::Paragraph | BlockKind::Heading)
    }
}

/// One text-bearing region of an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    pub inlines: Vec<Inline>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            inlines: Vec::new(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            inlines: vec![Inline::Text(text.into())],
        }
    }

    pub fn with_inline(mut self, inline: Inline) -> Self {
        self.inlines.push(inline);
        self
    }
}

/// A leaf of a block: a text run, a link, or an image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Inline {
    Text(String),
    Link { href: String, text: String },
    Image { src: String },
}

/// One rendered annotation element: a content node plus the identity the
/// interaction controller binds behavior to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedElement {
    pub id: ElementId,
    pub node: ContentNode,
}

impl AnnotatedElement {
    pub fn new(node: ContentNode) -> Self {
        Self {
            id: ElementId::new(),
            node,
        }
    }
}

/// What following a rendered link does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum LinkAction {
    /// Internal content link: load this article through the loader.
    LoadArticle(String),
    /// Cross-domain link: open outside the application.
    External(String),
}

/// A rendered leaf the UI turns into a DOM element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RenderedNode {
    Text(String),
    Annotation(AnnotatedElement),
    Link { action: LinkAction, text: String },
    Image { src: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedBlock {
    pub kind: BlockKind,
    pub nodes: Vec<RenderedNode>,
}

/// The final product of one article load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedArticle {
    pub title: String,
    pub blocks: Vec<RenderedBlock>,
    pub categories: Vec<String>,
}

impl RenderedArticle {
    /// All annotation elements, in document order, for controller binding.
    pub fn annotation_elements(&self) -> Vec<AnnotatedElement> {
        self.blocks
            .iter()
            .flat_map(|block| &block.nodes)
            .filter_map(|node| match node {
                RenderedNode::Annotation(element) => Some(element.clone()),
                _ => None,
            })
            .collect()
    }

    /// Concatenated surface text of one block (images excluded).
    /// Used by the round-trip tests.
    pub fn block_text(&self, index: usize) -> String {
        self.blocks[index]
            .nodes
            .iter()
            .map(|node| match node {
                RenderedNode::Text(text) => text.as_str(),
                RenderedNode::Annotation(element) => element.node.text(),
                RenderedNode::Link { text, .. } => text.as_str(),
                RenderedNode::Image { .. } => "",
            })
            .collect()
    }
}
