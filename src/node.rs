//! The parsed Wikitext node tree consumed by the composer.
//!
//! Nodes are produced by an external Wikitext parser and handed over
//! already-parsed, usually as JSON. The composer only ever borrows them.

use serde::{Deserialize, Serialize};

/// A node of a parsed Wikitext document.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// The root of a parsed document.
    Document {
        /// The top-level nodes, in source order.
        #[serde(default)]
        children: Vec<Node>,
    },
    /// A Wikitext markup tag or an HTML tag.
    Tag(Tag),
    /// An internal link.
    ///
    /// ```wikitext
    /// [[Title|text]]
    /// ```
    Wikilink(Wikilink),
    /// An external link.
    ///
    /// ```wikitext
    /// [https://example.com title]
    /// ```
    ExternalLink(ExternalLink),
    /// An HTML comment.
    Comment {
        /// The text between `<!--` and `-->`.
        contents: String,
    },
    /// A run of plain text.
    Text {
        /// The text.
        value: String,
    },
    /// A node kind the parser bridge knows about but which has no HTML
    /// rendering, like a template or a heading.
    Unsupported {
        /// The name of the node kind, as reported by the parser.
        kind: String,
        /// The original source text of the node.
        #[serde(default)]
        raw: String,
    },
}

impl Node {
    /// Creates a new [`Node::Document`].
    pub fn document(children: Vec<Node>) -> Self {
        Self::Document { children }
    }

    /// Creates a new [`Node::Comment`].
    pub fn comment(contents: impl Into<String>) -> Self {
        Self::Comment {
            contents: contents.into(),
        }
    }

    /// Creates a new [`Node::Text`].
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// The direct children of the node, if it has any.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children } | Node::Tag(Tag { children, .. }) => children,
            Node::Wikilink(Wikilink {
                text: Some(children),
                ..
            })
            | Node::ExternalLink(ExternalLink {
                title: Some(children),
                ..
            }) => children,
            _ => &[],
        }
    }

    /// The name of the kind of this node, for diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Node::Document { .. } => "document",
            Node::Tag(_) => "tag",
            Node::Wikilink(_) => "wikilink",
            Node::ExternalLink(_) => "external_link",
            Node::Comment { .. } => "comment",
            Node::Text { .. } => "text",
            Node::Unsupported { kind, .. } => kind.as_str(),
        }
    }

    /// Returns true if the node is a text node containing only whitespace.
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Text { value } if value.trim().is_empty())
    }
}

/// A Wikitext markup tag or an HTML tag.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Tag {
    /// The Wikitext markup which produced the tag, like `''` or `*`. This is
    /// `None` for tags written as HTML.
    #[serde(default)]
    pub wiki_markup: Option<String>,
    /// The tag name chosen by the parser, like `i`.
    pub tag: String,
    /// The name in the end tag, if the tag is not self-closing.
    #[serde(default)]
    pub closing_tag: Option<String>,
    /// Whether the tag is self-closing.
    #[serde(default)]
    pub self_closing: bool,
    /// The content of the tag.
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Tag {
    /// Creates a paired tag with the given markup, name, and content.
    pub fn new(wiki_markup: Option<&str>, tag: &str, children: Vec<Node>) -> Self {
        Self {
            wiki_markup: wiki_markup.map(Into::into),
            tag: tag.into(),
            closing_tag: Some(tag.into()),
            self_closing: false,
            children,
        }
    }

    /// Creates a self-closing tag for a list marker like `*`, in the same
    /// shape the parser produces for them.
    pub fn list_marker(markup: &str) -> Self {
        let tag = match markup {
            ";" => "dt",
            ":" => "dd",
            _ => "li",
        };
        Self {
            wiki_markup: Some(markup.into()),
            tag: tag.into(),
            closing_tag: None,
            self_closing: true,
            children: Vec::new(),
        }
    }
}

impl From<Tag> for Node {
    fn from(value: Tag) -> Self {
        Self::Tag(value)
    }
}

/// An internal link.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Wikilink {
    /// The target page title.
    pub title: String,
    /// The display text override.
    ///
    /// ```wikitext
    /// [[Title|text]]
    ///         ^^^^
    /// ```
    #[serde(default)]
    pub text: Option<Vec<Node>>,
}

impl Wikilink {
    /// The display text override, if it has any content.
    pub fn display(&self) -> Option<&[Node]> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }
}

impl From<Wikilink> for Node {
    fn from(value: Wikilink) -> Self {
        Self::Wikilink(value)
    }
}

/// An external link.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ExternalLink {
    /// The target URL.
    pub url: String,
    /// The link title.
    ///
    /// ```wikitext
    /// [https://example.com title]
    ///                      ^^^^^
    /// ```
    #[serde(default)]
    pub title: Option<Vec<Node>>,
}

impl From<ExternalLink> for Node {
    fn from(value: ExternalLink) -> Self {
        Self::ExternalLink(value)
    }
}
