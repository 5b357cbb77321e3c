//! Composer configuration.

use crate::link::LinkResolver;
use std::collections::HashMap;

/// The default article path used for resolving wikilinks.
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/wiki";

/// Built-in mappings from Wikitext formatting markup to HTML tag names.
static DEFAULT_TAGS: phf::Map<&str, &str> = phf::phf_map! {
    "''" => "i",
    "'''" => "b",
};

/// What to do with [`Node::Comment`](crate::node::Node::Comment) nodes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CommentPolicy {
    /// Drop comments from the output.
    #[default]
    Suppress,
    /// Emit comments as HTML comments.
    Emit,
}

/// What to do with [`Node::Unsupported`](crate::node::Node::Unsupported)
/// nodes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UnknownNodePolicy {
    /// Fail the whole composition.
    #[default]
    Strict,
    /// Emit the original source text of the node as a text fragment.
    Lenient,
}

/// Immutable configuration for a [`Composer`](crate::Composer).
#[derive(Clone, Debug)]
pub struct Config {
    /// The article link resolver.
    pub(crate) links: LinkResolver,
    /// Comment handling.
    pub(crate) comments: CommentPolicy,
    /// Unsupported node handling.
    pub(crate) unknown_nodes: UnknownNodePolicy,
    /// Extra or overridden markup-to-tag mappings.
    tags: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Config {
    /// Creates a new default configuration for the wiki at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            links: LinkResolver::new(base_url),
            comments: <_>::default(),
            unknown_nodes: <_>::default(),
            tags: <_>::default(),
        }
    }

    /// Replaces the article base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.links = LinkResolver::new(base_url);
        self
    }

    /// Sets the comment policy.
    #[must_use]
    pub fn with_comments(mut self, policy: CommentPolicy) -> Self {
        self.comments = policy;
        self
    }

    /// Sets the unsupported node policy.
    #[must_use]
    pub fn with_unknown_nodes(mut self, policy: UnknownNodePolicy) -> Self {
        self.unknown_nodes = policy;
        self
    }

    /// Maps the Wikitext formatting markup `markup` to the HTML tag `tag`.
    #[must_use]
    pub fn with_tag(mut self, markup: &str, tag: &str) -> Self {
        self.tags.insert(markup.to_string(), tag.to_ascii_lowercase());
        self
    }

    /// The article link resolver.
    pub fn links(&self) -> &LinkResolver {
        &self.links
    }

    /// Returns the HTML tag name for the given formatting markup, if one is
    /// configured.
    pub fn tag_for(&self, markup: &str) -> Option<&str> {
        self.tags
            .get(markup)
            .map(String::as_str)
            .or_else(|| DEFAULT_TAGS.get(markup).copied())
    }
}
