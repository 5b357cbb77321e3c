//! Conversion of a parsed Wikitext node tree into an HTML fragment.
//!
//! The composer walks the tree depth-first and writes HTML as it goes, keeping
//! a stack of elements which are still open. The output is intentionally
//! loose: it is always balanced, but it is not always valid HTML, since
//! Wikitext lists have no end markers and nested lists are emitted directly
//! inside their parent list rather than inside the parent item.
//!
//! Two things happen whenever a fragment of output is appended:
//!
//! 1. If any list markers were seen since the last fragment, the list
//!    containers on the stack are reconciled with the requested list nesting
//!    and a new list item is started. List markers themselves never emit
//!    anything, since the nesting depth is only known once the run of markers
//!    is over.
//! 2. If the fragment ends with a line break, and the innermost open element
//!    is a list element, that one element is closed. Ancestor lists stay open
//!    so that the next item on the next line can join them.

use crate::{
    config::{CommentPolicy, Config, UnknownNodePolicy},
    node::{ExternalLink, Node, Tag, Wikilink},
};
use core::fmt;
use lists::{ListKind, PendingList};
use stack::ElementStack;
use std::borrow::Cow;

mod lists;
mod stack;

/// A composition error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A write to the output buffer failed.
    #[error("fmt error: {0}")]
    Fmt(#[from] fmt::Error),

    /// An end tag was requested for an element which is not open.
    #[error("unbalanced close: no open <{0}> element")]
    UnbalancedClose(String),

    /// A node with no HTML rendering was encountered in strict mode.
    #[error("unknown node kind: {0}")]
    UnknownNodeKind(String),
}

/// The standard result type used by all fallible composer functions.
pub type Result<T = (), E = Error> = core::result::Result<T, E>;

/// A Wikitext node tree to HTML converter.
///
/// A composer holds only immutable configuration. All state for a conversion
/// lives in the call to [`Composer::compose`], so one composer can be shared
/// freely, including across threads.
#[derive(Clone, Debug, Default)]
pub struct Composer {
    /// The configuration.
    config: Config,
}

impl Composer {
    /// Creates a new composer using the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration of the composer.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Converts the tree rooted at `root` into an HTML fragment.
    pub fn compose(&self, root: &Node) -> Result<String> {
        self.compose_nodes([root])
    }

    /// Converts a sequence of sibling nodes into an HTML fragment.
    pub fn compose_nodes<'a, I>(&'a self, nodes: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let mut composition = Composition::new(&self.config);
        for node in nodes {
            composition.visit(node)?;
        }
        composition.finish()
    }
}

/// The state of a single conversion.
#[derive(Debug)]
struct Composition<'a> {
    /// The configuration.
    config: &'a Config,
    /// The rendered output.
    html: String,
    /// How many links are currently being emitted.
    in_link: usize,
    /// The stack index of the list item started for the innermost list marker
    /// node with its own content.
    open_item: Option<usize>,
    /// List markers which have not been reconciled yet.
    pending: PendingList,
    /// The stack of open HTML elements.
    stack: ElementStack<'a>,
}

impl<'a> Composition<'a> {
    /// Creates a new empty conversion.
    fn new(config: &'a Config) -> Self {
        Self {
            config,
            html: <_>::default(),
            in_link: 0,
            open_item: None,
            pending: <_>::default(),
            stack: <_>::default(),
        }
    }

    /// Appends a fragment of HTML to the output.
    fn add_part(&mut self, part: &str) -> Result {
        if !self.pending.is_empty()
            && let Some(index) = self.pending.reconcile(&mut self.stack, &mut self.html)?
        {
            self.open_item = Some(index);
        }

        self.html += part;

        if self.in_link == 0
            && ends_line(part)
            && self.stack.last().is_some_and(lists::is_line_structure)
        {
            self.stack.close_last(&mut self.html)?;
        }

        Ok(())
    }

    /// Finalises the conversion and returns the resulting HTML.
    fn finish(mut self) -> Result<String> {
        if !self.pending.is_empty() {
            log::debug!("list marker at end of input has no content");
            self.pending.reconcile(&mut self.stack, &mut self.html)?;
        }
        self.stack.finish(&mut self.html)?;
        Ok(self.html)
    }

    /// Converts a node and all of its children.
    fn visit(&mut self, node: &'a Node) -> Result {
        match node {
            Node::Document { children } => self.visit_all(children),
            Node::Tag(tag) => {
                if let Some(kind) = tag.wiki_markup.as_deref().and_then(ListKind::from_markup) {
                    self.visit_list_item(kind, tag)
                } else {
                    self.visit_tag(tag)
                }
            }
            Node::Wikilink(link) => self.visit_wikilink(link),
            Node::ExternalLink(link) => self.visit_external_link(link),
            Node::Comment { contents } => match self.config.comments {
                CommentPolicy::Suppress => Ok(()),
                CommentPolicy::Emit => self.add_part(&format!("<!--{contents}-->")),
            },
            Node::Text { value } => self.add_part(value),
            Node::Unsupported { kind, raw } => match self.config.unknown_nodes {
                UnknownNodePolicy::Strict => Err(Error::UnknownNodeKind(kind.clone())),
                UnknownNodePolicy::Lenient => {
                    log::warn!("passing through unsupported {kind} node as text");
                    self.add_part(raw)
                }
            },
        }
    }

    /// Converts a list of sibling nodes.
    fn visit_all(&mut self, nodes: &'a [Node]) -> Result {
        for node in nodes {
            self.visit(node)?;
        }
        Ok(())
    }

    /// Converts an external link.
    fn visit_external_link(&mut self, link: &'a ExternalLink) -> Result {
        let href = html_escape::encode_double_quoted_attribute(&link.url);
        self.start_link(&href)?;
        match link.title.as_deref() {
            Some(title) if !title.is_empty() => self.visit_all(title)?,
            _ => self.add_part(&link.url)?,
        }
        self.end_link()
    }

    /// Converts a list marker tag.
    ///
    /// The list item is not started until the next fragment is appended, and
    /// lists of the other family at the same depth are only closed then.
    /// Parsers usually emit list markers without children and put the item
    /// content in the following sibling nodes; when a marker does have
    /// children, its item is closed after them.
    fn visit_list_item(&mut self, kind: ListKind, tag: &'a Tag) -> Result {
        self.pending.push(kind);

        if tag.children.is_empty() {
            return Ok(());
        }

        let outer = self.open_item.take();
        self.visit_all(&tag.children)?;
        if let Some(index) = self.open_item.take()
            && self.stack.get(index).is_some_and(lists::is_item)
        {
            self.stack.close_to(&mut self.html, index)?;
        }
        self.open_item = outer;

        Ok(())
    }

    /// Converts a formatting or HTML tag.
    ///
    /// Ending the tag closes everything back to the matching element, so any
    /// elements left open by the content are closed along with it.
    fn visit_tag(&mut self, tag: &'a Tag) -> Result {
        let config = self.config;
        let mapped = tag
            .wiki_markup
            .as_deref()
            .and_then(|markup| config.tag_for(markup));
        let name = mapped.map_or_else(|| lowercase(&tag.tag), Cow::Borrowed);

        if tag.self_closing {
            self.add_part(&format!("<{name}/>"))?;
            return self.visit_all(&tag.children);
        }

        self.add_part(&format!("<{name}>"))?;
        let closing = match (mapped, tag.closing_tag.as_deref()) {
            (None, Some(closing)) => lowercase(closing),
            _ => name.clone(),
        };
        self.stack.push(name);
        self.visit_all(&tag.children)?;
        self.stack.close_tag(&mut self.html, &closing)
    }

    /// Converts an internal link.
    fn visit_wikilink(&mut self, link: &'a Wikilink) -> Result {
        let href = self.config.links.resolve(&link.title);
        self.start_link(&html_escape::encode_double_quoted_attribute(&href))?;
        if let Some(text) = link.display() {
            self.visit_all(text)?;
        } else {
            self.add_part(&link.title)?;
        }
        self.end_link()
    }

    /// Emits the start of a link. Links are not recorded on the element stack
    /// since they always end before the node which started them does.
    fn start_link(&mut self, href: &str) -> Result {
        self.add_part(&format!(r#"<a href="{href}">"#))?;
        self.in_link += 1;
        Ok(())
    }

    /// Emits the end of a link.
    fn end_link(&mut self) -> Result {
        self.in_link -= 1;
        self.add_part("</a>")
    }
}

/// Returns true if the last non-whitespace character of `part` is a line
/// break.
fn ends_line(part: &str) -> bool {
    part.chars()
        .rev()
        .find(|c| matches!(c, '\n' | '\r') || !c.is_whitespace())
        .is_some_and(|c| matches!(c, '\n' | '\r'))
}

/// Lowercases a tag name, borrowing it if it is already lowercase.
fn lowercase(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}
