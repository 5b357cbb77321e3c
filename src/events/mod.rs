//! News item extraction for current events pages.
//!
//! A current events page for one day looks like this:
//!
//! ```wikitext
//! <!-- All news items below this line -->
//! ;Armed conflicts and attacks
//! * A thing happened in [[Somewhere]]. [https://example.com/news (Source)]
//! * Another thing happened.
//! <!-- All news items above this line -->
//! ```
//!
//! Every top-level bullet between the two sentinel comments is one event.

use crate::{
    Composer, Result,
    node::{Node, Tag},
};
use serde::Serialize;


/// Text in the comment immediately preceding the news items.
pub const START_SENTINEL: &str = "All news items below this line";
/// Text in the comment immediately following the news items.
pub const END_SENTINEL: &str = "All news items above this line";

/// A single news item.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Event<'a> {
    /// The content of the item, without its list marker.
    nodes: Vec<&'a Node>,
}

impl<'a> Event<'a> {
    /// The first external link in the item, which is normally the news source.
    pub fn link(&self) -> Option<&'a str> {
        self.nodes.iter().find_map(|&node| match node {
            Node::ExternalLink(link) => Some(link.url.as_str()),
            _ => None,
        })
    }

    /// The content of the item.
    pub fn nodes(&self) -> &[&'a Node] {
        &self.nodes
    }

    /// A plain text summary of the item. Source links are omitted.
    pub fn title(&self) -> String {
        let mut title = String::new();
        for node in &self.nodes {
            plain_text(&mut title, node);
        }
        title.trim().to_string()
    }

    /// Converts the item into a feed entry.
    pub fn to_entry(&self, composer: &Composer) -> Result<Entry> {
        Ok(Entry {
            title: self.title(),
            link: self.link().map(Into::into),
            description: composer.compose_nodes(self.nodes.iter().copied())?,
        })
    }
}

/// A feed entry for one news item.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Entry {
    /// The plain text title.
    pub title: String,
    /// The source link.
    pub link: Option<String>,
    /// The HTML body.
    pub description: String,
}

/// Returns the nodes strictly between the news item sentinel comments.
///
/// A missing start sentinel means the start of the input, and a missing end
/// sentinel means the end of the input. Only a start sentinel which comes
/// before the end sentinel counts.
pub fn news_slice(nodes: &[Node]) -> &[Node] {
    let mut start = 0;
    let mut end = nodes.len();
    for (index, node) in nodes.iter().enumerate() {
        if let Node::Comment { contents } = node {
            if contents.contains(START_SENTINEL) {
                start = index + 1;
            } else if contents.contains(END_SENTINEL) {
                end = index;
                break;
            }
        }
    }

    &nodes[start..end]
}

/// Extracts the news items from a parsed current events page.
///
/// Only the top-level nodes of `document` are considered. Whitespace between
/// the nodes of an item is kept, but leading and trailing whitespace is not.
pub fn extract_events(document: &Node) -> Vec<Event<'_>> {
    let mut events = Vec::new();
    let mut current: Option<Event<'_>> = None;
    for node in news_slice(document.children()) {
        if let Some(event) = &mut current
            && is_inline(node)
        {
            event.nodes.push(node);
            continue;
        }

        if let Some(event) = current.take() {
            push_event(&mut events, event);
        }

        if is_bullet(node) {
            current = Some(Event { nodes: Vec::new() });
        }
    }

    if let Some(event) = current {
        push_event(&mut events, event);
    }

    log::debug!("found {} news items", events.len());
    events
}

/// Trims blank nodes from both ends of `event` and adds it to `events` if
/// anything is left.
fn push_event<'a>(events: &mut Vec<Event<'a>>, mut event: Event<'a>) {
    while event.nodes.last().is_some_and(|node| node.is_blank()) {
        event.nodes.pop();
    }
    let leading = event.nodes.iter().take_while(|node| node.is_blank()).count();
    event.nodes.drain(..leading);

    if !event.nodes.is_empty() {
        events.push(event);
    }
}

/// Returns true if the node starts a top-level unordered list item.
fn is_bullet(node: &Node) -> bool {
    matches!(node, Node::Tag(Tag { wiki_markup: Some(markup), .. }) if markup == "*")
}

/// Returns true if the node can be part of the content of a news item.
fn is_inline(node: &Node) -> bool {
    match node {
        Node::Text { .. } | Node::Wikilink(_) | Node::ExternalLink(_) => true,
        Node::Tag(tag) => !matches!(tag.wiki_markup.as_deref(), Some("*" | "#" | ";" | ":")),
        _ => false,
    }
}

/// Appends the visible text of `node` to `out`, skipping external links.
fn plain_text(out: &mut String, node: &Node) {
    match node {
        Node::Text { value } => out.push_str(value),
        Node::Wikilink(link) => {
            if let Some(text) = link.display() {
                for node in text {
                    plain_text(out, node);
                }
            } else {
                out.push_str(&link.title);
            }
        }
        Node::Document { children } | Node::Tag(Tag { children, .. }) => {
            for node in children {
                plain_text(out, node);
            }
        }
        Node::ExternalLink(_) | Node::Comment { .. } | Node::Unsupported { .. } => {}
    }
}
