//! Rendering of parsed MediaWiki documents into HTML for syndication feeds.
//!
//! This crate does not parse Wikitext. It consumes a node tree produced by an
//! external parser (see [`node`]) and turns it, or a slice of it, into an HTML
//! fragment suitable for the body of one feed entry:
//!
//! ```text
//! * [[Foobar]] happened.
//! ```
//!
//! becomes
//!
//! ```html
//! <ul><li> <a href="https://en.wikipedia.org/wiki/Foobar">Foobar</a> happened.</li></ul>
//! ```
//!
//! The [`events`] module knows how to find the individual news items on a
//! current events page and turn each one into a feed entry.

pub use composer::{Composer, Error, Result};
pub use config::{CommentPolicy, Config, UnknownNodePolicy};
pub use link::LinkResolver;

pub mod composer;
pub mod config;
pub mod events;
pub mod link;
pub mod node;

/// Converts the tree rooted at `root` into an HTML fragment, resolving
/// wikilinks against `base_url` and otherwise using the default configuration.
pub fn compose(root: &node::Node, base_url: &str) -> Result<String> {
    Composer::new(Config::new(base_url)).compose(root)
}
