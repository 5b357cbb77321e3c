//! Link target resolution.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// The alphabet of characters to percent-encode in a title path.
///
/// This is every byte except ASCII alphanumerics, `-`, `.`, `_`, and the
/// path separator, since subpage titles like
/// `Portal:Current events/2017 May 8` are still paths. Unlike RFC 3986, `~`
/// is escaped.
const ALPHABET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'/');

/// Resolves page titles into absolute article URLs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LinkResolver {
    /// The URL of the wiki article path, without a trailing slash.
    base_url: String,
}

impl LinkResolver {
    /// Creates a new resolver for articles under `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The base URL of the resolver.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the absolute URL for the page with the given title.
    ///
    /// ```text
    /// Portal:Current events/2017 May 8
    /// https://en.wikipedia.org/wiki/Portal%3ACurrent%20events/2017%20May%208
    /// ```
    pub fn resolve(&self, title: &str) -> String {
        format!("{}/{}", self.base_url, url_encode(title))
    }
}

/// Percent-encodes a title for use as a URL path.
#[inline]
pub fn url_encode(input: &str) -> percent_encoding::PercentEncode<'_> {
    utf8_percent_encode(input, &ALPHABET)
}
