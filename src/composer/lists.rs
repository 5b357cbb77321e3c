//! Wikitext list grouping.
//!
//! Wikitext list markers carry no end marker, and consecutive items at the
//! same depth need to share one list element, so a run of markers like
//!
//! ```wikitext
//! * a
//! ** b
//! * c
//! ```
//!
//! is tracked as a request for a sequence of list containers which is then
//! reconciled against whatever containers are already open on the element
//! stack.

use super::stack::ElementStack;
use core::fmt;

/// A list item kind.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum ListKind {
    /// Ordered list.
    ///
    /// ```wikitext
    /// # Ordered list
    /// ```
    Ordered,
    /// Unordered list.
    ///
    /// ```wikitext
    /// * Unordered list
    /// ```
    Unordered,
    /// Definition list term.
    ///
    /// ```wikitext
    /// ; Definition term
    /// ```
    Term,
    /// Definition list detail.
    ///
    /// ```wikitext
    /// : Definition detail
    /// ```
    Detail,
}

impl ListKind {
    /// Returns the list kind for the given Wikitext markup, if it is a list
    /// marker.
    pub fn from_markup(markup: &str) -> Option<Self> {
        Some(match markup {
            "*" => Self::Unordered,
            "#" => Self::Ordered,
            ";" => Self::Term,
            ":" => Self::Detail,
            _ => return None,
        })
    }

    /// The HTML tag of the list element which contains this kind of item.
    #[inline]
    pub fn container(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
            ListKind::Term | ListKind::Detail => "dl",
        }
    }

    /// The HTML tag for this kind of list item.
    #[inline]
    pub fn item(self) -> &'static str {
        match self {
            ListKind::Ordered | ListKind::Unordered => "li",
            ListKind::Term => "dt",
            ListKind::Detail => "dd",
        }
    }
}

/// Returns true if `tag` is a list container element.
#[inline]
fn is_container(tag: &str) -> bool {
    matches!(tag, "ul" | "ol" | "dl")
}

/// Returns true if `tag` is a list item element.
#[inline]
pub(super) fn is_item(tag: &str) -> bool {
    matches!(tag, "li" | "dt" | "dd")
}

/// Returns true if `tag` is closed implicitly at the end of a line.
#[inline]
pub(super) fn is_line_structure(tag: &str) -> bool {
    is_container(tag) || is_item(tag)
}

/// The list containers requested by the list markers seen since the last
/// reconciliation, outermost first.
#[derive(Debug, Default)]
pub(super) struct PendingList {
    /// The requested kinds.
    kinds: Vec<ListKind>,
}

impl PendingList {
    /// Returns true if there is no outstanding request.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Requests one more level of list nesting.
    #[inline]
    pub fn push(&mut self, kind: ListKind) {
        self.kinds.push(kind);
    }

    /// Updates `stack` so that its open list containers match the request,
    /// then starts a new list item, emitting HTML for all of it to `out`.
    ///
    /// Only list elements above the innermost non-list element take part, so
    /// a list started inside some other element never closes that element or
    /// anything outside of it. A container of the other list family at the
    /// same depth never matches, so it is closed before the new one opens.
    ///
    /// Returns the stack index of the new list item, or `None` if there was
    /// nothing to reconcile.
    pub fn reconcile<W: fmt::Write + ?Sized>(
        &mut self,
        stack: &mut ElementStack<'_>,
        out: &mut W,
    ) -> Result<Option<usize>, fmt::Error> {
        let Some(&last) = self.kinds.last() else {
            return Ok(None);
        };

        let base = stack
            .iter()
            .enumerate()
            .filter(|(_, tag)| !is_line_structure(tag))
            .last()
            .map_or(0, |(index, _)| index + 1);

        let current = stack
            .iter()
            .enumerate()
            .skip(base)
            .filter(|(_, tag)| is_container(tag))
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        let common_end = current
            .iter()
            .zip(&self.kinds)
            .take_while(|(index, kind)| stack.get(**index) == Some(kind.container()))
            .count();

        log::debug!(
            "reconcile lists: {} open, {} requested, {common_end} shared",
            current.len(),
            self.kinds.len()
        );

        // Everything above the innermost shared container goes, including an
        // item still open on the same line
        let keep = match common_end {
            0 => base,
            shared => current[shared - 1] + 1,
        };
        stack.close_to(out, keep)?;

        for kind in self.kinds.drain(common_end..) {
            let tag = kind.container();
            write!(out, "<{tag}>")?;
            stack.push(tag);
        }

        let item = last.item();
        write!(out, "<{item}>")?;
        stack.push(item);

        self.kinds.clear();
        Ok(Some(stack.len() - 1))
    }
}
