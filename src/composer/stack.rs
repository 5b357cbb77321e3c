//! The stack of open HTML elements.

use super::{Error, Result};
use core::fmt;
use std::borrow::Cow;

/// A LIFO record of HTML elements which have been started but not yet ended.
#[derive(Debug, Default)]
pub(super) struct ElementStack<'a> {
    /// The lowercase tag names of the open elements, outermost first.
    elements: Vec<Cow<'a, str>>,
}

impl<'a> ElementStack<'a> {
    /// Closes every element from `index` to the top of the stack, innermost
    /// first.
    pub fn close_to<W: fmt::Write + ?Sized>(&mut self, out: &mut W, index: usize) -> fmt::Result {
        for name in self.elements.drain(index..).rev() {
            log::trace!("close <{name}>");
            write!(out, "</{name}>")?;
        }
        Ok(())
    }

    /// Closes the innermost element.
    pub fn close_last<W: fmt::Write + ?Sized>(&mut self, out: &mut W) -> fmt::Result {
        if let Some(name) = self.elements.pop() {
            log::trace!("close <{name}> at end of line");
            write!(out, "</{name}>")?;
        }
        Ok(())
    }

    /// Closes the innermost element with the given name, plus every element
    /// which was opened inside of it.
    ///
    /// If there is no such element, this is an [`Error::UnbalancedClose`].
    pub fn close_tag<W: fmt::Write + ?Sized>(&mut self, out: &mut W, name: &str) -> Result {
        let Some(index) = self.position(name) else {
            return Err(Error::UnbalancedClose(name.to_string()));
        };
        self.close_to(out, index)?;
        Ok(())
    }

    /// Closes every open element.
    pub fn finish<W: fmt::Write + ?Sized>(&mut self, out: &mut W) -> fmt::Result {
        self.close_to(out, 0)
    }

    /// Returns the name of the element at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.elements.get(index).map(AsRef::as_ref)
    }

    /// Returns an iterator over the open element names, outermost first.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(AsRef::as_ref)
    }

    /// Returns the name of the innermost element.
    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.elements.last().map(AsRef::as_ref)
    }

    /// Returns the number of open elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns the index of the innermost element with the given name.
    fn position(&self, name: &str) -> Option<usize> {
        self.elements.iter().rposition(|e| e == name)
    }

    /// Records a newly started element.
    #[inline]
    pub fn push(&mut self, name: impl Into<Cow<'a, str>>) {
        let name = name.into();
        log::trace!("open <{name}>");
        self.elements.push(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of<'a>(names: &[&'a str]) -> ElementStack<'a> {
        let mut stack = ElementStack::default();
        for name in names {
            stack.push(*name);
        }
        stack
    }

    #[test]
    fn close_tag_closes_nested() {
        let mut stack = stack_of(&["div", "ul", "li", "i"]);
        let mut out = String::new();
        stack.close_tag(&mut out, "ul").unwrap();
        assert_eq!(out, "</i></li></ul>");
        assert_eq!(stack.iter().collect::<Vec<_>>(), ["div"]);
    }

    #[test]
    fn close_tag_innermost_match() {
        let mut stack = stack_of(&["ul", "li", "ul", "li"]);
        let mut out = String::new();
        stack.close_tag(&mut out, "ul").unwrap();
        assert_eq!(out, "</li></ul>");
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.last(), Some("li"));
    }

    #[test]
    fn close_tag_missing() {
        let mut stack = stack_of(&["ul", "li"]);
        let mut out = String::new();
        assert!(matches!(
            stack.close_tag(&mut out, "dl"),
            Err(Error::UnbalancedClose(name)) if name == "dl"
        ));
        assert_eq!(out, "");
        assert_eq!(stack.len(), 2, "failed close should not touch the stack");
    }

    #[test]
    fn close_last_and_finish() {
        let mut stack = stack_of(&["ol", "li"]);
        let mut out = String::new();
        stack.close_last(&mut out).unwrap();
        assert_eq!(out, "</li>");
        assert_eq!(stack.get(0), Some("ol"));
        assert_eq!(stack.get(1), None);
        stack.finish(&mut out).unwrap();
        assert_eq!(out, "</li></ol>");
        assert_eq!(stack.len(), 0);
        stack.close_last(&mut out).unwrap();
        assert_eq!(out, "</li></ol>", "closing an empty stack is a no-op");
    }
}
