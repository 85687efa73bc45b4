#![forbid(unsafe_code)]

//! Caller-owned backing list handle.
//!
//! # Design
//!
//! [`BackingList<T>`] wraps a `Vec<T>` in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Cloning a handle yields another handle to the **same**
//! list. The list editor keys reuse-vs-replace decisions on handle identity,
//! never on contents.
//!
//! # Failure Modes
//!
//! - **Re-entrant mutation**: calling [`BackingList::update`] from inside a
//!   [`BackingList::with`] closure on the same list panics (RefCell borrow
//!   rules).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::identity::Identity;

/// A shared, identity-significant list owned by the caller.
pub struct BackingList<T> {
    inner: Rc<RefCell<Vec<T>>>,
}

// Manual Clone: shares the same Rc.
impl<T> Clone for BackingList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for BackingList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackingList")
            .field("items", &*self.inner.borrow())
            .field("handles", &Rc::strong_count(&self.inner))
            .finish()
    }
}

impl<T> Default for BackingList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for BackingList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> BackingList<T> {
    /// Create a new list. Every call produces a distinct identity.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(items)),
        }
    }

    /// Number of elements currently in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Access the elements by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Mutate the list in place.
    ///
    /// Changes made here are out-of-band for any bound list editor: they
    /// become visible to it on the next `set_value` of this same handle.
    pub fn update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }
}

impl<T: Clone> BackingList<T> {
    /// Clone the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.borrow().clone()
    }

    /// Element at `index`, cloned.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.borrow().get(index).cloned()
    }

    /// Replace the whole contents: clear, then copy `items` in order.
    pub fn replace_contents(&self, items: &[T]) {
        let mut list = self.inner.borrow_mut();
        list.clear();
        list.extend_from_slice(items);
    }
}

impl<T> Identity for BackingList<T> {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage_and_identity() {
        let a = BackingList::new(vec![1, 2]);
        let b = a.clone();
        b.update(|v| v.push(3));
        assert_eq!(a.snapshot(), vec![1, 2, 3]);
        assert!(a.is_same(&b));
    }

    #[test]
    fn equal_contents_are_distinct_lists() {
        let a = BackingList::new(vec!["x"]);
        let b = BackingList::new(vec!["x"]);
        assert_eq!(a.snapshot(), b.snapshot());
        assert!(!a.is_same(&b));
    }

    #[test]
    fn replace_contents_clears_then_copies() {
        let list = BackingList::new(vec![9, 9, 9, 9]);
        list.replace_contents(&[1, 2]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some(1));
        assert_eq!(list.get(2), None);
        list.replace_contents(&[]);
        assert!(list.is_empty());
    }

    #[test]
    fn with_reads_without_cloning() {
        let list = BackingList::from(vec![String::from("a"), String::from("bc")]);
        let total: usize = list.with(|items| items.iter().map(String::len).sum());
        assert_eq!(total, 3);
    }
}
