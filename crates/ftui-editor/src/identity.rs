#![forbid(unsafe_code)]

//! Reference identity for list elements and sub-editors.
//!
//! The list editor never asks whether two values are *equal*; it asks whether
//! they are the *same object*. A backing list is reused only when the caller
//! hands back the very same handle, and [`flush`] only overwrites a slot when
//! the sub-editor reports a different object than the one it was given.
//!
//! Shared pointers carry identity natively. Plain value types opt in through
//! [`Tagged`], which stamps each freshly constructed value with a unique tag
//! that survives cloning.
//!
//! [`flush`]: crate::ListEditorWrapper::flush

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Reference identity comparison.
///
/// `a.is_same(&b)` is true only when both denote the same underlying object.
/// Two values with identical contents but separate origins are not the same.
pub trait Identity {
    /// Whether `self` and `other` denote the same object.
    fn is_same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Rc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized> Identity for Arc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

/// A value stamped with a process-unique identity tag.
///
/// Cloning preserves the tag, so a clone is the same object as its source.
/// Constructing a new `Tagged` always yields a distinct object, even for an
/// equal payload.
#[derive(Clone)]
pub struct Tagged<T> {
    tag: u64,
    value: T,
}

impl<T> Tagged<T> {
    /// Wrap `value` under a fresh tag.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            tag: NEXT_TAG.fetch_add(1, Ordering::Relaxed),
            value,
        }
    }

    /// The identity tag.
    #[must_use]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Borrow the payload.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Unwrap the payload, discarding its identity.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Identity for Tagged<T> {
    fn is_same(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl<T> Deref for Tagged<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Tagged<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{:?}", self.tag, self.value)
    }
}
