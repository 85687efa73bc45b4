#![forbid(unsafe_code)]

//! Attach/detach notifications between a list editor and its sub-editors.
//!
//! The [`EditorChain`] is supplied by whatever hosts the list editor. It wires
//! a value into a sub-editor (and any editors nested below it), unwires a
//! sub-editor that leaves the list, and reads back the value a sub-editor
//! currently holds.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

/// Callback contract consumed by the list editor.
pub trait EditorChain<T, E> {
    /// Bind `value` to `editor`. Called on insert and on in-place replace.
    fn attach(&mut self, value: &T, editor: &E);

    /// Unbind `editor`. Called on removal and on full detach.
    fn detach(&mut self, editor: &E);

    /// The value `editor` currently holds. Called during flush.
    fn value(&self, editor: &E) -> T;
}

/// A sub-editor that directly holds one value.
pub trait LeafEditor<T> {
    /// Replace the held value.
    fn set_value(&mut self, value: T);

    /// The held value.
    fn value(&self) -> T;
}

/// Chain for shared leaf sub-editors.
///
/// Attach pushes the value into the editor, detach leaves the editor alone,
/// and reading the value asks the editor.
pub struct LeafChain<T> {
    _marker: PhantomData<fn(T) -> T>,
}

impl<T> LeafChain<T> {
    /// Create a leaf chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for LeafChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for LeafChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LeafChain")
    }
}

impl<T, X> EditorChain<T, Rc<RefCell<X>>> for LeafChain<T>
where
    T: Clone,
    X: LeafEditor<T>,
{
    fn attach(&mut self, value: &T, editor: &Rc<RefCell<X>>) {
        editor.borrow_mut().set_value(value.clone());
    }

    fn detach(&mut self, _editor: &Rc<RefCell<X>>) {}

    fn value(&self, editor: &Rc<RefCell<X>>) -> T {
        editor.borrow().value()
    }
}
