#![forbid(unsafe_code)]

//! List editor: binds a [`BackingList`] to one sub-editor per element.
//!
//! # State machine
//!
//! A [`ListEditor`] is either *unbound* (editing nothing) or *bound* to
//! exactly one [`ListEditorWrapper`].
//!
//! | Current | `set_value(..)`            | Effect                                  |
//! |---------|----------------------------|-----------------------------------------|
//! | unbound | `None`                     | nothing                                 |
//! | bound   | `Some(same handle)`        | refresh the existing wrapper in place   |
//! | any     | `Some(other handle)`       | detach the old wrapper, attach a new one |
//! | bound   | `None`                     | detach the old wrapper                  |
//!
//! Refreshing keeps sub-editor identity and state across redundant sets.
//! Replacing fully unwires every old sub-editor before the first new one is
//! created.
//!
//! # Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use ftui_editor::{BackingList, FnSource, LeafChain, LeafEditor, ListEditor, Tagged};
//!
//! #[derive(Default)]
//! struct Field(Option<Tagged<String>>);
//!
//! impl LeafEditor<Tagged<String>> for Field {
//!     fn set_value(&mut self, value: Tagged<String>) {
//!         self.0 = Some(value);
//!     }
//!     fn value(&self) -> Tagged<String> {
//!         self.0.clone().expect("attached")
//!     }
//! }
//!
//! let source = FnSource::new(|_| Rc::new(RefCell::new(Field::default())));
//! let mut editor = ListEditor::new(source, LeafChain::new());
//!
//! let names = BackingList::new(vec![Tagged::new("ada".to_string())]);
//! editor.set_value(Some(names.clone()));
//! editor.editors()[0].borrow_mut().0 = Some(Tagged::new("grace".to_string()));
//! editor.flush();
//!
//! assert_eq!(names.get(0).map(|n| n.get().clone()), Some("grace".to_string()));
//! assert_eq!(editor.path_element(&editor.editors()[0]), Some("[0]".to_string()));
//! ```

use std::fmt;

use tracing::debug;

use crate::backing::BackingList;
use crate::chain::EditorChain;
use crate::config::ListEditorConfig;
use crate::error::SyncError;
use crate::identity::Identity;
use crate::source::EditorSource;
use crate::wrapper::ListEditorWrapper;

/// Edits a list by delegating each element to its own sub-editor.
pub struct ListEditor<T, E, S, C> {
    source: S,
    chain: C,
    config: ListEditorConfig,
    list: Option<ListEditorWrapper<T, E>>,
}

impl<T, E, S, C> ListEditor<T, E, S, C>
where
    T: Clone + Identity,
    S: EditorSource<E>,
    C: EditorChain<T, E>,
{
    /// Create an unbound list editor.
    #[must_use]
    pub fn new(source: S, chain: C) -> Self {
        Self::with_config(source, chain, ListEditorConfig::default())
    }

    /// Create an unbound list editor with explicit configuration.
    #[must_use]
    pub fn with_config(source: S, chain: C, config: ListEditorConfig) -> Self {
        Self {
            source,
            chain,
            config,
            list: None,
        }
    }

    /// Bind a list, rebind the same list, or unbind.
    ///
    /// Passing the handle that is already bound refreshes the existing
    /// sub-editors in place. Any other value first detaches every current
    /// sub-editor, then binds the new list (if any).
    pub fn set_value(&mut self, value: Option<BackingList<T>>) {
        if self.list.is_none() && value.is_none() {
            debug!(message = "list_editor.set_value", transition = "unbound");
            return;
        }

        if let (Some(wrapper), Some(list)) = (self.list.as_mut(), value.as_ref())
            && wrapper.is_same_value(list)
        {
            debug!(
                message = "list_editor.set_value",
                transition = "refresh",
                len = list.len()
            );
            wrapper.refresh(&mut self.source, &mut self.chain);
            return;
        }

        if let Some(previous) = self.list.take() {
            previous.detach(&mut self.source, &mut self.chain);
        }

        let Some(list) = value else {
            debug!(message = "list_editor.set_value", transition = "clear");
            return;
        };
        debug!(
            message = "list_editor.set_value",
            transition = "replace",
            len = list.len()
        );
        let wrapper = self.list.insert(ListEditorWrapper::with_check(
            list,
            self.config.invariant_check,
        ));
        wrapper.attach(&mut self.source, &mut self.chain);
    }

    /// Copy sub-editor values back into the bound list. No-op when unbound.
    pub fn flush(&mut self) {
        if let Some(wrapper) = self.list.as_mut() {
            wrapper.flush(&self.chain);
        }
    }

    /// A short-lived sub-editor for structural traversal, straight from the
    /// source. The bound list, if any, is not touched.
    pub fn create_editor_for_traversal(&mut self) -> E {
        self.source.create_editor_for_traversal()
    }

    /// Mutable view of the working copy. Every change is mirrored in the
    /// sub-editors. `None` when unbound.
    pub fn list_mut(&mut self) -> Option<ListEdit<'_, T, E, S, C>> {
        let wrapper = self.list.as_mut()?;
        Some(ListEdit {
            wrapper,
            source: &mut self.source,
            chain: &mut self.chain,
        })
    }
}

impl<T: Clone, E, S, C> ListEditor<T, E, S, C> {
    /// The bound list handle, if any.
    #[must_use]
    pub fn value(&self) -> Option<&BackingList<T>> {
        self.list.as_ref().map(ListEditorWrapper::backing)
    }

    /// Whether a list is bound.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.list.is_some()
    }

    /// The working copy, or `None` when unbound.
    ///
    /// Elements should be edited through their sub-editors; structural
    /// changes go through [`list_mut`](Self::list_mut).
    #[must_use]
    pub fn list(&self) -> Option<&[T]> {
        self.list.as_ref().map(ListEditorWrapper::as_slice)
    }

    /// Current sub-editors. Empty when unbound.
    #[must_use]
    pub fn editors(&self) -> &[E] {
        match &self.list {
            Some(wrapper) => wrapper.editors(),
            None => &[],
        }
    }

    /// Path segment (`"[i]"`) locating `editor` in the list, by identity.
    #[must_use]
    pub fn path_element(&self, editor: &E) -> Option<String>
    where
        E: Identity,
    {
        let index = self.list.as_ref()?.index_of_editor(editor)?;
        Some(format!("[{index}]"))
    }

    /// Verify the bound wrapper's invariants. Always `Ok` when unbound.
    ///
    /// # Errors
    ///
    /// Returns the first broken invariant.
    pub fn check_invariants(&self) -> Result<(), SyncError> {
        self.list
            .as_ref()
            .map_or(Ok(()), ListEditorWrapper::check_invariants)
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &ListEditorConfig {
        &self.config
    }

    /// The sub-editor source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The sub-editor source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The editor chain.
    #[must_use]
    pub const fn chain(&self) -> &C {
        &self.chain
    }

    /// The editor chain, mutably.
    pub fn chain_mut(&mut self) -> &mut C {
        &mut self.chain
    }
}

impl<T: fmt::Debug, E: fmt::Debug, S, C> fmt::Debug for ListEditor<T, E, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListEditor")
            .field("config", &self.config)
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

/// Mutable view over a bound list editor's working copy.
///
/// Structural edits create, renumber, and dispose sub-editors as needed.
pub struct ListEdit<'a, T, E, S, C> {
    wrapper: &'a mut ListEditorWrapper<T, E>,
    source: &'a mut S,
    chain: &'a mut C,
}

impl<T, E, S, C> ListEdit<'_, T, E, S, C>
where
    T: Clone,
    S: EditorSource<E>,
    C: EditorChain<T, E>,
{
    /// Insert `element` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn add(&mut self, index: usize, element: T) {
        self.wrapper.add(&mut *self.source, &mut *self.chain, index, element);
    }

    /// Append `element`.
    pub fn push(&mut self, element: T) {
        let len = self.wrapper.len();
        self.add(len, element);
    }

    /// Append every element of `elements`, in order.
    pub fn extend(&mut self, elements: impl IntoIterator<Item = T>) {
        for element in elements {
            self.push(element);
        }
    }

    /// Remove and return the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        self.wrapper.remove(&mut *self.source, &mut *self.chain, index)
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.wrapper.len().checked_sub(1)?;
        Some(self.remove(last))
    }

    /// Remove every element, last first.
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    /// Replace the element at `index`, keeping its sub-editor. Returns the
    /// previous element.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize, element: T) -> T {
        self.wrapper.set(&mut *self.chain, index, element)
    }

    /// Element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.wrapper.get(index)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wrapper.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wrapper.is_empty()
    }

    /// Iterate over the working copy.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.wrapper.as_slice().iter()
    }

    /// Current sub-editors.
    #[must_use]
    pub fn editors(&self) -> &[E] {
        self.wrapper.editors()
    }
}

impl<T: fmt::Debug, E: fmt::Debug, S, C> fmt::Debug for ListEdit<'_, T, E, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListEdit")
            .field("wrapper", &self.wrapper)
            .finish_non_exhaustive()
    }
}
