#![forbid(unsafe_code)]

//! Working copy of a bound list, kept in lockstep with its sub-editors.
//!
//! # Design
//!
//! [`ListEditorWrapper`] owns three parallel structures:
//!
//! - `backing`: the caller's [`BackingList`], identity-significant.
//! - `working`: a mutable mirror of `backing`, edited in place.
//! - `editors`: one sub-editor per working element, index-aligned.
//!
//! The [`EditorSource`] and [`EditorChain`] are owned by the caller and
//! passed into each operation that needs them.
//!
//! # Invariants
//!
//! 1. `editors.len() == working.len()` after every public operation.
//! 2. `editors[i]` edits `working[i]`.
//! 3. After `add` or `remove`, every shifted sub-editor has been told its new
//!    position through [`EditorSource::set_index`] before the chain hears
//!    about the change.
//! 4. After `refresh`, `working` holds exactly the objects in `backing`.
//!
//! # Two-phase construction
//!
//! [`ListEditorWrapper::new`] only snapshots the backing list. Sub-editors
//! are created by a separate [`ListEditorWrapper::attach`] call, so the owner
//! can store the wrapper before any sub-editor exists.

use tracing::{debug_span, trace};

use crate::backing::BackingList;
use crate::chain::EditorChain;
use crate::config::InvariantCheck;
use crate::error::SyncError;
use crate::identity::Identity;
use crate::source::EditorSource;

/// A bound list together with its sub-editors.
#[derive(Debug)]
pub struct ListEditorWrapper<T, E> {
    backing: BackingList<T>,
    working: Vec<T>,
    editors: Vec<E>,
    check: InvariantCheck,
}

impl<T: Clone, E> ListEditorWrapper<T, E> {
    /// Snapshot `backing` into a fresh working copy. No sub-editors exist
    /// until [`attach`](Self::attach) runs.
    #[must_use]
    pub fn new(backing: BackingList<T>) -> Self {
        Self::with_check(backing, InvariantCheck::default())
    }

    /// Like [`new`](Self::new) with an explicit verification policy.
    #[must_use]
    pub fn with_check(backing: BackingList<T>, check: InvariantCheck) -> Self {
        let working = backing.snapshot();
        Self {
            backing,
            working,
            editors: Vec::new(),
            check,
        }
    }

    /// Create one sub-editor per working element and attach each pair to the
    /// chain in index order.
    pub fn attach<S, C>(&mut self, source: &mut S, chain: &mut C)
    where
        S: EditorSource<E>,
        C: EditorChain<T, E>,
    {
        debug_assert!(self.editors.is_empty(), "wrapper attached twice");
        let _span = debug_span!("list_editor.attach", elements = self.working.len()).entered();

        self.editors = source.create_many(self.working.len(), 0);
        self.verify();
        for (value, editor) in self.working.iter().zip(&self.editors) {
            chain.attach(value, editor);
        }
    }

    /// Detach and dispose every sub-editor, in index order.
    ///
    /// The wrapper is consumed: a detached wrapper has nothing left to edit.
    pub fn detach<S, C>(self, source: &mut S, chain: &mut C)
    where
        S: EditorSource<E>,
        C: EditorChain<T, E>,
    {
        let _span = debug_span!("list_editor.detach", editors = self.editors.len()).entered();
        for editor in &self.editors {
            chain.detach(editor);
            source.dispose(editor);
        }
    }

    /// Insert `element` at `index` with a newly created sub-editor.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn add<S, C>(&mut self, source: &mut S, chain: &mut C, index: usize, element: T)
    where
        S: EditorSource<E>,
        C: EditorChain<T, E>,
    {
        let len = self.working.len();
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        self.working.insert(index, element);
        let editor = source.create(index);
        self.editors.insert(index, editor);
        for (position, editor) in self.editors.iter().enumerate().skip(index + 1) {
            source.set_index(editor, position);
        }
        trace!(message = "list_editor.add", index, len = self.working.len());
        chain.attach(&self.working[index], &self.editors[index]);
        self.verify();
    }

    /// Remove and return the working element at `index`, disposing its
    /// sub-editor.
    ///
    /// The returned value comes from the working copy, which may differ from
    /// the backing list until the next [`flush`](Self::flush).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove<S, C>(&mut self, source: &mut S, chain: &mut C, index: usize) -> T
    where
        S: EditorSource<E>,
        C: EditorChain<T, E>,
    {
        let len = self.working.len();
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );
        let element = self.working.remove(index);
        let editor = self.editors.remove(index);
        source.dispose(&editor);
        for (position, shifted) in self.editors.iter().enumerate().skip(index) {
            source.set_index(shifted, position);
        }
        trace!(message = "list_editor.remove", index, len = self.working.len());
        chain.detach(&editor);
        self.verify();
        element
    }

    /// Replace the working element at `index`, reusing its sub-editor.
    /// Returns the previous element.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set<C>(&mut self, chain: &mut C, index: usize, element: T) -> T
    where
        C: EditorChain<T, E>,
    {
        let previous = std::mem::replace(&mut self.working[index], element);
        chain.attach(&self.working[index], &self.editors[index]);
        previous
    }

    /// The backing list this wrapper was built from.
    #[must_use]
    pub const fn backing(&self) -> &BackingList<T> {
        &self.backing
    }

    /// Whether `list` is the very list this wrapper is bound to.
    ///
    /// Identity only: an equal but distinct list is a different value.
    #[must_use]
    pub fn is_same_value(&self, list: &BackingList<T>) -> bool {
        self.backing.is_same(list)
    }

    /// The working copy.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.working
    }

    /// Working element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.working.get(index)
    }

    /// Number of working elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Whether the working copy is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// The sub-editors, index-aligned with [`as_slice`](Self::as_slice).
    #[must_use]
    pub fn editors(&self) -> &[E] {
        &self.editors
    }

    /// Position of `editor` among the sub-editors, by identity.
    #[must_use]
    pub fn index_of_editor(&self, editor: &E) -> Option<usize>
    where
        E: Identity,
    {
        self.editors.iter().position(|candidate| candidate.is_same(editor))
    }

    /// Verify that every working element has exactly one sub-editor.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::EditorCountMismatch`] when the lengths differ.
    pub fn check_invariants(&self) -> Result<(), SyncError> {
        if self.editors.len() == self.working.len() {
            Ok(())
        } else {
            Err(SyncError::EditorCountMismatch {
                editors: self.editors.len(),
                elements: self.working.len(),
            })
        }
    }

    fn verify(&self) {
        if self.check.enabled()
            && let Err(err) = self.check_invariants()
        {
            panic!("list editor out of sync: {err}");
        }
    }
}

impl<T: Clone + Identity, E> ListEditorWrapper<T, E> {
    /// Copy edited values out of the sub-editors, then overwrite the backing
    /// list with the working copy.
    ///
    /// A slot is replaced only when its sub-editor reports a different object
    /// (by identity) than the working copy holds.
    pub fn flush<C>(&mut self, chain: &C)
    where
        C: EditorChain<T, E>,
    {
        let _span = debug_span!(
            "list_editor.flush",
            elements = self.working.len(),
            replaced = tracing::field::Empty
        )
        .entered();

        let mut replaced = 0_u64;
        for (slot, editor) in self.working.iter_mut().zip(&self.editors) {
            let current = chain.value(editor);
            if !current.is_same(slot) {
                *slot = current;
                replaced += 1;
            }
        }
        tracing::Span::current().record("replaced", replaced);
        self.backing.replace_contents(&self.working);
    }

    /// Bring the working copy and sub-editors in line with a backing list
    /// that changed out-of-band.
    ///
    /// Sub-editors are reused by position: existing slots are overwritten in
    /// place, missing slots are appended, and surplus slots are removed from
    /// the tail.
    pub fn refresh<S, C>(&mut self, source: &mut S, chain: &mut C)
    where
        S: EditorSource<E>,
        C: EditorChain<T, E>,
    {
        let incoming = self.backing.snapshot();
        let _span = debug_span!(
            "list_editor.refresh",
            before = self.working.len(),
            after = incoming.len()
        )
        .entered();

        let target = incoming.len();
        for (index, value) in incoming.into_iter().enumerate() {
            if index < self.working.len() {
                self.set(chain, index, value);
            } else {
                self.add(source, chain, index, value);
            }
        }
        while self.working.len() > target {
            let last = self.working.len() - 1;
            self.remove(source, chain, last);
        }

        if self.check.enabled()
            && let Err(err) = self.check_matches_backing()
        {
            panic!("list editor refresh left the working copy stale: {err}");
        }
    }

    /// Verify that the working copy holds exactly the backing list's objects.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::BackingLengthMismatch`] or
    /// [`SyncError::BackingDiverged`] for the first difference found.
    pub fn check_matches_backing(&self) -> Result<(), SyncError> {
        self.backing.with(|backing| {
            if backing.len() != self.working.len() {
                return Err(SyncError::BackingLengthMismatch {
                    backing: backing.len(),
                    working: self.working.len(),
                });
            }
            match backing
                .iter()
                .zip(&self.working)
                .position(|(expected, actual)| !expected.is_same(actual))
            {
                Some(index) => Err(SyncError::BackingDiverged { index }),
                None => Ok(()),
            }
        })
    }
}
