#![forbid(unsafe_code)]

//! Sub-editor factory contract.
//!
//! An [`EditorSource`] creates one sub-editor per list position, is told when
//! an existing sub-editor's position shifts, and releases sub-editors that
//! leave the list. Implementations typically live exactly as long as the
//! [`ListEditor`](crate::ListEditor) that owns them.

/// Creates, renumbers, and disposes sub-editors keyed by list position.
pub trait EditorSource<E> {
    /// Create a sub-editor for position `index`.
    fn create(&mut self, index: usize) -> E;

    /// Create `count` sub-editors for positions `index..index + count`.
    ///
    /// The default calls [`create`](Self::create) once per position, in
    /// ascending order. Overrides may batch the work but must preserve both
    /// the count and the ordering.
    fn create_many(&mut self, count: usize, index: usize) -> Vec<E> {
        let mut editors = Vec::with_capacity(count);
        for offset in 0..count {
            editors.push(self.create(index + offset));
        }
        editors
    }

    /// Release a sub-editor previously returned by `create`.
    fn dispose(&mut self, _editor: &E) {}

    /// Tell a sub-editor that it now lives at `index`.
    fn set_index(&mut self, _editor: &E, _index: usize) {}

    /// Produce a short-lived sub-editor for structural traversal.
    ///
    /// The default creates an editor for position 0 and disposes it before
    /// returning it. Callers must not assume it is wired to any live index.
    fn create_editor_for_traversal(&mut self) -> E {
        let editor = self.create(0);
        self.dispose(&editor);
        editor
    }
}

type CreateFn<E> = Box<dyn FnMut(usize) -> E>;
type DisposeFn<E> = Box<dyn FnMut(&E)>;
type SetIndexFn<E> = Box<dyn FnMut(&E, usize)>;

/// An [`EditorSource`] assembled from closures.
///
/// ```
/// use ftui_editor::{EditorSource, FnSource};
///
/// let mut source = FnSource::new(|index| format!("row-{index}"));
/// assert_eq!(source.create_many(2, 3), vec!["row-3", "row-4"]);
/// ```
pub struct FnSource<E> {
    create: CreateFn<E>,
    dispose: Option<DisposeFn<E>>,
    set_index: Option<SetIndexFn<E>>,
}

impl<E> FnSource<E> {
    /// Create a source from a factory closure. Dispose and renumbering are
    /// no-ops until configured.
    #[must_use]
    pub fn new(create: impl FnMut(usize) -> E + 'static) -> Self {
        Self {
            create: Box::new(create),
            dispose: None,
            set_index: None,
        }
    }

    /// Run `f` whenever a sub-editor is disposed.
    #[must_use]
    pub fn on_dispose(mut self, f: impl FnMut(&E) + 'static) -> Self {
        self.dispose = Some(Box::new(f));
        self
    }

    /// Run `f` whenever a sub-editor's position changes.
    #[must_use]
    pub fn on_set_index(mut self, f: impl FnMut(&E, usize) + 'static) -> Self {
        self.set_index = Some(Box::new(f));
        self
    }
}

impl<E> EditorSource<E> for FnSource<E> {
    fn create(&mut self, index: usize) -> E {
        (self.create)(index)
    }

    fn dispose(&mut self, editor: &E) {
        if let Some(dispose) = self.dispose.as_mut() {
            dispose(editor);
        }
    }

    fn set_index(&mut self, editor: &E, index: usize) {
        if let Some(set_index) = self.set_index.as_mut() {
            set_index(editor, index);
        }
    }
}

impl<E> std::fmt::Debug for FnSource<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource")
            .field("dispose", &self.dispose.is_some())
            .field("set_index", &self.set_index.is_some())
            .finish_non_exhaustive()
    }
}
