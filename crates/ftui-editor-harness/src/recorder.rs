#![forbid(unsafe_code)]

//! Recording source, chain, and sub-editor probes.
//!
//! Every callback the list editor makes lands in a shared [`Journal`] in call
//! order, so tests can assert on exact sequencing (create before renumber,
//! renumber before attach, detach before the next create, ...).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use ftui_editor::{EditorChain, EditorSource, Identity, ListEditor, ListEditorConfig};
use tracing::trace;

/// A list element with reference identity and a readable label.
///
/// Equality compares labels; [`Identity`] compares the allocation.
#[derive(Clone)]
pub struct Item(Rc<str>);

impl Item {
    /// A fresh item. Each call is a distinct object.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self(Rc::from(label))
    }

    /// The label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.0
    }
}

/// Shorthand for [`Item::new`].
#[must_use]
pub fn item(label: &str) -> Item {
    Item::new(label)
}

/// Fresh items for each label, in order.
#[must_use]
pub fn items(labels: &[&str]) -> Vec<Item> {
    labels.iter().copied().map(Item::new).collect()
}

/// Labels of `items`, in order.
#[must_use]
pub fn labels(items: &[Item]) -> Vec<String> {
    items.iter().map(|i| i.label().to_string()).collect()
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Item {}

impl Identity for Item {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

/// One recorded callback. `serial` numbers probes in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Create { serial: usize, index: usize },
    SetIndex { serial: usize, index: usize },
    Dispose { serial: usize },
    Attach { serial: usize, value: Item },
    Detach { serial: usize },
}

/// Shared, ordered log of [`Event`]s.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    events: Rc<RefCell<Vec<Event>>>,
}

impl Journal {
    fn push(&self, event: Event) {
        trace!(message = "harness.event", ?event);
        self.events.borrow_mut().push(event);
    }

    /// All events so far.
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Drain all events so far.
    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of events matching `pred`.
    #[must_use]
    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    /// Position of the first event matching `pred`.
    #[must_use]
    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events.borrow().iter().position(pred)
    }

    /// Position of the last event matching `pred`.
    #[must_use]
    pub fn last_position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events.borrow().iter().rposition(pred)
    }
}

/// State behind a [`Probe`].
#[derive(Debug)]
pub struct ProbeState {
    serial: usize,
    index: Cell<usize>,
    value: RefCell<Option<Item>>,
    attached: Cell<bool>,
    disposals: Cell<u32>,
}

impl ProbeState {
    /// Creation order among all probes of one source.
    #[must_use]
    pub fn serial(&self) -> usize {
        self.serial
    }

    /// Last position the source reported.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// Value currently held.
    #[must_use]
    pub fn value(&self) -> Option<Item> {
        self.value.borrow().clone()
    }

    /// Replace the held value, as a user typing into the sub-editor would.
    pub fn edit(&self, value: Item) {
        *self.value.borrow_mut() = Some(value);
    }

    /// Whether the chain attached and has not since detached this probe.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// How many times the source disposed this probe.
    #[must_use]
    pub fn disposals(&self) -> u32 {
        self.disposals.get()
    }
}

/// Sub-editor handle produced by [`RecordingSource`].
pub type Probe = Rc<ProbeState>;

/// [`EditorSource`] that journals every call.
#[derive(Debug, Default)]
pub struct RecordingSource {
    journal: Journal,
    next_serial: usize,
}

impl RecordingSource {
    /// A source writing into `journal`.
    #[must_use]
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            next_serial: 0,
        }
    }

    /// Probes created so far.
    #[must_use]
    pub fn created(&self) -> usize {
        self.next_serial
    }
}

impl EditorSource<Probe> for RecordingSource {
    fn create(&mut self, index: usize) -> Probe {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.journal.push(Event::Create { serial, index });
        Rc::new(ProbeState {
            serial,
            index: Cell::new(index),
            value: RefCell::new(None),
            attached: Cell::new(false),
            disposals: Cell::new(0),
        })
    }

    fn dispose(&mut self, editor: &Probe) {
        editor.disposals.set(editor.disposals.get() + 1);
        self.journal.push(Event::Dispose {
            serial: editor.serial,
        });
    }

    fn set_index(&mut self, editor: &Probe, index: usize) {
        editor.index.set(index);
        self.journal.push(Event::SetIndex {
            serial: editor.serial,
            index,
        });
    }
}

/// [`EditorChain`] that journals every call and stores values in probes.
#[derive(Debug, Default)]
pub struct RecordingChain {
    journal: Journal,
}

impl RecordingChain {
    /// A chain writing into `journal`.
    #[must_use]
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl EditorChain<Item, Probe> for RecordingChain {
    fn attach(&mut self, value: &Item, editor: &Probe) {
        editor.edit(value.clone());
        editor.attached.set(true);
        self.journal.push(Event::Attach {
            serial: editor.serial,
            value: value.clone(),
        });
    }

    fn detach(&mut self, editor: &Probe) {
        editor.attached.set(false);
        self.journal.push(Event::Detach {
            serial: editor.serial,
        });
    }

    fn value(&self, editor: &Probe) -> Item {
        editor
            .value()
            .unwrap_or_else(|| panic!("probe {} read before attach", editor.serial))
    }
}

/// List editor wired to a recording source and chain.
pub type RecordingEditor = ListEditor<Item, Probe, RecordingSource, RecordingChain>;

/// A recording list editor and the journal it writes to.
#[must_use]
pub fn recording_editor(config: ListEditorConfig) -> (RecordingEditor, Journal) {
    let journal = Journal::default();
    let editor = ListEditor::with_config(
        RecordingSource::new(journal.clone()),
        RecordingChain::new(journal.clone()),
        config,
    );
    (editor, journal)
}

/// Assert that every live probe knows its position, is attached, and has
/// not been disposed.
///
/// # Panics
///
/// Panics describing the first misaligned probe.
pub fn assert_aligned(editor: &RecordingEditor) {
    if let Err(err) = editor.check_invariants() {
        panic!("{err}");
    }
    for (position, probe) in editor.editors().iter().enumerate() {
        assert_eq!(
            probe.index(),
            position,
            "probe {} reports a stale index",
            probe.serial()
        );
        assert!(probe.is_attached(), "probe {} is detached", probe.serial());
        assert_eq!(probe.disposals(), 0, "probe {} was disposed", probe.serial());
    }
}
