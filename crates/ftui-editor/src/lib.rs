#![forbid(unsafe_code)]

//! List editing: one sub-editor per element, kept in lockstep with the list.
//!
//! # Role in FrankenTUI
//! `ftui-editor` binds a caller-owned list to a sequence of sub-editors
//! (one per element) and keeps the two aligned while elements are inserted,
//! removed, replaced, flushed back, or refreshed from an out-of-band change.
//!
//! # Primary pieces
//! - **[`EditorSource`]**: creates, renumbers, and disposes sub-editors.
//! - **[`EditorChain`]**: host callbacks that wire values into sub-editors.
//! - **[`ListEditorWrapper`]**: the working copy and its index-aligned
//!   sub-editors.
//! - **[`ListEditor`]**: the bound/unbound state machine exposed to owners.
//!
//! # Identity
//! Reuse decisions compare *identity*, never contents. See [`Identity`],
//! [`Tagged`], and [`BackingList`].
//!
//! # Threading
//! Everything here is single-threaded: handles are `Rc`-based and each
//! operation runs to completion before the next begins.

pub mod backing;
pub mod chain;
pub mod config;
pub mod error;
pub mod identity;
pub mod list_editor;
pub mod source;
pub mod wrapper;

pub use backing::BackingList;
pub use chain::{EditorChain, LeafChain, LeafEditor};
pub use config::{InvariantCheck, ListEditorConfig};
pub use error::SyncError;
pub use identity::{Identity, Tagged};
pub use list_editor::{ListEdit, ListEditor};
pub use source::{EditorSource, FnSource};
pub use wrapper::ListEditorWrapper;
