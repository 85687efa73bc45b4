#![forbid(unsafe_code)]

//! Synchronization invariant violations.
//!
//! None of the list editor operations report errors: their preconditions are
//! assertions. [`SyncError`] exists so the invariants tying the working copy,
//! the sub-editors, and the backing list together can be checked and
//! reported on demand.

use std::fmt;

/// A broken synchronization invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncError {
    /// The sub-editor list and the working copy have different lengths.
    EditorCountMismatch { editors: usize, elements: usize },
    /// The working copy and the backing list have different lengths.
    BackingLengthMismatch { backing: usize, working: usize },
    /// The working copy holds a different object than the backing list.
    BackingDiverged { index: usize },
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EditorCountMismatch { editors, elements } => write!(
                f,
                "sub-editor count {editors} does not match working copy length {elements}"
            ),
            Self::BackingLengthMismatch { backing, working } => write!(
                f,
                "working copy length {working} does not match backing list length {backing}"
            ),
            Self::BackingDiverged { index } => {
                write!(f, "working copy diverges from backing list at index {index}")
            }
        }
    }
}

impl std::error::Error for SyncError {}
