#![forbid(unsafe_code)]

//! List editor configuration.
//!
//! ```
//! use ftui_editor::{InvariantCheck, ListEditorConfig};
//!
//! let config = ListEditorConfig::default().invariant_check(InvariantCheck::Always);
//! assert!(config.checks_invariants());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When the synchronization invariants are verified.
///
/// A failed verification panics: the invariants are preconditions of every
/// later operation, so continuing would corrupt the editor hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InvariantCheck {
    /// Never verify.
    Never,
    /// Verify in builds with debug assertions enabled.
    #[default]
    DebugOnly,
    /// Always verify.
    Always,
}

impl InvariantCheck {
    /// Whether verification runs in the current build.
    #[must_use]
    pub const fn enabled(self) -> bool {
        match self {
            Self::Never => false,
            Self::DebugOnly => cfg!(debug_assertions),
            Self::Always => true,
        }
    }
}

/// Configuration for a [`ListEditor`](crate::ListEditor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListEditorConfig {
    /// Verification policy for the synchronization invariants.
    pub invariant_check: InvariantCheck,
}

impl ListEditorConfig {
    /// Set the verification policy.
    #[must_use]
    pub const fn invariant_check(mut self, check: InvariantCheck) -> Self {
        self.invariant_check = check;
        self
    }

    /// Whether invariants are verified in the current build.
    #[must_use]
    pub const fn checks_invariants(&self) -> bool {
        self.invariant_check.enabled()
    }
}
