//! Code generation errors.

use thiserror::Error;

use brickc_values::{KindMask, ValueKind};

use crate::loc::SourceLoc;
use crate::vm::Label;

/// Errors that can occur during code generation.
///
/// These are reported to the sink as they happen; emission carries on so
/// that one run surfaces as many problems as possible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Every temporary slot is in use.
    #[error("{loc}: expression too complex, no temporary variable available")]
    NoTempAvailable { loc: SourceLoc },

    /// The value cannot be moved into any kind the consumer accepts.
    #[error("{loc}: a {kind} value cannot be used where only {allowed:?} is accepted")]
    UnsatisfiableMask {
        loc: SourceLoc,
        kind: ValueKind,
        allowed: KindMask,
    },

    /// The target of an assignment is not a variable.
    #[error("{loc}: left side of assignment is not a variable")]
    NotAnLValue { loc: SourceLoc },

    /// An inline expansion was given the wrong number of arguments.
    #[error("{loc}: expected {expected} argument(s), found {found}")]
    ArityMismatch {
        loc: SourceLoc,
        expected: usize,
        found: usize,
    },

    /// A branch refers to a label that was never placed.
    #[error("label {label} is used but never bound")]
    UnboundLabel { label: Label },

    /// A label was placed twice.
    #[error("label {label} is bound more than once")]
    LabelRebound { label: Label },
}

impl CompileError {
    /// Source position the error points at, if it has one.
    pub fn loc(&self) -> Option<SourceLoc> {
        match self {
            CompileError::NoTempAvailable { loc }
            | CompileError::UnsatisfiableMask { loc, .. }
            | CompileError::NotAnLValue { loc }
            | CompileError::ArityMismatch { loc, .. } => Some(*loc),
            CompileError::UnboundLabel { .. } | CompileError::LabelRebound { .. } => None,
        }
    }
}
