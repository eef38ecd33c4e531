//! Command Conversion and Alias Substitution Errors
//!
//! These signal contract violations: a tree the segmenter cannot trust, or a
//! token that does not belong to the command it is applied to. Ordinary
//! incomplete input never produces them.

use crate::ast::types::NodeKind;
use crate::command::types::Command;
use thiserror::Error;

/// A subtree breaks a structural invariant the segmenter relies on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertCommandError {
    #[error("Cannot convert {kind} node at {start}..{end} into a command")]
    NotAStatement {
        kind: NodeKind,
        start: usize,
        end: usize,
    },

    #[error("Assignment list at {start}..{end} has has_command={has_command} but its children disagree")]
    InconsistentAssignmentList {
        has_command: bool,
        start: usize,
        end: usize,
    },
}

/// A token handed to alias substitution does not match its command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubstituteAliasError {
    #[error("Token at {start}..{end} lies outside the command span {tree_start}..{tree_end}")]
    OutOfRange {
        start: usize,
        end: usize,
        tree_start: usize,
        tree_end: usize,
    },

    #[error("Stale token at {start}..{end}: expected {expected:?}, buffer has {found:?}")]
    TextMismatch {
        start: usize,
        end: usize,
        expected: String,
        found: String,
    },

    #[error("Token {text:?} at {start}..{end} is not one of the command's tokens")]
    UnknownToken {
        text: String,
        start: usize,
        end: usize,
    },

    #[error(transparent)]
    Convert(#[from] ConvertCommandError),
}

/// Failure of `get_command` or `get_all_commands_with_alias`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The parsed buffer could not be split into commands.
    #[error("Cannot segment buffer: {0}")]
    Segment(#[from] ConvertCommandError),

    /// Alias expansion failed; `command` is the selected command before
    /// expansion.
    #[error("Cannot expand aliases: {source}")]
    Expand {
        command: Box<Command>,
        #[source]
        source: SubstituteAliasError,
    },
}
