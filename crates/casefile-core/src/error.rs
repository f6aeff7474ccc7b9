//! Case-file error types.
//!
//! These represent structural problems in a case file that make it unusable
//! for evaluation, plus lookups of cases that do not exist. Evaluation itself
//! never fails; wrong or malformed answers are an `Outcome::Error` result.

use thiserror::Error;

/// Errors raised while building or looking up case files.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaseError {
    /// No case with this id is loaded.
    #[error("case not found: {0}")]
    CaseNotFound(String),

    /// Two case files share an id.
    #[error("duplicate case ID: {0}")]
    DuplicateCase(String),

    /// Two suspects share an id.
    #[error("duplicate suspect ID: {0}")]
    DuplicateSuspect(String),

    /// Two objectives share an id.
    #[error("duplicate objective ID: {0}")]
    DuplicateObjective(String),

    /// An objective refers to a suspect that is not declared.
    #[error("objective {objective}: unknown suspect '{suspect}'")]
    UnknownSuspect { objective: String, suspect: String },

    /// An objective mode string did not parse.
    #[error("objective {objective}: {message}")]
    UnknownMode { objective: String, message: String },

    /// A mode-specific field is missing or empty.
    #[error("objective {objective}: missing required field '{field}'")]
    MissingField {
        objective: String,
        field: &'static str,
    },

    /// An alias is empty after normalization.
    #[error("suspect {suspect}: empty alias")]
    EmptyAlias { suspect: String },

    /// A suspect lists the same alias twice.
    #[error("suspect {suspect}: alias '{alias}' listed more than once")]
    RepeatedAlias { suspect: String, alias: String },

    /// Two suspects claim the same alias.
    #[error("alias '{alias}' is claimed by both {first} and {second}")]
    SharedAlias {
        alias: String,
        first: String,
        second: String,
    },

    /// A suspect appears twice in one roster, or as both target and decoy.
    #[error("objective {objective}: suspect '{suspect}' listed more than once")]
    RepeatedSuspect { objective: String, suspect: String },

    /// A single-suspect target has no roster entry.
    #[error("objective {objective}: target '{target}' is not on the roster")]
    TargetNotOnRoster { objective: String, target: String },

    /// A multi-suspect hint is malformed.
    #[error("objective {objective}: invalid hint: {reason}")]
    InvalidHint { objective: String, reason: String },

    /// A partial combination of targets has no hint.
    #[error("objective {objective}: no hint for {suspects}")]
    MissingHint { objective: String, suspects: String },

    /// Too many targets to enumerate every partial combination.
    #[error("objective {objective}: {count} targets exceeds the limit of {limit}")]
    TooManyTargets {
        objective: String,
        count: usize,
        limit: usize,
    },
}
