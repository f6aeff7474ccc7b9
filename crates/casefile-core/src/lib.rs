//! casefile-core: answer evaluation engine for case-file puzzles.
//!
//! This crate defines the case-file data model, the TOML loader, and the
//! pure evaluation engine that judges a player's free-text guess against
//! an objective's suspects and aliases.

pub mod builtin;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod parser;

pub use engine::{AnswerEvaluator, CaseBook};
pub use error::CaseError;
pub use model::{CaseFile, EvaluationResult, ObjectiveMode, Outcome};
