//! Core data model types for casefile.
//!
//! A [`CaseFile`] is static configuration: suspects with their accepted
//! aliases, and objectives with the rule that judges answers to them. It is
//! built once by the parser and never mutated. [`EvaluationResult`] is the
//! per-call output of the engine.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an objective judges an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveMode {
    /// Name an exact set of suspects, with no decoys.
    MultiSuspect,
    /// Name exactly one suspect from a closed roster.
    SingleSuspect,
    /// No input; the answer is always revealed.
    RevealOnly,
}

impl fmt::Display for ObjectiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveMode::MultiSuspect => write!(f, "multi_suspect"),
            ObjectiveMode::SingleSuspect => write!(f, "single_suspect"),
            ObjectiveMode::RevealOnly => write!(f, "reveal_only"),
        }
    }
}

impl FromStr for ObjectiveMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "multi_suspect" | "multi" => Ok(ObjectiveMode::MultiSuspect),
            "single_suspect" | "single" => Ok(ObjectiveMode::SingleSuspect),
            "reveal_only" | "reveal" => Ok(ObjectiveMode::RevealOnly),
            other => Err(format!("unknown objective mode: {other}")),
        }
    }
}

/// A person who can be named as an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suspect {
    /// Stable key (e.g. "sophia").
    pub id: String,
    /// Canonical full name shown in feedback.
    pub name: String,
    /// Accepted text variants, already normalized, in declared order.
    pub aliases: Vec<String>,
}

impl Suspect {
    /// Aliases made of more than one word (e.g. "rachel harlow").
    pub fn multi_word_aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .iter()
            .map(String::as_str)
            .filter(|alias| alias.contains(' '))
    }

    /// Whether `answer` is exactly one of this suspect's aliases.
    pub fn is_named_by(&self, answer: &str) -> bool {
        self.aliases.iter().any(|alias| alias == answer)
    }
}

/// One selectable puzzle prompt with its own correctness rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    /// Stable identifier, unique within the case.
    pub id: String,
    /// Question shown to the player.
    pub label: String,
    /// The correctness rule for this objective.
    pub rule: ObjectiveRule,
}

impl Objective {
    pub fn mode(&self) -> ObjectiveMode {
        match self.rule {
            ObjectiveRule::MultiSuspect(_) => ObjectiveMode::MultiSuspect,
            ObjectiveRule::SingleSuspect(_) => ObjectiveMode::SingleSuspect,
            ObjectiveRule::RevealOnly { .. } => ObjectiveMode::RevealOnly,
        }
    }

    /// Whether naming `suspect_id` is (part of) a correct answer.
    ///
    /// Always `false` for reveal-only objectives.
    pub fn is_target(&self, suspect_id: &str) -> bool {
        match &self.rule {
            ObjectiveRule::MultiSuspect(rule) => rule.targets.iter().any(|s| s.id == suspect_id),
            ObjectiveRule::SingleSuspect(rule) => rule.target == suspect_id,
            ObjectiveRule::RevealOnly { .. } => false,
        }
    }
}

/// Mode-specific data for an objective.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveRule {
    MultiSuspect(MultiSuspectRule),
    SingleSuspect(SingleSuspectRule),
    RevealOnly { reveal: String },
}

/// Identify every target, and nobody from the decoy list.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSuspectRule {
    /// Suspects that make up the full correct answer.
    pub targets: Vec<Suspect>,
    /// Plausible suspects whose mention disqualifies the answer.
    pub decoys: Vec<Suspect>,
    /// Shown when all targets and no decoys are named.
    pub success: String,
    /// Shown whenever any decoy is named.
    pub decoy_message: String,
    /// Partial-credit hints keyed by the exact set of targets named.
    pub hints: BTreeMap<BTreeSet<String>, String>,
}

impl MultiSuspectRule {
    pub fn hint_for(&self, named: &BTreeSet<String>) -> Option<&str> {
        self.hints.get(named).map(String::as_str)
    }
}

/// Name the one target from a closed roster.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleSuspectRule {
    /// Id of the correct suspect.
    pub target: String,
    /// Candidates in declared order, each with a tailored explanation.
    pub roster: Vec<RosterEntry>,
}

impl SingleSuspectRule {
    /// Every multi-word alias of every roster suspect.
    pub fn multi_word_aliases(&self) -> impl Iterator<Item = &str> {
        self.roster
            .iter()
            .flat_map(|entry| entry.suspect.multi_word_aliases())
    }
}

/// A roster candidate and the message shown when they are named.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub suspect: Suspect,
    pub message: String,
}

/// Generic feedback strings shared by every objective of a case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub no_objective: String,
    pub unknown_objective: String,
    pub multiple_names: String,
    pub incorrect: String,
}

pub const DEFAULT_NO_OBJECTIVE: &str = "Please select an objective first.";
pub const DEFAULT_UNKNOWN_OBJECTIVE: &str = "Please select a valid objective.";
pub const DEFAULT_MULTIPLE_NAMES: &str = "Please guess only one person for this objective.";
pub const DEFAULT_INCORRECT: &str = "Incorrect answer, try again.";

impl Default for Messages {
    fn default() -> Self {
        Self {
            no_objective: DEFAULT_NO_OBJECTIVE.to_string(),
            unknown_objective: DEFAULT_UNKNOWN_OBJECTIVE.to_string(),
            multiple_names: DEFAULT_MULTIPLE_NAMES.to_string(),
            incorrect: DEFAULT_INCORRECT.to_string(),
        }
    }
}

/// A complete puzzle: suspects, objectives, and feedback text.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseFile {
    /// Unique identifier for this case.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Short synopsis.
    pub description: String,
    /// Generic feedback strings.
    pub messages: Messages,
    /// Every suspect in the case, in declared order.
    pub suspects: Vec<Suspect>,
    /// Objectives in declared order.
    pub objectives: Vec<Objective>,
}

impl CaseFile {
    pub fn objective(&self, id: &str) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.id == id)
    }

    pub fn suspect(&self, id: &str) -> Option<&Suspect> {
        self.suspects.iter().find(|s| s.id == id)
    }

    /// Whether `suspect_id` is a correct answer for `objective_id`.
    pub fn is_target(&self, objective_id: &str, suspect_id: &str) -> bool {
        self.objective(objective_id)
            .is_some_and(|o| o.is_target(suspect_id))
    }
}

/// Success/error classification of an evaluation.
///
/// `Error` covers both wrong and malformed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Error => write!(f, "error"),
        }
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" | "correct" => Ok(Outcome::Success),
            "error" | "wrong" => Ok(Outcome::Error),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}

/// What the engine returns for one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub outcome: Outcome,
    /// Narrative text to display as-is.
    pub message: String,
}

impl EvaluationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}
