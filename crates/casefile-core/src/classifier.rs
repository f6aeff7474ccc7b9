//! Per-mode answer classification.
//!
//! Each function here is pure: it takes the objective's rule plus what was
//! resolved from the normalized answer and returns the feedback to show.

use std::collections::BTreeSet;

use crate::matcher::{contains_alias, resolve_mentions};
use crate::model::{EvaluationResult, Messages, MultiSuspectRule, SingleSuspectRule};

/// Judge a multi-suspect answer from the targets and decoys it mentions.
///
/// A decoy mention overrides any partial credit. Partial answers get the
/// hint authored for exactly that set of targets.
pub fn classify_multi_suspect(
    rule: &MultiSuspectRule,
    messages: &Messages,
    named_targets: &BTreeSet<String>,
    named_decoys: &BTreeSet<String>,
) -> EvaluationResult {
    if !named_decoys.is_empty() {
        return EvaluationResult::error(&rule.decoy_message);
    }

    if named_targets.is_empty() {
        return EvaluationResult::error(&messages.incorrect);
    }

    if named_targets.len() == rule.targets.len() {
        return EvaluationResult::success(&rule.success);
    }

    match rule.hint_for(named_targets) {
        Some(hint) => EvaluationResult::error(hint),
        None => {
            tracing::warn!(
                "no hint authored for {:?}, falling back to the incorrect message",
                named_targets
            );
            EvaluationResult::error(&messages.incorrect)
        }
    }
}

/// Whether a single-suspect answer names more than one person.
///
/// Commas always count as a list. A space counts unless the answer contains
/// one of the roster's own multi-word aliases (e.g. "rachel harlow") and
/// mentions no other roster suspect.
pub fn names_several(rule: &SingleSuspectRule, normalized: &str) -> bool {
    if normalized.contains(',') {
        return true;
    }
    if !normalized.contains(' ') {
        return false;
    }

    let exempt = rule
        .multi_word_aliases()
        .any(|alias| contains_alias(normalized, alias));
    !exempt || resolve_mentions(normalized, rule.roster.iter().map(|e| &e.suspect)).len() > 1
}

/// Judge a single-suspect answer by exact alias equality.
pub fn classify_single_suspect(
    rule: &SingleSuspectRule,
    messages: &Messages,
    normalized: &str,
) -> EvaluationResult {
    if names_several(rule, normalized) {
        return EvaluationResult::error(&messages.multiple_names);
    }

    let named = rule
        .roster
        .iter()
        .find(|entry| entry.suspect.is_named_by(normalized));

    match named {
        Some(entry) if entry.suspect.id == rule.target => EvaluationResult::success(&entry.message),
        Some(entry) => EvaluationResult::error(&entry.message),
        None => EvaluationResult::error(&messages.incorrect),
    }
}

/// Reveal-only objectives ignore the answer.
pub fn reveal(text: &str) -> EvaluationResult {
    EvaluationResult::success(text)
}
