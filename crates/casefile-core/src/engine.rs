//! The answer evaluation engine.
//!
//! [`AnswerEvaluator`] is the single entry point callers use: given the
//! selected objective (if any) and the raw answer text it returns the
//! feedback to show. It holds no state besides a borrowed case file, so any
//! number of evaluations may run side by side.

use std::collections::BTreeMap;

use crate::classifier::{classify_multi_suspect, classify_single_suspect, reveal};
use crate::error::CaseError;
use crate::matcher::resolve_mentions;
use crate::model::{CaseFile, EvaluationResult, ObjectiveRule};
use crate::normalize::normalize;

/// Judges answers against one case file.
#[derive(Debug, Clone, Copy)]
pub struct AnswerEvaluator<'a> {
    case: &'a CaseFile,
}

impl<'a> AnswerEvaluator<'a> {
    pub fn new(case: &'a CaseFile) -> Self {
        Self { case }
    }

    pub fn case(&self) -> &'a CaseFile {
        self.case
    }

    /// Evaluate `raw_answer` for `objective_id`.
    ///
    /// `None` (or a blank id) means no objective has been selected yet.
    /// Never fails: every problem with the input is an error outcome.
    pub fn evaluate(&self, objective_id: Option<&str>, raw_answer: &str) -> EvaluationResult {
        let messages = &self.case.messages;

        let Some(objective_id) = objective_id.map(str::trim).filter(|id| !id.is_empty()) else {
            return EvaluationResult::error(&messages.no_objective);
        };

        let Some(objective) = self.case.objective(objective_id) else {
            tracing::debug!(case = %self.case.id, objective = objective_id, "unknown objective");
            return EvaluationResult::error(&messages.unknown_objective);
        };

        let result = match &objective.rule {
            ObjectiveRule::RevealOnly { reveal: text } => reveal(text),
            ObjectiveRule::SingleSuspect(rule) => {
                classify_single_suspect(rule, messages, &normalize(raw_answer))
            }
            ObjectiveRule::MultiSuspect(rule) => {
                let answer = normalize(raw_answer);
                let named_targets = resolve_mentions(&answer, &rule.targets);
                let named_decoys = resolve_mentions(&answer, &rule.decoys);
                tracing::trace!(?named_targets, ?named_decoys, "resolved mentions");
                classify_multi_suspect(rule, messages, &named_targets, &named_decoys)
            }
        };

        tracing::debug!(
            case = %self.case.id,
            objective = objective_id,
            outcome = %result.outcome,
            "evaluated answer"
        );

        result
    }
}

/// Every loaded case file, keyed by case id.
#[derive(Debug, Clone, Default)]
pub struct CaseBook {
    cases: BTreeMap<String, CaseFile>,
}

impl CaseBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A case book holding the built-in cases.
    pub fn with_builtin() -> anyhow::Result<Self> {
        let mut book = Self::new();
        for case in crate::builtin::builtin_cases()? {
            book.insert(case)?;
        }
        Ok(book)
    }

    /// Add a case, rejecting a second case with the same id.
    pub fn insert(&mut self, case: CaseFile) -> Result<(), CaseError> {
        if self.cases.contains_key(&case.id) {
            return Err(CaseError::DuplicateCase(case.id));
        }
        self.cases.insert(case.id.clone(), case);
        Ok(())
    }

    pub fn get(&self, case_id: &str) -> Result<&CaseFile, CaseError> {
        self.cases
            .get(case_id)
            .ok_or_else(|| CaseError::CaseNotFound(case_id.to_string()))
    }

    pub fn evaluator(&self, case_id: &str) -> Result<AnswerEvaluator<'_>, CaseError> {
        self.get(case_id).map(AnswerEvaluator::new)
    }

    pub fn cases(&self) -> impl Iterator<Item = &CaseFile> {
        self.cases.values()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::high_seas;
    use crate::model::{Outcome, DEFAULT_INCORRECT, DEFAULT_MULTIPLE_NAMES};

    #[test]
    fn no_objective_selected() {
        let case = high_seas().unwrap();
        let evaluator = AnswerEvaluator::new(&case);
        for id in [None, Some(""), Some("   ")] {
            let result = evaluator.evaluate(id, "laura");
            assert_eq!(
                result,
                EvaluationResult::error("Please select an objective first.")
            );
        }
    }

    #[test]
    fn unknown_objective() {
        let case = high_seas().unwrap();
        let result = AnswerEvaluator::new(&case).evaluate(Some("9"), "laura");
        assert_eq!(
            result,
            EvaluationResult::error("Please select a valid objective.")
        );
    }

    #[test]
    fn reveal_ignores_input() {
        let case = high_seas().unwrap();
        let evaluator = AnswerEvaluator::new(&case);
        for answer in ["", "nonsense", "Marcus, Elena"] {
            let result = evaluator.evaluate(Some("5"), answer);
            assert_eq!(
                result,
                EvaluationResult::success("Marcus Reid threw Leonard Grayson overboard")
            );
        }
    }

    #[test]
    fn affair_honorific() {
        let case = high_seas().unwrap();
        let result = AnswerEvaluator::new(&case).evaluate(Some("2"), "mrs. grayson");
        assert_eq!(result.outcome, Outcome::Success);
        assert!(result.message.starts_with("Correct! Victor Mercer was having a secret affair"));
    }

    #[test]
    fn killer_wrong_suspect_gets_tailored_message() {
        let case = high_seas().unwrap();
        let result = AnswerEvaluator::new(&case).evaluate(Some("4"), "The Emerald Widow");
        assert_eq!(result.outcome, Outcome::Error);
        assert!(result.message.starts_with("Not quite. Sophia Blackwood intended"));
    }

    #[test]
    fn single_suspect_lists_and_extra_words() {
        let case = high_seas().unwrap();
        let evaluator = AnswerEvaluator::new(&case);
        assert_eq!(
            evaluator.evaluate(Some("3"), "marcus, elena").message,
            DEFAULT_MULTIPLE_NAMES
        );
        assert_eq!(
            evaluator.evaluate(Some("3"), "marcus elena").message,
            DEFAULT_MULTIPLE_NAMES
        );
        assert_eq!(
            evaluator.evaluate(Some("3"), "marcus reid extra words").message,
            DEFAULT_INCORRECT
        );
    }

    #[test]
    fn multi_suspect_partial_and_decoy() {
        let case = high_seas().unwrap();
        let evaluator = AnswerEvaluator::new(&case);
        let partial = evaluator.evaluate(Some("1"), "Elena,Laura");
        assert_eq!(
            partial.message,
            "Both correct! But not complete. There are more masks aboard this ship."
        );
        let decoy = evaluator.evaluate(Some("1"), "elena, laura, mr. grayson");
        assert!(decoy.message.starts_with("Not quite. That person is not faking"));
    }

    #[test]
    fn case_book_lookup() {
        let book = CaseBook::with_builtin().unwrap();
        assert_eq!(book.len(), 1);
        assert!(book.evaluator("1").is_ok());
        assert_eq!(
            book.get("2").unwrap_err(),
            CaseError::CaseNotFound("2".into())
        );
    }

    #[test]
    fn case_book_rejects_duplicates() {
        let mut book = CaseBook::with_builtin().unwrap();
        let again = high_seas().unwrap();
        assert_eq!(
            book.insert(again).unwrap_err(),
            CaseError::DuplicateCase("1".into())
        );
    }
}
