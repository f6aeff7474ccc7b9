pub mod check;
pub mod init;
pub mod objectives;
pub mod play;
pub mod run;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use casefile_core::{CaseBook, EvaluationResult, Outcome};

use crate::config::{load_config_from, CasefileConfig};

/// Load config and every case it points at.
pub(crate) fn load_case_book(config_path: Option<PathBuf>) -> Result<(CasefileConfig, CaseBook)> {
    let config = load_config_from(config_path.as_deref())?;
    let book = config.case_book()?;
    Ok((config, book))
}

/// One-line text rendering of a result.
pub(crate) fn render(result: &EvaluationResult) -> String {
    let label = match result.outcome {
        Outcome::Success => "SUCCESS",
        Outcome::Error => "ERROR",
    };
    format!("{label}: {}", result.message)
}
