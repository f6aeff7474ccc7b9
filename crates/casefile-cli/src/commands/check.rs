//! The `casefile check` command.

use std::path::PathBuf;

use anyhow::Result;

use super::{load_case_book, render};

pub fn execute(
    config_path: Option<PathBuf>,
    case_id: Option<String>,
    objective: Option<String>,
    answer: String,
    format: String,
    fail_on_error: bool,
) -> Result<()> {
    let (config, book) = load_case_book(config_path)?;
    let case_id = config.case_id(case_id);
    let evaluator = book.evaluator(&case_id)?;

    let result = evaluator.evaluate(objective.as_deref(), &answer);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => println!("{}", render(&result)),
    }

    if fail_on_error && !result.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
