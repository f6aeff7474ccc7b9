//! The `casefile run` command.
//!
//! Evaluates a TOML script of attempts against one case, e.g. to check that
//! every authored message is reachable after editing a case file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use serde::{Deserialize, Serialize};

use casefile_core::{AnswerEvaluator, Outcome};

use super::load_case_book;

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    attempts: Vec<Attempt>,
}

#[derive(Debug, Deserialize)]
struct Attempt {
    #[serde(default)]
    objective: Option<String>,
    #[serde(default)]
    answer: String,
    /// Expected outcome ("success" or "error").
    #[serde(default)]
    expect: Option<String>,
    /// Expected message, compared exactly.
    #[serde(default)]
    expect_message: Option<String>,
}

/// The result of one scripted attempt.
#[derive(Debug, Serialize)]
struct AttemptReport {
    objective: Option<String>,
    answer: String,
    outcome: Outcome,
    message: String,
    expected: Option<Outcome>,
    matched: bool,
}

pub fn execute(
    config_path: Option<PathBuf>,
    case_id: Option<String>,
    script_path: PathBuf,
    format: String,
    fail_on_mismatch: bool,
) -> Result<()> {
    let (config, book) = load_case_book(config_path)?;
    let evaluator = book.evaluator(&config.case_id(case_id))?;
    let script = load_script(&script_path)?;

    let reports = run_script(evaluator, script)?;
    let mismatches = reports.iter().filter(|r| !r.matched).count();

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&reports)?),
        _ => print_table(&reports),
    }

    let successes = reports
        .iter()
        .filter(|r| r.outcome == Outcome::Success)
        .count();
    eprintln!(
        "{} attempt(s): {} success, {} error, {} mismatch(es)",
        reports.len(),
        successes,
        reports.len() - successes,
        mismatches
    );

    if fail_on_mismatch && mismatches > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn load_script(path: &Path) -> Result<Script> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse script: {}", path.display()))
}

fn run_script(evaluator: AnswerEvaluator<'_>, script: Script) -> Result<Vec<AttemptReport>> {
    script
        .attempts
        .into_iter()
        .map(|attempt| {
            let expected = attempt
                .expect
                .as_deref()
                .map(|e| e.parse::<Outcome>().map_err(|e| anyhow::anyhow!("{}", e)))
                .transpose()?;

            let result = evaluator.evaluate(attempt.objective.as_deref(), &attempt.answer);
            let matched = expected.map_or(true, |e| e == result.outcome)
                && attempt
                    .expect_message
                    .as_ref()
                    .map_or(true, |m| *m == result.message);

            Ok(AttemptReport {
                objective: attempt.objective,
                answer: attempt.answer,
                outcome: result.outcome,
                message: result.message,
                expected,
                matched,
            })
        })
        .collect()
}

fn print_table(reports: &[AttemptReport]) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Objective", "Answer", "Outcome", "Match", "Message"]);

    for (i, r) in reports.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(r.objective.as_deref().unwrap_or("-")),
            Cell::new(&r.answer),
            Cell::new(r.outcome),
            Cell::new(if r.matched { "ok" } else { "MISMATCH" }),
            Cell::new(&r.message),
        ]);
    }

    println!("{table}");
}
