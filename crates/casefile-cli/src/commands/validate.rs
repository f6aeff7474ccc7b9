//! The `casefile validate` command.

use std::path::PathBuf;

use anyhow::Result;

use casefile_core::parser;

pub fn execute(case_path: PathBuf) -> Result<()> {
    let cases = if case_path.is_dir() {
        parser::load_case_directory(&case_path)?
    } else {
        vec![parser::parse_case_file(&case_path)?]
    };

    let mut total_warnings = 0;

    for case in &cases {
        println!(
            "Case file: {} ({} suspects, {} objectives)",
            case.title,
            case.suspects.len(),
            case.objectives.len()
        );

        let warnings = parser::validate_case(case);
        for w in &warnings {
            let prefix = w
                .objective_id
                .as_ref()
                .map(|id| format!("  [objective {id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if cases.is_empty() {
        println!("No case files found.");
    } else if total_warnings == 0 {
        println!("All case files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
