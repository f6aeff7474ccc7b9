//! The `casefile objectives` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::load_case_book;

pub fn execute(config_path: Option<PathBuf>, case_id: Option<String>) -> Result<()> {
    let (config, book) = load_case_book(config_path)?;
    let case = book.get(&config.case_id(case_id))?;

    println!("Case {}: {}", case.id, case.title);
    if !case.description.is_empty() {
        println!("{}", case.description);
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Mode", "Question"]);
    for objective in &case.objectives {
        table.add_row(vec![
            Cell::new(&objective.id),
            Cell::new(objective.mode()),
            Cell::new(&objective.label),
        ]);
    }

    println!("{table}");
    Ok(())
}
