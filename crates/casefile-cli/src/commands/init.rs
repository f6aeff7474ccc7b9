//! The `casefile init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_starter(Path::new("casefile.toml"), SAMPLE_CONFIG)?;
    write_starter(Path::new("cases/example.toml"), EXAMPLE_CASE)?;

    println!("\nNext steps:");
    println!("  1. Edit cases/example.toml with your own suspects and objectives");
    println!("  2. Run: casefile validate --case-file cases/example.toml");
    println!("  3. Run: casefile check --case gallery --objective 1 \"ann, bob\"");

    Ok(())
}

/// Write `contents` to `path` unless a file is already there.
///
/// Returns whether the file was written. Existing files are left alone.
fn write_starter(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(true)
}

const SAMPLE_CONFIG: &str = r#"# casefile configuration

# Extra case files, loaded alongside the built-in cases
case_dir = "./cases"

# Case used when --case is not given
default_case = "1"
"#;

const EXAMPLE_CASE: &str = r#"[case]
id = "gallery"
title = "The Gallery Heist"
description = "A painting vanished overnight. Two people took it; one stood guard."

[[suspects]]
id = "ann"
name = "Ann Lee"
aliases = ["ann", "ann lee", "the fox"]

[[suspects]]
id = "bob"
name = "Bob Ray"
aliases = ["bob", "bob ray"]

[[suspects]]
id = "cat"
name = "Cat Moss"
aliases = ["cat", "cat moss", "guard"]

[[objectives]]
id = "1"
label = "Objective 1: Who took the painting?"
mode = "multi_suspect"
targets = ["ann", "bob"]
decoys = ["cat"]
success = "Correct! Ann Lee and Bob Ray carried it out through the loading dock."
decoy_message = "Not quite. Cat Moss was on her rounds the whole night."

[[objectives.hints]]
suspects = ["ann"]
message = "Ann Lee was there, but she did not work alone."

[[objectives.hints]]
suspects = ["bob"]
message = "Bob Ray was there, but someone else picked the lock."

[[objectives]]
id = "2"
label = "Objective 2: Who planned it?"
mode = "single_suspect"
target = "ann"

[[objectives.roster]]
suspect = "ann"
message = "Correct! Ann Lee drew the floor plan."

[[objectives.roster]]
suspect = "bob"
message = "Incorrect. Bob Ray only drove the van."

[[objectives.roster]]
suspect = "cat"
message = "Incorrect. Cat Moss never knew about the plan."

[[objectives]]
id = "3"
label = "Bonus Objective: Where is the painting now?"
mode = "reveal_only"
reveal = "Rolled up inside the van's spare tire."
"#;
