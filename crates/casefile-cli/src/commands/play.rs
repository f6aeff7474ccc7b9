//! The `casefile play` command.
//!
//! A line-oriented session. The session, not the engine, remembers which
//! objective is selected; every answer is judged independently.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use casefile_core::model::ObjectiveMode;
use casefile_core::AnswerEvaluator;

use super::{load_case_book, render};

const HELP: &str = "Commands:
  :objective <id>   select an objective (:o for short)
  :objectives       list objectives
  :help             show this help
  :quit             leave
Anything else is checked as your answer. With a reveal-only objective
selected, an empty line shows the answer.";

pub fn execute(config_path: Option<PathBuf>, case_id: Option<String>) -> Result<()> {
    let (config, book) = load_case_book(config_path)?;
    let evaluator = book.evaluator(&config.case_id(case_id))?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(evaluator, stdin.lock(), stdout.lock())
}

/// Drive a session from `input` until EOF or `:quit`.
fn run_session<R: BufRead, W: Write>(
    evaluator: AnswerEvaluator<'_>,
    input: R,
    mut output: W,
) -> Result<()> {
    let case = evaluator.case();
    writeln!(output, "{}", case.title)?;
    writeln!(output, "Type :help for commands.")?;

    let mut session = Session::new(evaluator);
    for line in input.lines() {
        match session.handle(&line?) {
            Step::Say(text) => writeln!(output, "{text}")?,
            Step::Quiet => {}
            Step::Quit => break,
        }
        output.flush()?;
    }

    Ok(())
}

enum Step {
    Say(String),
    Quiet,
    Quit,
}

struct Session<'a> {
    evaluator: AnswerEvaluator<'a>,
    selected: Option<String>,
}

impl<'a> Session<'a> {
    fn new(evaluator: AnswerEvaluator<'a>) -> Self {
        Self {
            evaluator,
            selected: None,
        }
    }

    fn handle(&mut self, line: &str) -> Step {
        let trimmed = line.trim();

        if let Some(command) = trimmed.strip_prefix(':') {
            let (name, arg) = command
                .split_once(char::is_whitespace)
                .map(|(n, a)| (n, a.trim()))
                .unwrap_or((command, ""));
            return match name {
                "objective" | "o" => self.select(arg),
                "objectives" => Step::Say(self.list()),
                "help" | "h" | "?" => Step::Say(HELP.to_string()),
                "quit" | "q" | "exit" => Step::Quit,
                other => Step::Say(format!("Unknown command :{other}. Type :help.")),
            };
        }

        if trimmed.is_empty() && !self.reveal_selected() {
            return Step::Quiet;
        }

        let result = self.evaluator.evaluate(self.selected.as_deref(), line);
        Step::Say(render(&result))
    }

    fn select(&mut self, id: &str) -> Step {
        let case = self.evaluator.case();
        match case.objective(id) {
            Some(objective) => {
                self.selected = Some(objective.id.clone());
                Step::Say(format!("Selected {}", objective.label))
            }
            None => Step::Say(format!("ERROR: {}", case.messages.unknown_objective)),
        }
    }

    fn reveal_selected(&self) -> bool {
        self.selected
            .as_deref()
            .and_then(|id| self.evaluator.case().objective(id))
            .is_some_and(|o| o.mode() == ObjectiveMode::RevealOnly)
    }

    fn list(&self) -> String {
        self.evaluator
            .case()
            .objectives
            .iter()
            .map(|o| format!("  {}  {}", o.id, o.label))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casefile_core::builtin::high_seas;

    fn play(script: &str) -> String {
        let case = high_seas().unwrap();
        let mut out = Vec::new();
        run_session(AnswerEvaluator::new(&case), script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn answer_before_selecting() {
        let out = play("laura\n");
        assert!(out.contains("ERROR: Please select an objective first."));
    }

    #[test]
    fn select_then_answer() {
        let out = play(":objective 4\nRachel Harlow\n");
        assert!(out.contains("Selected Objective 4: Who actually killed Victor Mercer?"));
        assert!(out.contains("SUCCESS: Correct! Laura Campbell (Rachel Harlow)"));
    }

    #[test]
    fn selection_persists_across_answers() {
        let out = play(":o 2\nyvonne\nmrs grayson\n");
        assert!(out.contains("ERROR: Incorrect. Yvonne had a relationship"));
        assert!(out.contains("SUCCESS: Correct! Victor Mercer was having a secret affair"));
    }

    #[test]
    fn unknown_objective_keeps_selection() {
        let out = play(":o 3\n:o 42\nyvonne\n");
        assert!(out.contains("ERROR: Please select a valid objective."));
        assert!(out.contains("SUCCESS: Correct! Yvonne Lambert"));
    }

    #[test]
    fn blank_line_reveals_bonus() {
        let out = play(":o 5\n\n");
        assert!(out.contains("SUCCESS: Marcus Reid threw Leonard Grayson overboard"));
    }

    #[test]
    fn blank_line_ignored_otherwise() {
        let out = play(":o 1\n\n");
        assert!(!out.contains("ERROR"));
    }

    #[test]
    fn quit_stops_reading() {
        let out = play(":quit\n:o 5\n\n");
        assert!(!out.contains("Marcus Reid threw"));
    }
}
