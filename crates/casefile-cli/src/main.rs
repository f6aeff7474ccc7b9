//! casefile CLI: check answers to case-file puzzles from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "casefile", version, about = "Case-file puzzle answer checker")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one answer
    Check {
        /// Objective to answer (omit to see what happens with none selected)
        #[arg(long)]
        objective: Option<String>,

        /// Case ID (default: from config, else "1")
        #[arg(long)]
        case: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if the answer is not correct
        #[arg(long)]
        fail_on_error: bool,

        /// The answer, e.g. "Sophia, Marcus Reid"
        #[arg(default_value = "")]
        answer: String,
    },

    /// List a case's objectives
    Objectives {
        /// Case ID
        #[arg(long)]
        case: Option<String>,
    },

    /// Answer objectives interactively from stdin
    Play {
        /// Case ID
        #[arg(long)]
        case: Option<String>,
    },

    /// Evaluate a script of attempts
    Run {
        /// Path to a .toml attempt script
        #[arg(long)]
        script: PathBuf,

        /// Case ID
        #[arg(long)]
        case: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if any attempt differs from its expected outcome
        #[arg(long)]
        fail_on_mismatch: bool,
    },

    /// Validate case file TOML files
    Validate {
        /// Path to case file or directory
        #[arg(long)]
        case_file: PathBuf,
    },

    /// Create starter config and example case file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("casefile=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config;

    let result = match cli.command {
        Commands::Check {
            objective,
            case,
            format,
            fail_on_error,
            answer,
        } => commands::check::execute(config_path, case, objective, answer, format, fail_on_error),
        Commands::Objectives { case } => commands::objectives::execute(config_path, case),
        Commands::Play { case } => commands::play::execute(config_path, case),
        Commands::Run {
            script,
            case,
            format,
            fail_on_mismatch,
        } => commands::run::execute(config_path, case, script, format, fail_on_mismatch),
        Commands::Validate { case_file } => commands::validate::execute(case_file),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
