//! Command implementations for the CLI interface.
//!
//! This module contains the subcommand definitions and their handlers: the
//! interactive UI, the headless gesture replayer and shell completions.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use clap_complete::{generate, Shell};
use thiserror::Error;
use tracing::info;

use crate::fields::{IdStrategy, Theme};
use crate::logging::{init_logging, LogTarget};
use crate::script::{apply_all, parse_script, ScriptError};
use crate::store::{print_table, TaskListStore};
use crate::tui::run::run_tui;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive UI (the default).
    Ui,

    /// Apply a gesture script to an empty list and print the result.
    Replay {
        /// Script file, one gesture per line. Reads stdin when omitted or "-".
        script: Option<PathBuf>,
        /// Print the final state as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(id_strategy: IdStrategy, theme: Theme, log: Option<&Path>) {
    if let Err(e) = init_logging(LogTarget::choose(log, false)) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }
    info!(?id_strategy, theme = theme.label(), "starting ui");
    if let Err(e) = run_tui(id_strategy, theme) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
    info!("ui closed");
}

/// Why a replay produced no output.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("failed to encode state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Read a gesture script, apply it to a fresh store and print the final state.
pub fn cmd_replay(id_strategy: IdStrategy, script: Option<PathBuf>, json: bool, log: Option<&Path>) {
    if let Err(e) = init_logging(LogTarget::choose(log, true)) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    let source = match read_script(script.as_deref(), io::stdin()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read script: {e}");
            std::process::exit(1);
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = replay(id_strategy, &source, json, &mut stdout) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Parse `source`, apply it to an empty store and write the result to `out`.
///
/// A script with any bad line is rejected before a single gesture runs, and
/// nothing is written.
pub fn replay<W: Write>(
    id_strategy: IdStrategy,
    source: &str,
    json: bool,
    out: &mut W,
) -> Result<TaskListStore, ReplayError> {
    let gestures = parse_script(source)?;

    info!(gestures = gestures.len(), "replaying script");
    let mut store = TaskListStore::new(id_strategy);
    apply_all(&mut store, &gestures);
    info!(tasks = store.len(), remaining = store.remaining_count(), "replay finished");

    if json {
        let encoded = serde_json::to_string_pretty(&store.snapshot())?;
        writeln!(out, "{encoded}")?;
    } else {
        print_table(&store, out)?;
    }
    Ok(store)
}

/// Script text from `path`, or from `stdin` when the path is absent or "-".
fn read_script<R: Read>(path: Option<&Path>, mut stdin: R) -> io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
