//! # todo - a terminal to-do list
//!
//! A single-screen to-do list: type a task, press Enter, tick it off, filter
//! what you see, and switch between a light and a dark theme.
//!
//! ## Key Features
//!
//! - **Draft and add**: the input row holds a draft; blank drafts are ignored
//! - **Pre-completed tasks**: a pending "done" marker applies to the next task you add
//! - **Filters**: All / Active / Completed, always derived from the full list
//! - **Themes**: light and dark palettes, toggled at runtime
//! - **Headless replay**: feed a gesture script and get a table or JSON back
//!
//! Nothing is persisted. Closing the program discards the list.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the UI
//! todo
//!
//! # Start in dark mode
//! todo --theme dark
//!
//! # Replay a script and print JSON
//! printf 'add Buy milk\nflag\nadd Walk dog\nfilter active\n' | todo replay --json
//! ```
//!
//! ## Key Commands
//!
//! - `todo ui` - Interactive UI (default)
//! - `todo replay [SCRIPT] [--json]` - Apply a gesture script and print the state
//! - `todo completions <shell>` - Shell completion script
//!
//! Global flags: `--ids <monotonic|count>`, `--theme <light|dark>`, `--log <FILE>`.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod fields;
pub mod logging;
pub mod script;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();
    let log = cli.log.as_deref();

    match cli.command {
        None | Some(Commands::Ui) => cmd_ui(cli.id_strategy, cli.theme, log),

        Some(Commands::Replay { script, json }) => cmd_replay(cli.id_strategy, script, json, log),

        Some(Commands::Completions { shell }) => cmd_completions(shell),
    }
}
