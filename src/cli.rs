use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::fields::{IdStrategy, Theme};

/// Single-screen to-do list for the terminal.
/// Runs the interactive UI when no subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Terminal to-do list with filters and themes")]
pub struct Cli {
    /// How new task ids are chosen.
    #[arg(long = "ids", value_enum, global = true, default_value_t = IdStrategy::Monotonic)]
    pub id_strategy: IdStrategy,

    /// Initial colour theme for the UI.
    #[arg(long, value_enum, global = true, default_value_t = Theme::Light)]
    pub theme: Theme,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_ui() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.id_strategy, IdStrategy::Monotonic);
        assert_eq!(cli.theme, Theme::Light);
        assert!(cli.log.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["todo", "replay", "list.txt", "--json", "--ids", "count"]).unwrap();
        assert_eq!(cli.id_strategy, IdStrategy::Count);
        match cli.command {
            Some(Commands::Replay { script, json }) => {
                assert_eq!(script, Some(PathBuf::from("list.txt")));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_theme_flag() {
        let cli = Cli::try_parse_from(["todo", "--theme", "dark", "ui"]).unwrap();
        assert_eq!(cli.theme, Theme::Dark);
        assert!(matches!(cli.command, Some(Commands::Ui)));
    }

    #[test]
    fn test_rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["todo", "--ids", "random"]).is_err());
    }
}
