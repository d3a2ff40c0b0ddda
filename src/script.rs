//! Gesture scripts for driving the store without a terminal.
//!
//! A script is plain text with one gesture per line, e.g.
//!
//! ```text
//! # morning list
//! add Buy milk
//! flag
//! add Walk dog
//! filter active
//! ```
//!
//! The whole script is parsed up front so a typo on line 40 does not leave
//! the store half-updated.
//!
//! `add` followed by nothing but whitespace is a bare `add`: it commits the
//! draft already set by an earlier `type` line.

use thiserror::Error;
use tracing::debug;

use crate::fields::FilterMode;
use crate::store::TaskListStore;

/// A single user gesture, mapped one-to-one onto a store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Type(String),
    ToggleFlag,
    Add,
    AddText(String),
    Delete(u64),
    Toggle(u64),
    Clear,
    Filter(FilterMode),
}

/// Why a script line could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: '{command}' needs an argument")]
    MissingArgument { line: usize, command: &'static str },
    #[error("line {line}: '{value}' is not a task id")]
    InvalidId { line: usize, value: String },
    #[error("line {line}: unknown filter '{value}' (expected all, active or completed)")]
    InvalidFilter { line: usize, value: String },
}

/// Parse a single line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(raw: &str, line: usize) -> Result<Option<Gesture>, ScriptError> {
    let trimmed = raw.trim_start();
    if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((c, r)) => (c, r),
        None => (trimmed.trim_end(), ""),
    };
    // Drop the line terminator but keep the text's own spacing.
    let rest = rest.trim_end_matches(['\r', '\n']);

    let gesture = match command.to_lowercase().as_str() {
        "type" => Gesture::Type(rest.to_string()),
        "flag" => Gesture::ToggleFlag,
        "add" => {
            if rest.trim().is_empty() {
                Gesture::Add
            } else {
                Gesture::AddText(rest.to_string())
            }
        }
        "delete" => Gesture::Delete(parse_id(rest, line, "delete")?),
        "toggle" => Gesture::Toggle(parse_id(rest, line, "toggle")?),
        "clear" => Gesture::Clear,
        "filter" => {
            let value = rest.trim();
            if value.is_empty() {
                return Err(ScriptError::MissingArgument { line, command: "filter" });
            }
            match FilterMode::from_name(value) {
                Some(mode) => Gesture::Filter(mode),
                None => {
                    return Err(ScriptError::InvalidFilter {
                        line,
                        value: value.to_string(),
                    })
                }
            }
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: command.to_string(),
            })
        }
    };
    Ok(Some(gesture))
}

fn parse_id(rest: &str, line: usize, command: &'static str) -> Result<u64, ScriptError> {
    let value = rest.trim();
    if value.is_empty() {
        return Err(ScriptError::MissingArgument { line, command });
    }
    value.parse::<u64>().map_err(|_| ScriptError::InvalidId {
        line,
        value: value.to_string(),
    })
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(source: &str) -> Result<Vec<Gesture>, ScriptError> {
    let mut gestures = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        if let Some(g) = parse_line(raw, idx + 1)? {
            gestures.push(g);
        }
    }
    Ok(gestures)
}

/// Apply one gesture to the store.
pub fn apply(store: &mut TaskListStore, gesture: &Gesture) {
    debug!(?gesture, "apply gesture");
    match gesture {
        Gesture::Type(text) => store.set_draft_text(text.as_str()),
        Gesture::ToggleFlag => store.toggle_draft_completion_flag(),
        Gesture::Add => {
            store.add_task();
        }
        Gesture::AddText(text) => {
            store.set_draft_text(text.as_str());
            store.add_task();
        }
        Gesture::Delete(id) => store.delete_task(*id),
        Gesture::Toggle(id) => store.toggle_task_completion(*id),
        Gesture::Clear => store.clear_all_tasks(),
        Gesture::Filter(mode) => store.set_filter(*mode),
    }
}

/// Apply every gesture in order.
pub fn apply_all(store: &mut TaskListStore, gestures: &[Gesture]) {
    for g in gestures {
        apply(store, g);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::IdStrategy;
    use crate::task::Task;

    #[test]
    fn test_parse_skips_blank_and_comments() {
        let gestures = parse_script("\n# comment\n   \n  # indented comment\nclear\n").unwrap();
        assert_eq!(gestures, vec![Gesture::Clear]);
    }

    #[test]
    fn test_parse_each_command() {
        let src = "type hello world\nFLAG\nadd\nadd Walk dog\ndelete 3\ntoggle 4\nclear\nfilter Completed";
        assert_eq!(
            parse_script(src).unwrap(),
            vec![
                Gesture::Type("hello world".into()),
                Gesture::ToggleFlag,
                Gesture::Add,
                Gesture::AddText("Walk dog".into()),
                Gesture::Delete(3),
                Gesture::Toggle(4),
                Gesture::Clear,
                Gesture::Filter(FilterMode::Completed),
            ]
        );
    }

    #[test]
    fn test_type_keeps_text_verbatim() {
        assert_eq!(
            parse_line("type   padded  ", 1).unwrap(),
            Some(Gesture::Type("  padded  ".into()))
        );
        assert_eq!(parse_line("type", 1).unwrap(), Some(Gesture::Type(String::new())));
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        assert_eq!(
            parse_script("add a\nfrobnicate\n"),
            Err(ScriptError::UnknownCommand { line: 2, command: "frobnicate".into() })
        );
        assert_eq!(
            parse_script("delete"),
            Err(ScriptError::MissingArgument { line: 1, command: "delete" })
        );
        assert_eq!(
            parse_script("\n\ntoggle abc"),
            Err(ScriptError::InvalidId { line: 3, value: "abc".into() })
        );
        assert_eq!(
            parse_script("filter someday"),
            Err(ScriptError::InvalidFilter { line: 1, value: "someday".into() })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = parse_script("toggle -1").unwrap_err();
        assert_eq!(err.to_string(), "line 1: '-1' is not a task id");
    }

    #[test]
    fn test_apply_scenario() {
        let src = "add Buy milk\nflag\nadd Walk dog\nfilter active\n";
        let mut store = TaskListStore::new(IdStrategy::Monotonic);
        apply_all(&mut store, &parse_script(src).unwrap());

        assert_eq!(store.remaining_count(), 1);
        assert_eq!(store.visible_tasks(), vec![&Task::new(1, "Buy milk", false)]);

        apply(&mut store, &Gesture::Delete(1));
        assert_eq!(store.tasks(), &[Task::new(2, "Walk dog", true)]);
        assert_eq!(store.remaining_count(), 0);
    }

    #[test]
    fn test_add_with_trailing_spaces_commits_existing_draft() {
        assert_eq!(parse_line("add   ", 1).unwrap(), Some(Gesture::Add));

        let mut store = TaskListStore::default();
        apply_all(&mut store, &parse_script("type Water plants\nadd  \t\n").unwrap());
        assert_eq!(store.tasks(), &[Task::new(1, "Water plants", false)]);
    }

    #[test]
    fn test_apply_blank_add_is_ignored() {
        let mut store = TaskListStore::default();
        apply_all(&mut store, &parse_script("type    \nadd\n").unwrap());
        assert!(store.is_empty());
        assert_eq!(store.draft_text(), "   ");
    }
}
