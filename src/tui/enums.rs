//! Enumerations for TUI state management.

/// Which screen the UI is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    Help,
    ConfirmClear,
}

/// Where keystrokes go on the task list screen.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    /// Typing edits the draft.
    Draft,
    /// Keys navigate and act on the list.
    List,
}
