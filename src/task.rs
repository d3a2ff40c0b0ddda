//! Task data structure.
//!
//! A task is a short text label with a completion flag. Its id is handed out
//! by the store and is the only handle the presentation layer uses to refer
//! back to it.

use serde::Serialize;

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: u64, name: impl Into<String>, completed: bool) -> Self {
        Task {
            id,
            name: name.into(),
            completed,
        }
    }
}
