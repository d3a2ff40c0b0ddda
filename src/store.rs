//! In-memory task list and the operations the UI drives it with.
//!
//! This module provides the `TaskListStore` struct, which owns the tasks, the
//! active filter and the transient draft state, along with a few formatting
//! helpers shared by the terminal UI and the replay command.
//!
//! Every store operation is total. Unknown ids and blank drafts are ignored
//! rather than reported, so none of these methods return a `Result`.

use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use crate::fields::{FilterMode, IdStrategy};
use crate::task::Task;

/// The single source of truth for the to-do list.
///
/// The visible subset is never stored; `visible_tasks` derives it from
/// `tasks` and `filter` on every call.
#[derive(Debug)]
pub struct TaskListStore {
    tasks: Vec<Task>,
    filter: FilterMode,
    pending_completion: bool,
    draft_text: String,
    id_strategy: IdStrategy,
    next_id: u64,
}

/// Serializable view of the store for `replay --json`.
#[derive(Debug, Serialize)]
pub struct StoreSnapshot<'a> {
    pub filter: FilterMode,
    pub draft_text: &'a str,
    pub pending_completion: bool,
    pub remaining: usize,
    pub tasks: &'a [Task],
    pub visible: Vec<&'a Task>,
}

impl TaskListStore {
    /// Create an empty store using the given id strategy.
    pub fn new(id_strategy: IdStrategy) -> Self {
        TaskListStore {
            tasks: Vec::new(),
            filter: FilterMode::All,
            pending_completion: false,
            draft_text: String::new(),
            id_strategy,
            next_id: 1,
        }
    }

    /// Replace the draft text verbatim.
    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    /// Flip the completion state that the next created task will start with.
    pub fn toggle_draft_completion_flag(&mut self) {
        self.pending_completion = !self.pending_completion;
        debug!(pending = self.pending_completion, "toggled pending completion flag");
    }

    /// Turn the draft into a task.
    ///
    /// Returns the new task's id, or `None` when the trimmed draft is empty
    /// (in which case nothing changes). The pending completion flag is kept.
    pub fn add_task(&mut self) -> Option<u64> {
        let name = self.draft_text.trim();
        if name.is_empty() {
            debug!("ignored add with blank draft");
            return None;
        }
        let name = name.to_string();
        let id = self.allocate_id();
        self.tasks.push(Task::new(id, name, self.pending_completion));
        self.draft_text.clear();
        debug!(id, completed = self.pending_completion, "added task");
        Some(id)
    }

    /// Remove every task with this id. Unknown ids are ignored.
    pub fn delete_task(&mut self, id: u64) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        debug!(id, removed = before - self.tasks.len(), "delete task");
    }

    /// Remove all tasks. Filter, draft and pending flag are left alone.
    pub fn clear_all_tasks(&mut self) {
        debug!(removed = self.tasks.len(), "cleared all tasks");
        self.tasks.clear();
    }

    /// Flip `completed` on every task with this id. Unknown ids are ignored.
    pub fn toggle_task_completion(&mut self, id: u64) {
        let mut hits = 0usize;
        for t in self.tasks.iter_mut().filter(|t| t.id == id) {
            t.completed = !t.completed;
            hits += 1;
        }
        debug!(id, hits, "toggle task completion");
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        self.filter = mode;
        debug!(filter = %mode, "set filter");
    }

    /// Tasks passing the current filter, in insertion order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t.completed))
            .collect()
    }

    /// Number of tasks not yet completed, regardless of filter.
    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn pending_completion(&self) -> bool {
        self.pending_completion
    }

    /// Get a task by id. With duplicate ids this is the first match.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            filter: self.filter,
            draft_text: &self.draft_text,
            pending_completion: self.pending_completion,
            remaining: self.remaining_count(),
            tasks: &self.tasks,
            visible: self.visible_tasks(),
        }
    }

    fn allocate_id(&mut self) -> u64 {
        match self.id_strategy {
            IdStrategy::Monotonic => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
            IdStrategy::Count => self.tasks.len() as u64 + 1,
        }
    }
}

impl Default for TaskListStore {
    fn default() -> Self {
        TaskListStore::new(IdStrategy::default())
    }
}

/// Footer text for the number of open tasks, e.g. "1 item left".
pub fn format_items_left(remaining: usize) -> String {
    if remaining == 1 {
        "1 item left".to_string()
    } else {
        format!("{remaining} items left")
    }
}

/// Truncate a string to `width` characters, ending with an ellipsis when cut.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

/// Write the visible tasks as a plain-text table followed by the footer line.
pub fn print_table<W: Write>(store: &TaskListStore, out: &mut W) -> io::Result<()> {
    writeln!(out, "{:<5} {:<5} {}", "ID", "Done", "Name")?;
    for t in store.visible_tasks() {
        let done = if t.completed { "[x]" } else { "[ ]" };
        writeln!(out, "{:<5} {:<5} {}", t.id, done, truncate(&t.name, 60))?;
    }
    writeln!(
        out,
        "{} | filter: {}",
        format_items_left(store.remaining_count()),
        store.filter()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(store: &mut TaskListStore, text: &str) -> Option<u64> {
        store.set_draft_text(text);
        store.add_task()
    }

    /// Buy milk (open), then Walk dog (added with the pending flag set).
    fn sample_store() -> TaskListStore {
        let mut store = TaskListStore::new(IdStrategy::Monotonic);
        add(&mut store, "Buy milk");
        store.toggle_draft_completion_flag();
        add(&mut store, "Walk dog");
        store
    }

    #[test]
    fn test_add_grows_by_one_per_non_blank_draft() {
        let mut store = TaskListStore::new(IdStrategy::Monotonic);
        for (i, text) in ["a", "  b  ", "c\t"].iter().enumerate() {
            assert!(add(&mut store, text).is_some());
            assert_eq!(store.len(), i + 1);
        }
        assert_eq!(store.tasks()[1].name, "b");
        assert_eq!(store.tasks()[2].name, "c");
    }

    #[test]
    fn test_blank_draft_is_ignored_and_kept() {
        let mut store = TaskListStore::new(IdStrategy::Monotonic);
        assert_eq!(add(&mut store, ""), None);
        assert_eq!(add(&mut store, "   \t "), None);
        assert!(store.is_empty());
        assert_eq!(store.draft_text(), "   \t ");
    }

    #[test]
    fn test_add_clears_draft_but_not_pending_flag() {
        let mut store = TaskListStore::new(IdStrategy::Monotonic);
        store.toggle_draft_completion_flag();
        add(&mut store, "first");
        assert_eq!(store.draft_text(), "");
        assert!(store.pending_completion());
        add(&mut store, "second");
        assert!(store.tasks().iter().all(|t| t.completed));
    }

    #[test]
    fn test_set_draft_is_verbatim() {
        let mut store = TaskListStore::default();
        store.set_draft_text("  keep spaces  ");
        assert_eq!(store.draft_text(), "  keep spaces  ");
    }

    #[test]
    fn test_scenario_buy_milk_walk_dog() {
        let mut store = sample_store();
        assert_eq!(
            store.tasks(),
            &[Task::new(1, "Buy milk", false), Task::new(2, "Walk dog", true)]
        );
        assert_eq!(store.remaining_count(), 1);

        store.set_filter(FilterMode::Active);
        assert_eq!(store.visible_tasks(), vec![&Task::new(1, "Buy milk", false)]);
    }

    #[test]
    fn test_scenario_delete_first() {
        let mut store = sample_store();
        store.delete_task(1);
        assert_eq!(store.tasks(), &[Task::new(2, "Walk dog", true)]);
        assert_eq!(store.remaining_count(), 0);
    }

    #[test]
    fn test_delete_twice_is_idempotent() {
        let mut store = sample_store();
        store.delete_task(2);
        let after_first: Vec<Task> = store.tasks().to_vec();
        store.delete_task(2);
        assert_eq!(store.tasks(), after_first.as_slice());
        store.delete_task(99);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut store = sample_store();
        store.toggle_task_completion(1);
        assert!(store.get(1).unwrap().completed);
        store.toggle_task_completion(1);
        assert!(!store.get(1).unwrap().completed);
        store.toggle_task_completion(42);
        assert_eq!(store.remaining_count(), 1);
    }

    #[test]
    fn test_clear_all_empties_every_filter() {
        let mut store = sample_store();
        store.clear_all_tasks();
        for mode in FilterMode::ALL {
            store.set_filter(mode);
            assert!(store.visible_tasks().is_empty());
        }
        assert_eq!(store.remaining_count(), 0);
    }

    #[test]
    fn test_filters_partition_in_insertion_order() {
        let mut store = TaskListStore::new(IdStrategy::Monotonic);
        for (name, done) in [("a", false), ("b", true), ("c", false), ("d", true), ("e", false)] {
            if store.pending_completion() != done {
                store.toggle_draft_completion_flag();
            }
            add(&mut store, name);
        }
        let names = |s: &TaskListStore| -> Vec<String> {
            s.visible_tasks().iter().map(|t| t.name.clone()).collect()
        };

        store.set_filter(FilterMode::Active);
        assert_eq!(names(&store), ["a", "c", "e"]);
        store.set_filter(FilterMode::Completed);
        assert_eq!(names(&store), ["b", "d"]);
        store.set_filter(FilterMode::All);
        assert_eq!(names(&store), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_visible_set_follows_toggles() {
        let mut store = sample_store();
        store.set_filter(FilterMode::Completed);
        assert_eq!(store.visible_tasks().len(), 1);
        store.toggle_task_completion(1);
        assert_eq!(store.visible_tasks().len(), 2);
    }

    #[test]
    fn test_monotonic_ids_never_reused() {
        let mut store = TaskListStore::new(IdStrategy::Monotonic);
        add(&mut store, "one");
        add(&mut store, "two");
        store.delete_task(1);
        assert_eq!(add(&mut store, "three"), Some(3));
        store.clear_all_tasks();
        assert_eq!(add(&mut store, "four"), Some(4));
    }

    #[test]
    fn test_count_ids_collide_after_delete() {
        let mut store = TaskListStore::new(IdStrategy::Count);
        add(&mut store, "one");
        add(&mut store, "two");
        store.delete_task(1);
        assert_eq!(add(&mut store, "three"), Some(2));

        // Both tasks carry id 2; operations touch all of them.
        store.toggle_task_completion(2);
        assert!(store.tasks().iter().all(|t| t.completed));
        store.delete_task(2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_snapshot_json() {
        let mut store = sample_store();
        store.set_filter(FilterMode::Active);
        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["filter"], "active");
        assert_eq!(json["remaining"], 1);
        assert_eq!(json["pending_completion"], true);
        assert_eq!(json["tasks"].as_array().unwrap().len(), 2);
        assert_eq!(json["visible"][0]["name"], "Buy milk");
    }

    #[test]
    fn test_print_table_lists_visible_and_footer() {
        let mut store = sample_store();
        store.set_filter(FilterMode::Active);
        let mut out = Vec::new();
        print_table(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert_eq!(lines[1], "1     [ ]   Buy milk");
        assert_eq!(lines[2], "1 item left | filter: active");
    }

    #[test]
    fn test_print_table_empty_list() {
        let store = TaskListStore::default();
        let mut out = Vec::new();
        print_table(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().last(), Some("0 items left | filter: all"));
    }

    #[test]
    fn test_format_items_left() {
        assert_eq!(format_items_left(0), "0 items left");
        assert_eq!(format_items_left(1), "1 item left");
        assert_eq!(format_items_left(5), "5 items left");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
