//! Enumerations shared by the store, the command line and the UI.
//!
//! This module defines the task filter, the id allocation strategy and the
//! visual theme. All three are `clap` values; the filter is also serialized
//! so the same spelling works on the command line, in scripts and in JSON.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// Which tasks the list shows.
#[derive(Debug, Clone, Copy, Default, Serialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    /// Every filter in footer order.
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Active, FilterMode::Completed];

    /// Whether a task with the given completion flag passes this filter.
    pub fn matches(self, completed: bool) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !completed,
            FilterMode::Completed => completed,
        }
    }

    /// The next filter in footer order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Active,
            FilterMode::Active => FilterMode::Completed,
            FilterMode::Completed => FilterMode::All,
        }
    }

    /// Label used in the footer tabs.
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Active => "Active",
            FilterMode::Completed => "Completed",
        }
    }

    /// Parse a filter name as written in scripts (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(FilterMode::All),
            "active" => Some(FilterMode::Active),
            "completed" => Some(FilterMode::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

/// How new task ids are chosen.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum IdStrategy {
    /// Counter that only ever goes up; ids are never reused.
    #[default]
    Monotonic,
    /// Number of tasks currently in the list plus one. Reuses ids after deletes.
    Count,
}

/// Light or dark colour scheme for the UI.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}
