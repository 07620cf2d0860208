//! Repository Browser TUI Library
//!
//! Exposes modules for the binary and for testing

pub mod api;
pub mod config;
pub mod error;
pub mod host;
pub mod logic;
pub mod messages;
pub mod model;
pub mod services;
pub mod utils;

/// Three-state name sort for the file list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    Unsorted,   // Original server order
    Descending, // Z-A, case-insensitive
    Ascending,  // A-Z, case-insensitive
}

impl SortState {
    pub fn as_str(&self) -> &str {
        match self {
            SortState::Unsorted => "",
            SortState::Descending => "▼",
            SortState::Ascending => "▲",
        }
    }
}

/// Whether the dialog opens an existing file or saves the active one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    #[default]
    Open,
    Save,
}

impl OpenMode {
    pub fn title(&self) -> &str {
        match self {
            OpenMode::Open => "Open",
            OpenMode::Save => "Save",
        }
    }

    pub fn confirm_label(&self) -> &str {
        self.title()
    }
}
