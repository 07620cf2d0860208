//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - errors: Error classification and user-facing messages
//! - file: Rename targets, name validation and type labels
//! - formatting: Date and column-width formatting
//! - navigation: Row cursor movement
//! - search: Case-insensitive name matching
//! - sorting: Three-state name sort
//! - tree: Folder tree expand/collapse visibility
//! - ui: Focus cycling and toast timing
//! - wizard: Repository wizard field validation

pub mod errors;
pub mod file;
pub mod formatting;
pub mod navigation;
pub mod search;
pub mod sorting;
pub mod tree;
pub mod ui;
pub mod wizard;
