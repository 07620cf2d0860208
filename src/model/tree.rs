//! Folder Tree Model
//!
//! Owns the flat folder list, its expand/collapse state, the highlighted row
//! and the tree's notion of the current selection.

use crate::api::FolderRecord;
use crate::error::BrowserError;
use crate::logic;
use crate::messages::{Selection, TreeEvent};

/// One rendered line of the tree pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeRow {
    Recents,
    /// Index into [`FolderTree::folders`]
    Folder(usize),
}

#[derive(Clone, Debug, Default)]
pub struct FolderTree {
    pub folders: Vec<FolderRecord>,
    pub selection: Selection,
    /// Highlighted row, counting the Recents row as 0
    pub cursor: usize,
}

impl FolderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the folder list with a fresh server response
    pub fn load(&mut self, mut folders: Vec<FolderRecord>) {
        logic::tree::reveal_roots(&mut folders);
        tracing::debug!(count = folders.len(), "folder tree loaded");
        self.folders = folders;
        self.cursor = self.cursor.min(self.row_count().saturating_sub(1));
    }

    pub fn rows(&self) -> Vec<TreeRow> {
        std::iter::once(TreeRow::Recents)
            .chain(
                logic::tree::visible_indices(&self.folders)
                    .into_iter()
                    .map(TreeRow::Folder),
            )
            .collect()
    }

    pub fn row_count(&self) -> usize {
        1 + self.folders.iter().filter(|f| f.visible).count()
    }

    pub fn folder(&self, path: &str) -> Option<&FolderRecord> {
        self.folders.iter().find(|f| f.path == path)
    }

    pub fn folder_mut(&mut self, path: &str) -> Option<&mut FolderRecord> {
        self.folders.iter_mut().find(|f| f.path == path)
    }

    pub fn selected_folder(&self) -> Option<&FolderRecord> {
        self.selection.folder_path().and_then(|p| self.folder(p))
    }

    /// Expand or collapse the folder at `idx`
    pub fn toggle(&mut self, idx: usize) {
        logic::tree::toggle_folder(&mut self.folders, idx);
        self.cursor = self.cursor.min(self.row_count().saturating_sub(1));
    }

    /// User picked a row: record it and tell the parent
    pub fn select(&mut self, selection: Selection) -> TreeEvent {
        self.selection = selection.clone();
        TreeEvent::Selected(selection)
    }

    /// Select a folder by path and open every folder above it
    ///
    /// A missing path leaves the selection untouched.
    pub fn select_by_path(&mut self, path: &str) -> Result<(), BrowserError> {
        let idx = logic::tree::find_folder_index(&self.folders, path)
            .ok_or_else(|| BrowserError::not_found(format!("Folder {}", path)))?;

        if let Some(parent) = self.folders[idx].parent.clone() {
            logic::tree::open_ancestors(&mut self.folders, &parent);
        }
        self.selection = Selection::Folder(path.to_string());
        self.move_cursor_to(path);
        Ok(())
    }

    /// The parent changed the selection; follow it without emitting
    pub fn on_selected_folder_changed(&mut self, selection: &Selection) {
        match selection {
            Selection::Recents => {
                self.selection = Selection::Recents;
                self.cursor = 0;
            }
            Selection::Folder(path) => {
                if let Err(e) = self.select_by_path(path) {
                    tracing::debug!(error = %e, "ignoring selection change");
                }
            }
        }
    }

    /// Select the folder and flip its expansion in one step
    pub fn select_and_toggle(&mut self, idx: usize) -> Option<TreeEvent> {
        let path = self.folders.get(idx)?.path.clone();
        let event = self.select(Selection::Folder(path));
        self.toggle(idx);
        Some(event)
    }

    // ============================================
    // CURSOR
    // ============================================

    pub fn cursor_row(&self) -> Option<TreeRow> {
        self.rows().get(self.cursor).copied()
    }

    pub fn cursor_down(&mut self) {
        let next = logic::navigation::next_row(Some(self.cursor), self.row_count());
        self.cursor = next.unwrap_or(0);
    }

    pub fn cursor_up(&mut self) {
        let prev = logic::navigation::prev_row(Some(self.cursor), self.row_count());
        self.cursor = prev.unwrap_or(0);
    }

    pub fn cursor_page(&mut self, page: usize, down: bool) {
        let count = self.row_count();
        let moved = if down {
            logic::navigation::page_down(Some(self.cursor), count, page)
        } else {
            logic::navigation::page_up(Some(self.cursor), count, page)
        };
        self.cursor = moved.unwrap_or(0);
    }

    /// Select whatever row the cursor is on
    pub fn select_at_cursor(&mut self) -> Option<TreeEvent> {
        match self.cursor_row()? {
            TreeRow::Recents => Some(self.select(Selection::Recents)),
            TreeRow::Folder(idx) => {
                let path = self.folders[idx].path.clone();
                Some(self.select(Selection::Folder(path)))
            }
        }
    }

    pub fn toggle_at_cursor(&mut self) {
        if let Some(TreeRow::Folder(idx)) = self.cursor_row() {
            self.toggle(idx);
        }
    }

    /// Left arrow: collapse an open folder, otherwise jump to its parent
    pub fn collapse_or_parent(&mut self) {
        let Some(TreeRow::Folder(idx)) = self.cursor_row() else {
            return;
        };
        if self.folders[idx].open {
            self.toggle(idx);
        } else if let Some(parent) = self.folders[idx].parent.clone() {
            self.move_cursor_to(&parent);
        }
    }

    fn move_cursor_to(&mut self, path: &str) {
        if let Some(row) = self
            .rows()
            .iter()
            .position(|r| matches!(r, TreeRow::Folder(i) if self.folders[*i].path == path))
        {
            self.cursor = row;
        }
    }
}
