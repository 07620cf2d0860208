//! File List Model
//!
//! Holds a copy of the collection the list is bound to (a folder's
//! subfolders and files, or the recent files), plus sort, search, selection
//! and inline-rename state.

use crate::api::{FileRecord, FolderRecord, ObjectId};
use crate::error::BrowserError;
use crate::logic;
use crate::messages::{FileListEvent, RenameRequest};
use crate::SortState;

/// Contents the list is bound to
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collection {
    /// `None` for the recent-files list
    pub folder_path: Option<String>,
    pub children: Vec<FileRecord>,
    pub files: Vec<FileRecord>,
}

impl Collection {
    pub fn recents(files: Vec<FileRecord>) -> Self {
        Self {
            folder_path: None,
            children: Vec::new(),
            files,
        }
    }

    pub fn folder(folder: &FolderRecord) -> Self {
        Self {
            folder_path: Some(folder.path.clone()),
            children: folder.children.clone(),
            files: folder.files.clone(),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.children.iter().chain(self.files.iter())
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut FileRecord> {
        self.children.iter_mut().chain(self.files.iter_mut())
    }
}

/// Inline rename in progress
#[derive(Clone, Debug, PartialEq)]
pub struct InlineEdit {
    pub file: FileRecord,
    pub buffer: String,
}

#[derive(Clone, Debug, Default)]
pub struct FileList {
    pub collection: Collection,
    /// Server order, restored when the sort cycles back to Unsorted
    snapshot: Collection,
    pub sort_state: SortState,
    pub search_query: String,
    pub selected: Option<FileRecord>,
    /// Index into [`FileList::rows`]
    pub cursor: Option<usize>,
    pub editing: Option<InlineEdit>,
}

impl FileList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a new collection
    ///
    /// Resets the selection and the sort, snapshots the incoming order and
    /// re-applies the current search.
    pub fn set_folder(&mut self, collection: Collection) {
        self.snapshot = collection.clone();
        self.collection = collection;
        self.selected = None;
        self.editing = None;
        self.sort_state = SortState::Unsorted;
        let query = self.search_query.clone();
        self.search(&query);
        self.cursor = if self.row_count() > 0 { Some(0) } else { None };
    }

    /// Rows that pass the search filter, folders first
    pub fn rows(&self) -> Vec<&FileRecord> {
        self.collection.iter().filter(|f| f.in_result).collect()
    }

    pub fn row_count(&self) -> usize {
        self.collection.iter().filter(|f| f.in_result).count()
    }

    pub fn cursor_file(&self) -> Option<&FileRecord> {
        self.cursor.and_then(|i| self.rows().get(i).copied())
    }

    // ============================================
    // SORT & SEARCH
    // ============================================

    /// Step the name sort: Unsorted → Descending → Ascending → Unsorted
    pub fn sort_cycle(&mut self) {
        self.sort_state = logic::sorting::next_sort_state(self.sort_state);
        match self.sort_state {
            SortState::Unsorted => {
                self.collection = self.snapshot.clone();
                let query = self.search_query.clone();
                self.search(&query);
            }
            state => {
                logic::sorting::sort_records(&mut self.collection.children, state);
                logic::sorting::sort_records(&mut self.collection.files, state);
            }
        }
        self.cursor = logic::navigation::clamp_row(self.cursor, self.row_count());
    }

    /// Flag every record against `query`; returns the match count
    pub fn search(&mut self, query: &str) -> usize {
        self.search_query = query.to_string();
        let matches = logic::search::apply_search(&mut self.collection.children, query)
            + logic::search::apply_search(&mut self.collection.files, query);
        self.cursor = match self.cursor {
            None if matches > 0 => Some(0),
            cursor => logic::navigation::clamp_row(cursor, matches),
        };
        matches
    }

    // ============================================
    // SELECTION
    // ============================================

    /// Record the selection; folders also announce their path
    pub fn select_file(&mut self, file: &FileRecord) -> Vec<FileListEvent> {
        self.selected = Some(file.clone());
        let mut events = vec![FileListEvent::FileSelected(file.clone())];
        if file.is_folder() {
            events.push(FileListEvent::FolderSelected(file.path.clone()));
        }
        events
    }

    /// Ask the parent to open or save `file`
    ///
    /// Nothing happens while that file is being renamed inline.
    pub fn commit_file(&mut self, file: &FileRecord) -> Option<FileListEvent> {
        if self.editing.as_ref().is_some_and(|e| &e.file == file) {
            return None;
        }
        self.selected = Some(file.clone());
        Some(FileListEvent::Commit(file.clone()))
    }

    pub fn select_at_cursor(&mut self) -> Vec<FileListEvent> {
        match self.cursor_file().cloned() {
            Some(file) => self.select_file(&file),
            None => Vec::new(),
        }
    }

    pub fn commit_at_cursor(&mut self) -> Option<FileListEvent> {
        let file = self.cursor_file()?.clone();
        self.commit_file(&file)
    }

    pub fn cursor_down(&mut self) {
        self.cursor = logic::navigation::next_row(self.cursor, self.row_count());
    }

    pub fn cursor_up(&mut self) {
        self.cursor = logic::navigation::prev_row(self.cursor, self.row_count());
    }

    pub fn cursor_page(&mut self, page: usize, down: bool) {
        let count = self.row_count();
        self.cursor = if down {
            logic::navigation::page_down(self.cursor, count, page)
        } else {
            logic::navigation::page_up(self.cursor, count, page)
        };
    }

    pub fn cursor_first(&mut self) {
        self.cursor = if self.row_count() > 0 { Some(0) } else { None };
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.row_count().checked_sub(1);
    }

    // ============================================
    // INLINE RENAME
    // ============================================

    /// Start editing the name of the highlighted row
    pub fn begin_rename(&mut self) -> Result<(), BrowserError> {
        let file = self
            .cursor_file()
            .cloned()
            .ok_or_else(|| BrowserError::not_found("Selected file"))?;
        if file.id().is_none() {
            return Err(BrowserError::validation("Object id"));
        }
        self.editing = Some(InlineEdit {
            buffer: file.name.clone(),
            file,
        });
        Ok(())
    }

    pub fn edit_push(&mut self, c: char) {
        if let Some(edit) = self.editing.as_mut() {
            edit.buffer.push(c);
        }
    }

    pub fn edit_pop(&mut self) {
        if let Some(edit) = self.editing.as_mut() {
            edit.buffer.pop();
        }
    }

    pub fn cancel_rename(&mut self) {
        self.editing = None;
    }

    /// Close the editor and describe the rename to send
    ///
    /// Returns `Ok(None)` when the name did not change.
    pub fn finish_rename(&mut self) -> Result<Option<RenameRequest>, BrowserError> {
        let Some(edit) = self.editing.as_ref() else {
            return Ok(None);
        };
        let new_name = logic::file::validate_name(&edit.buffer)?.to_string();
        let Some(edit) = self.editing.take() else {
            return Ok(None);
        };
        if new_name == edit.file.name {
            return Ok(None);
        }
        let id = edit
            .file
            .id()
            .ok_or_else(|| BrowserError::validation("Object id"))?
            .to_string();

        Ok(Some(RenameRequest {
            id,
            path: logic::file::rename_target_path(&edit.file).to_string(),
            record_path: edit.file.path.clone(),
            old_name: edit.file.name,
            new_name,
            file_type: edit.file.file_type,
        }))
    }

    /// Apply a successful rename to the bound records
    ///
    /// Returns false if the record is no longer in this list.
    pub fn apply_rename(&mut self, request: &RenameRequest, object_id: &ObjectId) -> bool {
        let mut found = false;
        for collection in [&mut self.collection, &mut self.snapshot] {
            for file in collection.iter_mut().filter(|f| request.targets(f)) {
                rename_record(file, request, object_id);
                found = true;
            }
        }
        if let Some(selected) = self.selected.as_mut().filter(|f| request.targets(f)) {
            rename_record(selected, request, object_id);
        }
        found
    }
}

/// Give a record its new name and server id
pub fn rename_record(file: &mut FileRecord, request: &RenameRequest, object_id: &ObjectId) {
    file.name = request.new_name.clone();
    file.object_id = Some(object_id.clone());
}
