//! Application Model
//!
//! The file dialog's state, composed of focused sub-models:
//!
//! - **FolderTree**: folder list, expansion, tree cursor
//! - **FileList**: bound collection, sort, search flags, inline rename
//! - **UiModel**: focus, dialogs, toasts
//!
//! The root [`Model`] owns the top-level selection and the search query and
//! routes the events the sub-models emit. It performs no I/O: methods that
//! need the server return [`ApiRequest`]s for the caller to send, and
//! results come back through the `on_*` methods.

pub mod files;
pub mod tree;
pub mod ui;
pub mod wizard;

pub use files::{Collection, FileList};
pub use tree::{FolderTree, TreeRow};
pub use ui::UiModel;
pub use wizard::Wizard;

use crate::api::{FileRecord, FolderRecord, ObjectId};
use crate::error::BrowserError;
use crate::logic;
use crate::messages::{FileListEvent, RenameRequest, Selection, TreeEvent};
use crate::services::api::ApiRequest;
use crate::OpenMode;

/// Requests waiting for a response
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub tree: bool,
    pub recents: bool,
}

/// How the dialog finished
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Opened { name: String },
    Saved { path: String, name: String },
}

/// Root model of the file open/save dialog
#[derive(Clone, Debug)]
pub struct Model {
    pub mode: OpenMode,
    pub tree: FolderTree,
    pub files: FileList,
    pub recents: Vec<FileRecord>,
    pub selection: Selection,
    pub search_query: String,
    pub loading: LoadingState,
    pub ui: UiModel,
    pub outcome: Option<Outcome>,
}

impl Model {
    pub fn new(mode: OpenMode, vim_mode: bool) -> Self {
        Self {
            mode,
            tree: FolderTree::new(),
            files: FileList::new(),
            recents: Vec::new(),
            selection: Selection::Recents,
            search_query: String::new(),
            loading: LoadingState::default(),
            ui: UiModel::new(vim_mode),
            outcome: None,
        }
    }

    /// Requests that load (or reload) the tree and the recent files
    ///
    /// The current selection is kept; the responses rebind it.
    pub fn init(&mut self) -> Vec<ApiRequest> {
        self.loading = LoadingState {
            tree: true,
            recents: true,
        };
        vec![ApiRequest::LoadDirectoryTree, ApiRequest::LoadRecentFiles]
    }

    /// Show a user-visible error; lookups that missed stay silent
    pub fn report(&mut self, error: &BrowserError) {
        if error.is_user_visible() {
            tracing::warn!(error = %error, "action failed");
            match error {
                BrowserError::Host { .. } => self.ui.show_error_dialog(error.to_string()),
                _ => self.ui.show_error_toast(error.to_string()),
            }
        } else {
            tracing::debug!(error = %error, "ignored");
        }
    }

    fn report_network(&mut self, action: &str, error: &anyhow::Error) {
        let detail = format!("{:#}", error);
        tracing::debug!(action, error = %detail, "request failed");
        self.report(&BrowserError::network(action, error));
    }

    fn settle<T>(&mut self, result: Result<T, BrowserError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    // ============================================
    // SELECTION
    // ============================================

    /// Bind the file list to a folder, or to the recent files for `None`
    pub fn select_folder(&mut self, path: Option<&str>) -> Result<(), BrowserError> {
        match path {
            Some(path) => self.select_folder_by_path(path),
            None => {
                self.selection = Selection::Recents;
                self.tree.on_selected_folder_changed(&Selection::Recents);
                self.files
                    .set_folder(Collection::recents(self.recents.clone()));
                Ok(())
            }
        }
    }

    /// Select a folder anywhere in the tree, expanding its ancestors
    ///
    /// An unknown path leaves everything as it was.
    pub fn select_folder_by_path(&mut self, path: &str) -> Result<(), BrowserError> {
        self.tree.select_by_path(path)?;
        self.selection = Selection::Folder(path.to_string());
        if let Some(folder) = self.tree.folder(path) {
            let collection = Collection::folder(folder);
            self.files.set_folder(collection);
        }
        Ok(())
    }

    pub fn current_folder(&self) -> Option<&FolderRecord> {
        self.selection.folder_path().and_then(|p| self.tree.folder(p))
    }

    /// Act on a chosen file: folders navigate, others open or save
    pub fn select_file(&mut self, file: &FileRecord) -> Result<Option<ApiRequest>, BrowserError> {
        if file.is_folder() {
            self.select_folder_by_path(&file.path)?;
            return Ok(None);
        }

        match self.mode {
            OpenMode::Open => {
                let id = file
                    .id()
                    .ok_or_else(|| BrowserError::validation("Object id"))?;
                Ok(Some(ApiRequest::OpenFile {
                    id: id.to_string(),
                    file_type: file.file_type.clone(),
                    name: file.name.clone(),
                }))
            }
            OpenMode::Save => {
                self.ui.save_name = file.name.clone();
                self.save().map(Some)
            }
        }
    }

    /// Save under the typed name into the current folder
    pub fn save(&mut self) -> Result<ApiRequest, BrowserError> {
        let path = self
            .selection
            .folder_path()
            .ok_or_else(|| BrowserError::validation("Destination folder"))?
            .to_string();
        let name = logic::file::validate_name(&self.ui.save_name)?.to_string();
        Ok(ApiRequest::SaveFile { path, name })
    }

    // ============================================
    // SEARCH
    // ============================================

    pub fn set_search(&mut self, query: &str) -> usize {
        self.search_query = query.to_string();
        self.do_search()
    }

    /// Re-run the search over whatever the list is bound to
    pub fn do_search(&mut self) -> usize {
        let query = self.search_query.clone();
        self.files.search(&query)
    }

    // ============================================
    // EVENT ROUTING
    // ============================================

    pub fn handle_tree_event(&mut self, event: TreeEvent) -> Result<(), BrowserError> {
        let TreeEvent::Selected(selection) = event;
        if selection == self.selection {
            return Ok(());
        }
        self.select_folder(selection.folder_path())
    }

    pub fn handle_file_event(
        &mut self,
        event: FileListEvent,
    ) -> Result<Option<ApiRequest>, BrowserError> {
        match event {
            FileListEvent::FileSelected(file) => {
                if self.mode == OpenMode::Save && !file.is_folder() {
                    self.ui.save_name = file.name;
                }
                Ok(None)
            }
            FileListEvent::FolderSelected(path) => {
                self.select_folder_by_path(&path)?;
                Ok(None)
            }
            FileListEvent::Commit(file) => self.select_file(&file),
        }
    }

    /// Select the highlighted tree row
    pub fn tree_select_at_cursor(&mut self) {
        if let Some(event) = self.tree.select_at_cursor() {
            let result = self.handle_tree_event(event);
            self.settle(result);
        }
    }

    /// Select the highlighted file row, drilling into folders
    pub fn files_select_at_cursor(&mut self) -> Vec<ApiRequest> {
        let mut requests = Vec::new();
        for event in self.files.select_at_cursor() {
            let result = self.handle_file_event(event);
            if let Some(Some(request)) = self.settle(result) {
                requests.push(request);
            }
        }
        requests
    }

    /// Open or save the highlighted file row
    pub fn files_commit_at_cursor(&mut self) -> Option<ApiRequest> {
        let event = self.files.commit_at_cursor()?;
        let result = self.handle_file_event(event);
        self.settle(result).flatten()
    }

    /// Confirm the save-name input
    pub fn confirm_save(&mut self) -> Option<ApiRequest> {
        let result = self.save();
        self.settle(result)
    }

    pub fn begin_rename(&mut self) {
        let result = self.files.begin_rename();
        self.settle(result);
    }

    pub fn finish_rename(&mut self) -> Option<ApiRequest> {
        let result = self.files.finish_rename();
        self.settle(result).flatten().map(ApiRequest::Rename)
    }

    // ============================================
    // RESPONSES
    // ============================================

    pub fn on_directory_tree(&mut self, folders: anyhow::Result<Vec<FolderRecord>>) {
        self.loading.tree = false;
        match folders {
            Ok(folders) => {
                self.tree.load(folders);
                // Rebind so the list shows the fresh records
                if let Selection::Folder(path) = self.selection.clone() {
                    if let Err(e) = self.select_folder_by_path(&path) {
                        tracing::debug!(error = %e, "selected folder gone after reload");
                        let result = self.select_folder(None);
                        self.settle(result);
                    }
                }
            }
            Err(e) => self.report_network("Loading folders", &e),
        }
    }

    pub fn on_recent_files(&mut self, files: anyhow::Result<Vec<FileRecord>>) {
        self.loading.recents = false;
        match files {
            Ok(files) => {
                self.recents = files;
                if self.selection == Selection::Recents {
                    self.files
                        .set_folder(Collection::recents(self.recents.clone()));
                }
            }
            Err(e) => self.report_network("Loading recent files", &e),
        }
    }

    pub fn on_open_result(&mut self, name: String, opened: anyhow::Result<bool>) {
        match opened {
            Ok(true) => {
                tracing::info!(name, "file opened");
                self.outcome = Some(Outcome::Opened { name });
                self.ui.should_quit = true;
            }
            Ok(false) => self
                .ui
                .show_error_toast(format!("Error: {} could not be opened", name)),
            Err(e) => self.report_network("Open", &e),
        }
    }

    pub fn on_save_result(&mut self, path: String, name: String, saved: anyhow::Result<bool>) {
        match saved {
            Ok(true) => {
                tracing::info!(path, name, "file saved");
                self.outcome = Some(Outcome::Saved { path, name });
                self.ui.should_quit = true;
            }
            Ok(false) => self
                .ui
                .show_error_toast(format!("Error: {} could not be saved", name)),
            Err(e) => self.report_network("Save", &e),
        }
    }

    pub fn on_rename_result(&mut self, request: RenameRequest, object_id: anyhow::Result<ObjectId>) {
        match object_id {
            Ok(object_id) => {
                self.files.apply_rename(&request, &object_id);
                self.apply_rename_to_sources(&request, &object_id);
                self.ui
                    .show_toast(format!("Renamed to {}", request.new_name));
            }
            Err(e) => self.report_network("Rename", &e),
        }
    }

    /// Keep the tree and recents in step with a rename so rebinding shows it
    fn apply_rename_to_sources(&mut self, request: &RenameRequest, object_id: &ObjectId) {
        for folder in self.tree.folders.iter_mut() {
            for file in folder
                .children
                .iter_mut()
                .chain(folder.files.iter_mut())
                .filter(|f| request.targets(f))
            {
                files::rename_record(file, request, object_id);
            }
        }
        if request.file_type == crate::api::FOLDER_TYPE {
            if let Some(folder) = self.tree.folder_mut(&request.record_path) {
                folder.name = request.new_name.clone();
                folder.object_id = Some(object_id.clone());
            }
        }
        for file in self.recents.iter_mut().filter(|f| request.targets(f)) {
            files::rename_record(file, request, object_id);
        }
    }

    // ============================================
    // TOASTS
    // ============================================

    pub fn should_dismiss_toast(&self) -> bool {
        self.ui.should_dismiss_toast()
    }

    pub fn dismiss_toast(&mut self) {
        self.ui.dismiss_toast();
    }
}
