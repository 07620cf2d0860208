//! Events exchanged between the dialog components
//!
//! Parents drive children through input methods; children answer with the
//! events below, which the app shell routes.

use crate::api::FileRecord;

/// What the file list is bound to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// The recent-files pseudo-folder
    #[default]
    Recents,
    /// A folder in the tree, by path
    Folder(String),
}

impl Selection {
    pub fn folder_path(&self) -> Option<&str> {
        match self {
            Selection::Recents => None,
            Selection::Folder(path) => Some(path),
        }
    }
}

/// Output of the folder tree
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEvent {
    Selected(Selection),
}

/// Output of the file list
#[derive(Debug, Clone, PartialEq)]
pub enum FileListEvent {
    FileSelected(FileRecord),
    FolderSelected(String),
    /// Open or save this file
    Commit(FileRecord),
}

/// A rename the user confirmed in the inline editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    pub id: String,
    pub old_name: String,
    pub new_name: String,
    /// Path sent to the server (the parent for folders)
    pub path: String,
    /// Path of the record itself, used to find it again
    pub record_path: String,
    pub file_type: String,
}

impl RenameRequest {
    /// Whether `file` is the record this rename was issued for
    pub fn targets(&self, file: &FileRecord) -> bool {
        file.name == self.old_name && file.path == self.record_path && file.file_type == self.file_type
    }
}
