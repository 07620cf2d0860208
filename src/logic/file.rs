//! File record helpers
//!
//! Pure functions for rename targets and display labels.

use crate::api::FileRecord;
use crate::error::BrowserError;

/// Path the server uses to identify an item being renamed
///
/// Folders are addressed through their containing folder, files through
/// their own path.
///
/// # Examples
/// ```
/// use repotui::api::FileRecord;
/// use repotui::logic::file::rename_target_path;
///
/// let folder = FileRecord {
///     name: "admin".to_string(),
///     file_type: "folder".to_string(),
///     object_id: None,
///     path: "/home/admin".to_string(),
///     parent: Some("/home".to_string()),
///     extension: None,
///     date: None,
///     in_result: true,
/// };
/// assert_eq!(rename_target_path(&folder), "/home");
/// ```
pub fn rename_target_path(file: &FileRecord) -> &str {
    if file.is_folder() {
        file.parent.as_deref().unwrap_or(&file.path)
    } else {
        &file.path
    }
}

/// Check a name typed into the inline editor or the save box
pub fn validate_name(name: &str) -> Result<&str, BrowserError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BrowserError::validation("File name"));
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(BrowserError::invalid(
            "File name",
            "must not contain path separators",
        ));
    }
    Ok(trimmed)
}

/// Human label for the "Type" column
pub fn type_label(file: &FileRecord) -> &str {
    match file.file_type.as_str() {
        "folder" => "Folder",
        "transformation" => "Transformation",
        "job" => "Job",
        other => other,
    }
}
