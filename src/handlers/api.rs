//! API Response Handler
//!
//! Routes worker responses into the model.

use repotui::services::api::ApiResponse;

use crate::app::App;

/// Handle API response from background service
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::DirectoryTreeResult { folders } => {
            if let Ok(folders) = &folders {
                tracing::debug!(count = folders.len(), "directory tree received");
            }
            app.model.on_directory_tree(folders);
        }

        ApiResponse::RecentFilesResult { files } => {
            app.model.on_recent_files(files);
        }

        ApiResponse::OpenResult { name, opened } => {
            app.model.on_open_result(name, opened);
        }

        ApiResponse::SaveResult { path, name, saved } => {
            app.model.on_save_result(path, name, saved);
        }

        ApiResponse::RenameResult { request, object_id } => {
            app.model.on_rename_result(request, object_id);
        }
    }
}
