//! Dialog flows driven through the background API worker
//!
//! A scripted `BrowserService` stands in for the server; responses are fed
//! back into the model the same way the binary's handler does.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use repotui::api::{BrowserService, FileRecord, FolderRecord, ObjectId};
use repotui::messages::Selection;
use repotui::model::{Model, Outcome};
use repotui::services::{spawn_api_service, ApiRequest, ApiResponse};
use repotui::OpenMode;

fn file(name: &str, parent: &str) -> FileRecord {
    FileRecord {
        name: name.to_string(),
        file_type: "transformation".to_string(),
        object_id: Some(ObjectId {
            id: format!("id-{}", name),
        }),
        path: format!("{}/{}.ktr", parent, name),
        parent: Some(parent.to_string()),
        extension: Some(".ktr".to_string()),
        date: Some(1_700_000_000_000),
        in_result: true,
    }
}

fn folder(path: &str, depth: u32, files: Vec<FileRecord>) -> FolderRecord {
    let parent = path
        .rsplit_once('/')
        .map(|(p, _)| p)
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    FolderRecord {
        name: path.rsplit('/').next().unwrap_or_default().to_string(),
        path: path.to_string(),
        parent,
        depth,
        has_children: false,
        open: false,
        visible: false,
        children: vec![],
        files,
        object_id: None,
    }
}

#[derive(Default)]
struct ScriptedBrowser {
    tree_fails: bool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBrowser {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BrowserService for ScriptedBrowser {
    async fn get_directory_tree(&self) -> Result<Vec<FolderRecord>> {
        self.calls.lock().unwrap().push("tree".to_string());
        if self.tree_fails {
            return Err(anyhow!("connection refused").context("Failed to load directory tree"));
        }
        Ok(vec![folder(
            "/public",
            0,
            vec![file("sales", "/public"), file("hr", "/public")],
        )])
    }

    async fn get_recent_files(&self) -> Result<Vec<FileRecord>> {
        self.calls.lock().unwrap().push("recents".to_string());
        Ok(vec![file("sales", "/public")])
    }

    async fn open_file(&self, id: &str, file_type: &str) -> Result<bool> {
        self.calls.lock().unwrap().push(format!("open {} {}", id, file_type));
        Ok(true)
    }

    async fn save_file(&self, path: &str, name: &str) -> Result<bool> {
        self.calls.lock().unwrap().push(format!("save {} {}", path, name));
        Ok(name != "readonly")
    }

    async fn rename(&self, id: &str, new_name: &str, path: &str, file_type: &str) -> Result<ObjectId> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("rename {} {} {} {}", id, new_name, path, file_type));
        Ok(ObjectId {
            id: format!("{}-renamed", id),
        })
    }
}

fn dispatch(model: &mut Model, response: ApiResponse) {
    match response {
        ApiResponse::DirectoryTreeResult { folders } => model.on_directory_tree(folders),
        ApiResponse::RecentFilesResult { files } => model.on_recent_files(files),
        ApiResponse::OpenResult { name, opened } => model.on_open_result(name, opened),
        ApiResponse::SaveResult { path, name, saved } => model.on_save_result(path, name, saved),
        ApiResponse::RenameResult { request, object_id } => {
            model.on_rename_result(request, object_id)
        }
    }
}

async fn pump(
    model: &mut Model,
    tx: &mpsc::UnboundedSender<ApiRequest>,
    rx: &mut mpsc::UnboundedReceiver<ApiResponse>,
    requests: Vec<ApiRequest>,
) {
    let count = requests.len();
    for request in requests {
        tx.send(request).unwrap();
    }
    for _ in 0..count {
        let response = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("response in time")
            .expect("worker alive");
        dispatch(model, response);
    }
}

async fn loaded(mode: OpenMode, service: Arc<ScriptedBrowser>) -> (
    Model,
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (tx, mut rx) = spawn_api_service(service);
    let mut model = Model::new(mode, false);
    let requests = model.init();
    assert!(model.loading.tree && model.loading.recents);
    pump(&mut model, &tx, &mut rx, requests).await;
    (model, tx, rx)
}

#[tokio::test]
async fn test_initial_load_binds_recents() {
    let service = Arc::new(ScriptedBrowser::default());
    let (model, _tx, _rx) = loaded(OpenMode::Open, service.clone()).await;

    assert!(!model.loading.tree && !model.loading.recents);
    assert_eq!(model.selection, Selection::Recents);
    assert_eq!(model.tree.folders.len(), 1);
    assert!(model.tree.folders[0].visible);
    assert_eq!(model.files.row_count(), 1);

    let mut calls = service.calls();
    calls.sort();
    assert_eq!(calls, vec!["recents", "tree"]);
}

#[tokio::test]
async fn test_open_file_from_folder() {
    let service = Arc::new(ScriptedBrowser::default());
    let (mut model, tx, mut rx) = loaded(OpenMode::Open, service.clone()).await;

    model.select_folder_by_path("/public").unwrap();
    assert_eq!(model.files.row_count(), 2);

    let request = model.files_commit_at_cursor().expect("open request");
    assert_eq!(
        request,
        ApiRequest::OpenFile {
            id: "id-sales".to_string(),
            file_type: "transformation".to_string(),
            name: "sales".to_string(),
        }
    );
    pump(&mut model, &tx, &mut rx, vec![request]).await;

    assert!(model.ui.should_quit);
    assert_eq!(
        model.outcome,
        Some(Outcome::Opened {
            name: "sales".to_string()
        })
    );
    assert!(service.calls().contains(&"open id-sales transformation".to_string()));
}

#[tokio::test]
async fn test_save_requires_a_folder() {
    let service = Arc::new(ScriptedBrowser::default());
    let (mut model, tx, mut rx) = loaded(OpenMode::Save, service.clone()).await;

    model.ui.save_name = "new_job".to_string();
    assert!(model.confirm_save().is_none());
    assert!(model.ui.toast.as_ref().is_some_and(|t| t.is_error));

    model.select_folder_by_path("/public").unwrap();
    let request = model.confirm_save().expect("save request");
    assert_eq!(
        request,
        ApiRequest::SaveFile {
            path: "/public".to_string(),
            name: "new_job".to_string(),
        }
    );
    pump(&mut model, &tx, &mut rx, vec![request]).await;
    assert_eq!(
        model.outcome,
        Some(Outcome::Saved {
            path: "/public".to_string(),
            name: "new_job".to_string(),
        })
    );
}

#[tokio::test]
async fn test_rejected_save_keeps_dialog_open() {
    let service = Arc::new(ScriptedBrowser::default());
    let (mut model, tx, mut rx) = loaded(OpenMode::Save, service).await;

    model.select_folder_by_path("/public").unwrap();
    model.ui.save_name = "readonly".to_string();
    let request = model.confirm_save().expect("save request");
    pump(&mut model, &tx, &mut rx, vec![request]).await;

    assert!(!model.ui.should_quit);
    assert!(model.outcome.is_none());
    assert!(model.ui.toast.as_ref().is_some_and(|t| t.is_error));
}

#[tokio::test]
async fn test_rename_updates_list_tree_and_recents() {
    let service = Arc::new(ScriptedBrowser::default());
    let (mut model, tx, mut rx) = loaded(OpenMode::Open, service.clone()).await;

    model.select_folder_by_path("/public").unwrap();
    model.begin_rename();
    for _ in 0.."sales".len() {
        model.files.edit_pop();
    }
    for c in "revenue".chars() {
        model.files.edit_push(c);
    }
    let request = model.finish_rename().expect("rename request");
    pump(&mut model, &tx, &mut rx, vec![request]).await;

    assert!(service
        .calls()
        .contains(&"rename id-sales revenue /public/sales.ktr transformation".to_string()));
    assert_eq!(model.files.rows()[0].name, "revenue");
    assert_eq!(model.files.rows()[0].id(), Some("id-sales-renamed"));
    assert_eq!(model.tree.folders[0].files[0].name, "revenue");
    assert_eq!(model.recents[0].name, "revenue");

    // Rebinding shows the renamed record
    model.select_folder(None).unwrap();
    model.select_folder_by_path("/public").unwrap();
    assert_eq!(model.files.rows()[0].name, "revenue");
}

#[tokio::test]
async fn test_tree_failure_reports_and_keeps_recents() {
    let service = Arc::new(ScriptedBrowser {
        tree_fails: true,
        ..Default::default()
    });
    let (model, _tx, _rx) = loaded(OpenMode::Open, service).await;

    assert!(!model.loading.tree);
    assert!(model.tree.folders.is_empty());
    assert_eq!(model.files.row_count(), 1);
    assert!(model.ui.toast.as_ref().is_some_and(|t| t.is_error));
}

#[tokio::test]
async fn test_refresh_keeps_folder_and_allows_save() {
    let service = Arc::new(ScriptedBrowser::default());
    let (mut model, tx, mut rx) = loaded(OpenMode::Save, service.clone()).await;
    model.select_folder_by_path("/public").unwrap();

    let requests = model.init();
    pump(&mut model, &tx, &mut rx, requests).await;

    let public = Selection::Folder("/public".to_string());
    assert_eq!(model.selection, public);
    assert_eq!(model.tree.selection, public);
    assert_eq!(model.files.row_count(), 2);

    model.ui.save_name = "quarterly".to_string();
    let save = model.confirm_save().expect("save request");
    pump(&mut model, &tx, &mut rx, vec![save]).await;
    assert!(service.calls().contains(&"save /public quarterly".to_string()));
}

#[tokio::test]
async fn test_reload_falls_back_when_folder_vanishes() {
    let service = Arc::new(ScriptedBrowser::default());
    let (mut model, _tx, _rx) = loaded(OpenMode::Open, service).await;

    model.selection = Selection::Folder("/gone".to_string());
    model.on_directory_tree(Ok(vec![folder("/public", 0, vec![])]));
    assert_eq!(model.selection, Selection::Recents);
    assert_eq!(model.tree.selection, Selection::Recents);
}

#[test]
fn test_missing_folder_is_silent_noop() {
    let mut model = Model::new(OpenMode::Open, false);
    model.on_directory_tree(Ok(vec![folder("/public", 0, vec![])]));
    model.select_folder_by_path("/public").unwrap();

    let err = model.select_folder_by_path("/nope").unwrap_err();
    model.report(&err);
    assert_eq!(model.selection, Selection::Folder("/public".to_string()));
    assert!(model.ui.toast.is_none());
    assert!(model.ui.error_dialog.is_none());
}
