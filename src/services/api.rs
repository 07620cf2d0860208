use anyhow::Result;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::api::{BrowserService, FileRecord, FolderRecord, ObjectId};
use crate::messages::RenameRequest;

/// Unique identifier for deduplicating requests
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestKey {
    DirectoryTree,
    RecentFiles,
    Open { id: String },
    Save { path: String, name: String },
    Rename { id: String },
}

/// API request types
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    LoadDirectoryTree,
    LoadRecentFiles,
    OpenFile {
        id: String,
        file_type: String,
        name: String,
    },
    SaveFile {
        path: String,
        name: String,
    },
    Rename(RenameRequest),
}

impl ApiRequest {
    /// Generate a unique key for deduplication
    pub fn key(&self) -> RequestKey {
        match self {
            ApiRequest::LoadDirectoryTree => RequestKey::DirectoryTree,
            ApiRequest::LoadRecentFiles => RequestKey::RecentFiles,
            ApiRequest::OpenFile { id, .. } => RequestKey::Open { id: id.clone() },
            ApiRequest::SaveFile { path, name } => RequestKey::Save {
                path: path.clone(),
                name: name.clone(),
            },
            ApiRequest::Rename(request) => RequestKey::Rename {
                id: request.id.clone(),
            },
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    DirectoryTreeResult {
        folders: Result<Vec<FolderRecord>>,
    },

    RecentFilesResult {
        files: Result<Vec<FileRecord>>,
    },

    OpenResult {
        name: String,
        opened: Result<bool>,
    },

    SaveResult {
        path: String,
        name: String,
        saved: Result<bool>,
    },

    RenameResult {
        request: RenameRequest,
        object_id: Result<ObjectId>,
    },
}

/// Internal message for tracking completed requests
pub(crate) enum InternalMessage {
    Completed(RequestKey),
}

/// API service worker that processes requests in the background
pub struct ApiService {
    client: Arc<dyn BrowserService>,
    request_queue: VecDeque<ApiRequest>,
    in_flight: HashSet<RequestKey>,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
}

impl ApiService {
    pub(crate) fn new(
        client: Arc<dyn BrowserService>,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            response_tx,
            completion_tx,
            max_concurrent: 4,
        }
    }

    /// Queue a request unless an identical one is queued or running
    fn enqueue(&mut self, request: ApiRequest) -> bool {
        let key = request.key();
        if self.in_flight.contains(&key) || self.request_queue.iter().any(|r| r.key() == key) {
            tracing::debug!(?key, "dropping duplicate request");
            return false;
        }
        self.request_queue.push_back(request);
        true
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight.len() >= self.max_concurrent {
            return;
        }

        let Some(request) = self.request_queue.pop_front() else {
            return;
        };

        let key = request.key();
        self.in_flight.insert(key.clone());

        let client = Arc::clone(&self.client);
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let response = Self::execute_request(client.as_ref(), request).await;
            let _ = response_tx.send(response);
            let _ = completion_tx.send(InternalMessage::Completed(key));
        });
    }

    /// Execute an API request and return the response
    async fn execute_request(client: &dyn BrowserService, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::LoadDirectoryTree => ApiResponse::DirectoryTreeResult {
                folders: client.get_directory_tree().await,
            },

            ApiRequest::LoadRecentFiles => ApiResponse::RecentFilesResult {
                files: client.get_recent_files().await,
            },

            ApiRequest::OpenFile {
                id,
                file_type,
                name,
            } => {
                let opened = client.open_file(&id, &file_type).await;
                if let Err(e) = &opened {
                    tracing::warn!(id, error = %e, "open failed");
                }
                ApiResponse::OpenResult { name, opened }
            }

            ApiRequest::SaveFile { path, name } => {
                let saved = client.save_file(&path, &name).await;
                ApiResponse::SaveResult { path, name, saved }
            }

            ApiRequest::Rename(request) => {
                let object_id = client
                    .rename(
                        &request.id,
                        &request.new_name,
                        &request.path,
                        &request.file_type,
                    )
                    .await;
                ApiResponse::RenameResult { request, object_id }
            }
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: Arc<dyn BrowserService>,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(request) => {
                            service.enqueue(request);
                        }
                        // UI side hung up
                        None => break,
                    }
                }

                Some(InternalMessage::Completed(key)) = completion_rx.recv() => {
                    service.in_flight.remove(&key);
                }

                _ = tick.tick() => {
                    while !service.request_queue.is_empty()
                        && service.in_flight.len() < service.max_concurrent
                    {
                        service.process_next();
                    }
                }
            }
        }
        tracing::debug!("api service stopped");
    });

    (request_tx, response_rx)
}
