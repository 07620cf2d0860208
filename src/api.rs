use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Type tag the server uses for directories
pub const FOLDER_TYPE: &str = "folder";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ObjectId {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub file_type: String,
    #[serde(default)]
    pub object_id: Option<ObjectId>,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    // Epoch millis, as the server serializes java.util.Date
    #[serde(default)]
    pub date: Option<i64>,
    #[serde(default = "default_in_result", skip_serializing)]
    pub in_result: bool,
}

fn default_in_result() -> bool {
    true
}

impl FileRecord {
    pub fn is_folder(&self) -> bool {
        self.file_type == FOLDER_TYPE
    }

    pub fn id(&self) -> Option<&str> {
        self.object_id.as_ref().map(|o| o.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub visible: bool,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub children: Vec<FileRecord>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub files: Vec<FileRecord>,
    #[serde(default)]
    pub object_id: Option<ObjectId>,
}

/// Helper function to deserialize null as empty vector
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Operations the file dialog needs from the repository browser endpoint
#[async_trait]
pub trait BrowserService: Send + Sync {
    async fn get_directory_tree(&self) -> Result<Vec<FolderRecord>>;
    async fn get_recent_files(&self) -> Result<Vec<FileRecord>>;
    /// Returns false when the server answered but did not load the file
    async fn open_file(&self, id: &str, file_type: &str) -> Result<bool>;
    async fn save_file(&self, path: &str, name: &str) -> Result<bool>;
    async fn rename(&self, id: &str, new_name: &str, path: &str, file_type: &str)
        -> Result<ObjectId>;
}

#[derive(Clone)]
pub struct BrowserClient {
    base_url: String,
    client: Client,
}

impl BrowserClient {
    /// `base_url` is the endpoint root, e.g. `http://localhost:9051/cxf/browser`
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Send a request with the defaults every endpoint expects
    async fn wrap_http(&self, method: Method, url: &str) -> Result<reqwest::Response> {
        tracing::debug!(%method, url, "browser request");
        let response = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!("API error ({}): {}", status, error_text));
        }

        Ok(response)
    }

    async fn http_get(&self, url: &str) -> Result<reqwest::Response> {
        self.wrap_http(Method::GET, url).await
    }

    async fn http_post(&self, url: &str) -> Result<reqwest::Response> {
        self.wrap_http(Method::POST, url).await
    }
}

#[async_trait]
impl BrowserService for BrowserClient {
    async fn get_directory_tree(&self) -> Result<Vec<FolderRecord>> {
        let response = self
            .http_get(&self.url("loadDirectoryTree"))
            .await
            .context("Failed to load directory tree")?;

        // No repository connected
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let text = response.text().await.context("Failed to read response")?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let folders: Vec<FolderRecord> =
            serde_json::from_str(&text).context("Failed to parse directory tree")?;
        Ok(folders)
    }

    async fn get_recent_files(&self) -> Result<Vec<FileRecord>> {
        let response = self
            .http_get(&self.url("recentFiles"))
            .await
            .context("Failed to load recent files")?;

        let files: Vec<FileRecord> = response
            .json()
            .await
            .context("Failed to parse recent files")?;
        Ok(files)
    }

    async fn open_file(&self, id: &str, file_type: &str) -> Result<bool> {
        let url = format!(
            "{}?id={}&type={}",
            self.url("loadFile"),
            urlencoding::encode(id),
            urlencoding::encode(file_type)
        );
        let response = self.http_get(&url).await.context("Failed to open file")?;
        Ok(response.status() == StatusCode::OK)
    }

    async fn save_file(&self, path: &str, name: &str) -> Result<bool> {
        let url = format!(
            "{}?path={}&name={}",
            self.url("saveFile"),
            urlencoding::encode(path),
            urlencoding::encode(name)
        );
        let response = self.http_get(&url).await.context("Failed to save file")?;
        Ok(response.status() == StatusCode::OK)
    }

    async fn rename(
        &self,
        id: &str,
        new_name: &str,
        path: &str,
        file_type: &str,
    ) -> Result<ObjectId> {
        let url = format!(
            "{}?id={}&path={}&newName={}&type={}",
            self.url("rename"),
            urlencoding::encode(id),
            urlencoding::encode(path),
            urlencoding::encode(new_name),
            urlencoding::encode(file_type)
        );
        let response = self
            .http_post(&url)
            .await
            .context("Failed to rename")?;

        let object_id: ObjectId = response
            .json()
            .await
            .context("Failed to parse rename response")?;
        Ok(object_id)
    }
}
