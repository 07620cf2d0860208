//! Repository host capabilities
//!
//! The wizard never touches repository storage itself; every side effect
//! goes through [`RepositoryHost`]. [`LocalHost`] keeps definitions in a JSON
//! file so the binary works without an embedding application.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logic::wizard::{KETTLE_DATABASE_REPOSITORY, KETTLE_FILE_REPOSITORY, PENTAHO_REPOSITORY};

/// A kind of repository the host can create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A repository the host already knows about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryEntry {
    /// Repository type id
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
    /// Details as submitted by the wizard
    #[serde(default)]
    pub settings: serde_json::Value,
}

pub trait RepositoryHost: Send {
    /// JSON array of [`RepositoryType`]
    fn get_repos(&self) -> Result<String>;

    fn list_repositories(&self) -> Result<Vec<RepositoryEntry>>;

    /// `settings` is the JSON of the details model; false means rejected
    fn create_repository(&mut self, type_id: &str, settings: &str) -> Result<bool>;

    fn set_default_repository(&mut self, name: &str) -> Result<()>;

    fn delete_repository(&mut self, name: &str) -> Result<bool>;

    /// Ask the user for a repository directory
    fn select_location(&mut self) -> Result<Option<PathBuf>>;

    fn connect_to_repository(&mut self, name: &str) -> Result<()>;

    fn close(&mut self);
}

/// Parse the host's repository type list
pub fn parse_repository_types(json: &str) -> Result<Vec<RepositoryType>> {
    serde_json::from_str(json).context("Failed to parse repository types")
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RepositoryStore {
    #[serde(default)]
    repositories: Vec<RepositoryEntry>,
}

/// Host backed by a JSON file of repository definitions
#[derive(Debug)]
pub struct LocalHost {
    path: PathBuf,
    store: RepositoryStore,
    connected: Option<String>,
    closed: bool,
}

impl LocalHost {
    /// Open the store at `path`; a missing file starts empty
    pub fn open(path: &Path) -> Result<Self> {
        let store = if path.exists() {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            RepositoryStore::default()
        };
        tracing::debug!(path = %path.display(), count = store.repositories.len(), "repository store opened");

        Ok(Self {
            path: path.to_path_buf(),
            store,
            connected: None,
            closed: false,
        })
    }

    pub fn connected(&self) -> Option<&str> {
        self.connected.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn write(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(&self.store)?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.store.repositories.iter().position(|r| r.name == name)
    }
}

impl RepositoryHost for LocalHost {
    fn get_repos(&self) -> Result<String> {
        let types = vec![
            RepositoryType {
                id: PENTAHO_REPOSITORY.to_string(),
                name: "Pentaho Repository".to_string(),
                description: "Connect to a Pentaho server repository".to_string(),
            },
            RepositoryType {
                id: KETTLE_FILE_REPOSITORY.to_string(),
                name: "File Repository".to_string(),
                description: "Store transformations and jobs in a local directory".to_string(),
            },
            RepositoryType {
                id: KETTLE_DATABASE_REPOSITORY.to_string(),
                name: "Database Repository".to_string(),
                description: "Store transformations and jobs in a relational database"
                    .to_string(),
            },
        ];
        Ok(serde_json::to_string(&types)?)
    }

    fn list_repositories(&self) -> Result<Vec<RepositoryEntry>> {
        Ok(self.store.repositories.clone())
    }

    fn create_repository(&mut self, type_id: &str, settings: &str) -> Result<bool> {
        let settings: serde_json::Value =
            serde_json::from_str(settings).context("Failed to parse repository settings")?;
        let name = settings
            .get("displayName")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        if name.is_empty() || self.find(&name).is_some() {
            tracing::debug!(name, "repository rejected");
            return Ok(false);
        }

        self.store.repositories.push(RepositoryEntry {
            id: type_id.to_string(),
            description: settings
                .get("description")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            name,
            is_default: false,
            settings,
        });
        self.write()?;
        Ok(true)
    }

    fn set_default_repository(&mut self, name: &str) -> Result<()> {
        if self.find(name).is_none() {
            anyhow::bail!("Repository {} not found", name);
        }
        for repo in self.store.repositories.iter_mut() {
            repo.is_default = repo.name == name;
        }
        self.write()
    }

    fn delete_repository(&mut self, name: &str) -> Result<bool> {
        let Some(idx) = self.find(name) else {
            return Ok(false);
        };
        self.store.repositories.remove(idx);
        self.write()?;
        Ok(true)
    }

    fn select_location(&mut self) -> Result<Option<PathBuf>> {
        // No chooser in a terminal; offer the working directory to edit
        let dir = std::env::current_dir().context("Failed to read working directory")?;
        Ok(Some(dir))
    }

    fn connect_to_repository(&mut self, name: &str) -> Result<()> {
        if self.find(name).is_none() {
            anyhow::bail!("Repository {} not found", name);
        }
        tracing::info!(name, "connected to repository");
        self.connected = Some(name.to_string());
        Ok(())
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> (tempfile::TempDir, LocalHost) {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::open(&dir.path().join("repos").join("repositories.json")).unwrap();
        (dir, host)
    }

    #[test]
    fn test_repository_types_parse() {
        let (_dir, host) = host();
        let types = parse_repository_types(&host.get_repos().unwrap()).unwrap();
        assert!(types.iter().any(|t| t.id == KETTLE_FILE_REPOSITORY));
    }

    #[test]
    fn test_create_persists_and_rejects_duplicates() {
        let (dir, mut host) = host();
        let settings = r#"{"displayName": "local", "location": "/tmp/repo", "description": "dev"}"#;
        assert!(host.create_repository(KETTLE_FILE_REPOSITORY, settings).unwrap());
        assert!(!host.create_repository(KETTLE_FILE_REPOSITORY, settings).unwrap());

        let reopened = LocalHost::open(&dir.path().join("repos").join("repositories.json")).unwrap();
        let repos = reopened.list_repositories().unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].description, "dev");
    }

    #[test]
    fn test_create_without_name_rejected() {
        let (_dir, mut host) = host();
        assert!(!host.create_repository(KETTLE_FILE_REPOSITORY, r#"{"displayName": " "}"#).unwrap());
    }

    #[test]
    fn test_default_is_exclusive() {
        let (_dir, mut host) = host();
        host.create_repository(KETTLE_FILE_REPOSITORY, r#"{"displayName": "a"}"#).unwrap();
        host.create_repository(KETTLE_FILE_REPOSITORY, r#"{"displayName": "b"}"#).unwrap();
        host.set_default_repository("a").unwrap();
        host.set_default_repository("b").unwrap();

        let repos = host.list_repositories().unwrap();
        assert!(!repos[0].is_default);
        assert!(repos[1].is_default);
        assert!(host.set_default_repository("c").is_err());
    }

    #[test]
    fn test_delete_and_connect() {
        let (_dir, mut host) = host();
        host.create_repository(KETTLE_FILE_REPOSITORY, r#"{"displayName": "a"}"#).unwrap();
        host.connect_to_repository("a").unwrap();
        assert_eq!(host.connected(), Some("a"));

        assert!(host.delete_repository("a").unwrap());
        assert!(!host.delete_repository("a").unwrap());
        assert!(host.connect_to_repository("a").is_err());
    }
}
