//! Repository Wizard Model
//!
//! Step router, per-step detail models and the host side effects behind
//! finish, connect, delete and set-default.

use serde::Serialize;

use crate::error::BrowserError;
use crate::host::{parse_repository_types, RepositoryEntry, RepositoryHost, RepositoryType};
use crate::logic::wizard::{require_fields, validate_url, KETTLE_FILE_REPOSITORY, PENTAHO_REPOSITORY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    RepositoryList,
    SelectType,
    KettleFileDetails,
    PentahoDetails,
    Success,
}

impl WizardStep {
    pub fn route(&self) -> &'static str {
        match self {
            WizardStep::RepositoryList => "/repository-manager",
            WizardStep::SelectType => "/",
            WizardStep::KettleFileDetails => "/kettle-file-repository-details",
            WizardStep::PentahoDetails => "/pentaho-repository-connection-details",
            WizardStep::Success => "/success",
        }
    }

    pub fn from_route(route: &str) -> Option<Self> {
        [
            WizardStep::RepositoryList,
            WizardStep::SelectType,
            WizardStep::KettleFileDetails,
            WizardStep::PentahoDetails,
            WizardStep::Success,
        ]
        .into_iter()
        .find(|s| s.route() == route)
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::RepositoryList => "Repository Manager",
            WizardStep::SelectType => "Repository Connection",
            WizardStep::KettleFileDetails => "File Repository Details",
            WizardStep::PentahoDetails => "Pentaho Repository Details",
            WizardStep::Success => "Success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KettleFileRepositoryModel {
    pub display_name: String,
    pub location: String,
    pub do_not_modify: bool,
    pub show_hidden_folders: bool,
    pub description: String,
    pub is_default_on_startup: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PentahoRepositoryModel {
    pub display_name: String,
    pub url: String,
    pub description: String,
    pub is_default_on_startup: bool,
}

impl Default for PentahoRepositoryModel {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            url: "http://localhost:8080/pentaho-di".to_string(),
            description: String::new(),
            is_default_on_startup: false,
        }
    }
}

/// An editable field on a details step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DisplayName,
    Location,
    Url,
    Description,
    DoNotModify,
    ShowHiddenFolders,
    DefaultOnStartup,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::DisplayName => "Display name",
            Field::Location => "Location",
            Field::Url => "URL",
            Field::Description => "Description",
            Field::DoNotModify => "Do not modify",
            Field::ShowHiddenFolders => "Show hidden folders",
            Field::DefaultOnStartup => "Launch connection on startup",
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            Field::DoNotModify | Field::ShowHiddenFolders | Field::DefaultOnStartup
        )
    }
}

const KETTLE_FIELDS: &[Field] = &[
    Field::DisplayName,
    Field::Location,
    Field::Description,
    Field::DoNotModify,
    Field::ShowHiddenFolders,
    Field::DefaultOnStartup,
];

const PENTAHO_FIELDS: &[Field] = &[
    Field::DisplayName,
    Field::Url,
    Field::Description,
    Field::DefaultOnStartup,
];

/// Current value of a field, for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flag(bool),
}

pub struct Wizard {
    host: Box<dyn RepositoryHost>,
    pub step: WizardStep,
    history: Vec<WizardStep>,
    pub types: Vec<RepositoryType>,
    pub type_cursor: usize,
    pub selected_type: Option<RepositoryType>,
    pub repositories: Vec<RepositoryEntry>,
    pub repo_cursor: usize,
    pub kettle: KettleFileRepositoryModel,
    pub pentaho: PentahoRepositoryModel,
    pub field_cursor: usize,
    /// Name of the repository created by `finish`
    pub created: Option<String>,
    pub error: Option<String>,
    pub status: Option<String>,
    pub closed: bool,
}

impl std::fmt::Debug for Wizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("step", &self.step)
            .field("history", &self.history)
            .field("selected_type", &self.selected_type)
            .field("repositories", &self.repositories.len())
            .finish_non_exhaustive()
    }
}

fn host_error(error: anyhow::Error) -> BrowserError {
    BrowserError::host(format!("{:#}", error))
}

impl Wizard {
    /// Load repository types and existing repositories from the host
    ///
    /// Starts on the repository list when any exist, else on type selection.
    pub fn new(host: Box<dyn RepositoryHost>) -> Result<Self, BrowserError> {
        let types = host
            .get_repos()
            .and_then(|json| parse_repository_types(&json))
            .map_err(host_error)?;
        let repositories = host.list_repositories().map_err(host_error)?;
        let step = if repositories.is_empty() {
            WizardStep::SelectType
        } else {
            WizardStep::RepositoryList
        };

        Ok(Self {
            host,
            step,
            history: Vec::new(),
            types,
            type_cursor: 0,
            selected_type: None,
            repositories,
            repo_cursor: 0,
            kettle: KettleFileRepositoryModel::default(),
            pentaho: PentahoRepositoryModel::default(),
            field_cursor: 0,
            created: None,
            error: None,
            status: None,
            closed: false,
        })
    }

    // ============================================
    // ROUTER
    // ============================================

    pub fn go(&mut self, step: WizardStep) {
        tracing::debug!(from = self.step.route(), to = step.route(), "wizard route");
        self.history.push(self.step);
        self.step = step;
        self.field_cursor = 0;
        self.error = None;
    }

    /// Return to the previous step; false at the first step
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(step) => {
                self.step = step;
                self.field_cursor = 0;
                self.error = None;
                true
            }
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty() && self.step != WizardStep::Success
    }

    /// Start a new connection from the repository list
    pub fn create_new(&mut self) {
        self.kettle = KettleFileRepositoryModel::default();
        self.pentaho = PentahoRepositoryModel::default();
        self.selected_type = None;
        self.go(WizardStep::SelectType);
    }

    // ============================================
    // TYPE SELECTION
    // ============================================

    pub fn select_repository(&mut self, idx: usize) {
        if let Some(t) = self.types.get(idx) {
            self.type_cursor = idx;
            self.selected_type = Some(t.clone());
        }
    }

    /// Route to the details step for a repository type
    pub fn get_started(&mut self, type_id: &str) -> Result<(), BrowserError> {
        let step = match type_id {
            KETTLE_FILE_REPOSITORY => WizardStep::KettleFileDetails,
            PENTAHO_REPOSITORY => WizardStep::PentahoDetails,
            other => {
                tracing::debug!(type_id = other, "no details step for repository type");
                return Err(BrowserError::validation("A supported repository type"));
            }
        };
        self.selected_type = self.types.iter().find(|t| t.id == type_id).cloned();
        self.go(step);
        Ok(())
    }

    pub fn get_started_at_cursor(&mut self) -> Result<(), BrowserError> {
        let id = self
            .types
            .get(self.type_cursor)
            .map(|t| t.id.clone())
            .ok_or_else(|| BrowserError::validation("Repository type"))?;
        self.get_started(&id)
    }

    // ============================================
    // DETAILS
    // ============================================

    pub fn fields(&self) -> &'static [Field] {
        match self.step {
            WizardStep::KettleFileDetails => KETTLE_FIELDS,
            WizardStep::PentahoDetails => PENTAHO_FIELDS,
            _ => &[],
        }
    }

    pub fn focused_field(&self) -> Option<Field> {
        self.fields().get(self.field_cursor).copied()
    }

    pub fn field_value(&self, field: Field) -> FieldValue<'_> {
        let kettle = self.step == WizardStep::KettleFileDetails;
        match field {
            Field::DisplayName if kettle => FieldValue::Text(&self.kettle.display_name),
            Field::DisplayName => FieldValue::Text(&self.pentaho.display_name),
            Field::Location => FieldValue::Text(&self.kettle.location),
            Field::Url => FieldValue::Text(&self.pentaho.url),
            Field::Description if kettle => FieldValue::Text(&self.kettle.description),
            Field::Description => FieldValue::Text(&self.pentaho.description),
            Field::DoNotModify => FieldValue::Flag(self.kettle.do_not_modify),
            Field::ShowHiddenFolders => FieldValue::Flag(self.kettle.show_hidden_folders),
            Field::DefaultOnStartup if kettle => FieldValue::Flag(self.kettle.is_default_on_startup),
            Field::DefaultOnStartup => FieldValue::Flag(self.pentaho.is_default_on_startup),
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let kettle = self.step == WizardStep::KettleFileDetails;
        match field {
            Field::DisplayName if kettle => Some(&mut self.kettle.display_name),
            Field::DisplayName => Some(&mut self.pentaho.display_name),
            Field::Location => Some(&mut self.kettle.location),
            Field::Url => Some(&mut self.pentaho.url),
            Field::Description if kettle => Some(&mut self.kettle.description),
            Field::Description => Some(&mut self.pentaho.description),
            _ => None,
        }
    }

    fn flag_mut(&mut self, field: Field) -> Option<&mut bool> {
        let kettle = self.step == WizardStep::KettleFileDetails;
        match field {
            Field::DoNotModify => Some(&mut self.kettle.do_not_modify),
            Field::ShowHiddenFolders => Some(&mut self.kettle.show_hidden_folders),
            Field::DefaultOnStartup if kettle => Some(&mut self.kettle.is_default_on_startup),
            Field::DefaultOnStartup => Some(&mut self.pentaho.is_default_on_startup),
            _ => None,
        }
    }

    pub fn next_field(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.field_cursor = (self.field_cursor + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.field_cursor = (self.field_cursor + count - 1) % count;
        }
    }

    pub fn edit_push(&mut self, c: char) {
        if let Some(text) = self.focused_field().and_then(|f| self.text_mut(f)) {
            text.push(c);
        }
    }

    pub fn edit_pop(&mut self) {
        if let Some(text) = self.focused_field().and_then(|f| self.text_mut(f)) {
            text.pop();
        }
    }

    pub fn toggle_flag(&mut self) {
        if let Some(flag) = self.focused_field().and_then(|f| self.flag_mut(f)) {
            *flag = !*flag;
        }
    }

    /// Ask the host for a directory and put it in the location field
    pub fn select_location(&mut self) -> Result<(), BrowserError> {
        if let Some(path) = self.host.select_location().map_err(host_error)? {
            self.kettle.location = path.display().to_string();
        }
        Ok(())
    }

    /// Check the required fields of the current details step
    pub fn can_finish(&self) -> Result<(), BrowserError> {
        match self.step {
            WizardStep::KettleFileDetails => require_fields(&[
                ("Display name", self.kettle.display_name.as_str()),
                ("Location", self.kettle.location.as_str()),
            ]),
            WizardStep::PentahoDetails => {
                require_fields(&[
                    ("Display name", self.pentaho.display_name.as_str()),
                    ("URL", self.pentaho.url.as_str()),
                ])?;
                validate_url(&self.pentaho.url)
            }
            _ => Err(BrowserError::validation("Repository details")),
        }
    }

    /// Create the repository and move to the success step
    pub fn finish(&mut self) -> Result<(), BrowserError> {
        self.can_finish()?;

        let (type_id, settings, name, make_default) = match self.step {
            WizardStep::KettleFileDetails => (
                KETTLE_FILE_REPOSITORY,
                serde_json::to_string(&self.kettle),
                self.kettle.display_name.trim().to_string(),
                self.kettle.is_default_on_startup,
            ),
            _ => (
                PENTAHO_REPOSITORY,
                serde_json::to_string(&self.pentaho),
                self.pentaho.display_name.trim().to_string(),
                self.pentaho.is_default_on_startup,
            ),
        };
        let settings = settings.map_err(|e| host_error(e.into()))?;

        let created = self
            .host
            .create_repository(type_id, &settings)
            .map_err(host_error)?;
        if !created {
            let error = BrowserError::host(format!("Repository {} could not be created", name));
            self.error = Some(error.to_string());
            return Err(error);
        }
        tracing::info!(name, type_id, "repository created");

        // The repository exists from here on; later failures are shown on
        // the success step instead of sending the user back to retry.
        self.created = Some(name.clone());
        self.go(WizardStep::Success);
        if make_default {
            if let Err(e) = self.host.set_default_repository(&name) {
                let error = host_error(e);
                tracing::warn!(name, error = %error, "could not set default repository");
                self.error = Some(format!(
                    "{} was created but could not be made the default: {}",
                    name, error
                ));
            }
        }
        self.refresh()
    }

    // ============================================
    // EXISTING REPOSITORIES
    // ============================================

    pub fn refresh(&mut self) -> Result<(), BrowserError> {
        self.repositories = self.host.list_repositories().map_err(host_error)?;
        self.repo_cursor = self
            .repo_cursor
            .min(self.repositories.len().saturating_sub(1));
        Ok(())
    }

    pub fn selected_repository(&self) -> Option<&RepositoryEntry> {
        self.repositories.get(self.repo_cursor)
    }

    /// Connect to the repository just created, or the highlighted one
    pub fn connect(&mut self) -> Result<(), BrowserError> {
        let name = match (self.step, &self.created) {
            (WizardStep::Success, Some(name)) => name.clone(),
            _ => self
                .selected_repository()
                .map(|r| r.name.clone())
                .ok_or_else(|| BrowserError::validation("Repository"))?,
        };
        self.host.connect_to_repository(&name).map_err(host_error)?;
        self.status = Some(format!("Connected to {}", name));
        self.close();
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> Result<(), BrowserError> {
        let deleted = self.host.delete_repository(name).map_err(host_error)?;
        if !deleted {
            return Err(BrowserError::not_found(format!("Repository {}", name)));
        }
        self.status = Some(format!("Deleted {}", name));
        self.refresh()
    }

    pub fn set_default(&mut self, name: &str) -> Result<(), BrowserError> {
        self.host.set_default_repository(name).map_err(host_error)?;
        self.status = Some(format!("{} is the default repository", name));
        self.refresh()
    }

    pub fn close(&mut self) {
        self.host.close();
        self.closed = true;
    }

    /// Remember a failure for the error dialog
    pub fn record(&mut self, result: Result<(), BrowserError>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, step = self.step.route(), "wizard action failed");
            if e.is_user_visible() {
                self.error = Some(e.to_string());
            }
        }
    }
}
