//! App Orchestration
//!
//! `App` ties the pure [`Model`] to the background API worker. Model methods
//! return requests; `App` forwards them and feeds responses back through
//! `handlers::api`.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;

use repotui::api::{BrowserClient, BrowserService};
use repotui::config::Config;
use repotui::model::Model;
use repotui::services::{spawn_api_service, ApiRequest, ApiResponse};
use repotui::OpenMode;

pub struct App {
    pub model: Model,
    pub api_tx: mpsc::UnboundedSender<ApiRequest>,
    pub api_rx: mpsc::UnboundedReceiver<ApiResponse>,
    /// Shown in the header
    pub server_url: String,
}

impl App {
    pub fn new(config: &Config, mode: OpenMode) -> Result<Self> {
        let server_url = config.browser_url();
        let client = BrowserClient::new(server_url.clone(), config.request_timeout())
            .context("Failed to create browser client")?;
        let service: Arc<dyn BrowserService> = Arc::new(client);
        let (api_tx, api_rx) = spawn_api_service(service);

        let mut app = Self {
            model: Model::new(mode, config.vim_mode),
            api_tx,
            api_rx,
            server_url,
        };
        let requests = app.model.init();
        app.send_all(requests);
        Ok(app)
    }

    pub fn send(&self, request: ApiRequest) {
        tracing::debug!(?request, "queue request");
        if self.api_tx.send(request).is_err() {
            tracing::error!("api service is gone");
        }
    }

    pub fn send_all(&self, requests: impl IntoIterator<Item = ApiRequest>) {
        for request in requests {
            self.send(request);
        }
    }

    /// Reload tree and recent files from the server
    pub fn refresh(&mut self) {
        let requests = self.model.init();
        self.send_all(requests);
        self.model.ui.show_toast("Refreshing");
    }

    pub fn handle_api_response(&mut self, response: ApiResponse) {
        crate::handlers::handle_api_response(self, response);
    }
}

/// Runtime state of the repository wizard screen
pub struct WizardApp {
    pub wizard: repotui::model::Wizard,
    /// Repository awaiting delete confirmation
    pub confirm_delete: Option<String>,
}

impl WizardApp {
    pub fn new(wizard: repotui::model::Wizard) -> Self {
        Self {
            wizard,
            confirm_delete: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.wizard.closed
    }
}
