//! Builder for creating and configuring EventPlanner instances.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use log::debug;

use super::EventPlanner;
use crate::{
    api::{ApiClient, DEFAULT_API_URL, DEFAULT_TIMEOUT},
    autosave::DEFAULT_AUTOSAVE_DELAY,
    db,
    error::{PlanningError, Result},
};

/// Builder for creating and configuring EventPlanner instances.
#[derive(Debug, Clone)]
pub struct EventPlannerBuilder {
    database_path: Option<PathBuf>,
    api_url: Option<String>,
    timeout: Duration,
    autosave_delay: Duration,
}

impl EventPlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            api_url: None,
            timeout: DEFAULT_TIMEOUT,
            autosave_delay: DEFAULT_AUTOSAVE_DELAY,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/soiree/soiree.db` or `~/.local/share/soiree/soiree.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the backend base URL, e.g. `https://api.example.com/api`.
    pub fn with_api_url<S: Into<String>>(mut self, url: Option<S>) -> Self {
        if let Some(url) = url {
            self.api_url = Some(url.into());
        }
        self
    }

    /// Sets the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the debounce delay used by [`EventPlanner::autosave`].
    pub fn with_autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay = delay;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::FileSystem` if the database path is invalid
    /// Returns `PlanningError::Storage` if storage initialization fails
    /// Returns `PlanningError::Api` if the HTTP client cannot be created
    pub async fn build(self) -> Result<EventPlanner> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PlanningError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        db::blocking(&db_path, |_storage| Ok(())).await?;

        let api_url = self
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        debug!("Using local storage {} and API {api_url}", db_path.display());
        let api = ApiClient::new(api_url, db_path.clone(), self.timeout)?;

        Ok(EventPlanner::new(db_path, api, self.autosave_delay))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("soiree")
            .place_data_file("soiree.db")
            .map_err(|e| PlanningError::XdgDirectory(e.to_string()))
    }
}

impl Default for EventPlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
