//! Error types for the soiree library.

use std::path::PathBuf;

use thiserror::Error;

use crate::{api::ApiError, models::WizardStep, wizard::FieldErrors};

/// Comprehensive error type for all wizard and planner operations.
#[derive(Error, Debug)]
pub enum PlanningError {
    /// Local storage connection or query errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Remote event not found for the given ID
    #[error("Event with ID {id} not found")]
    EventNotFound { id: u64 },
    /// No saved wizard session exists for the requested context
    #[error("No wizard session found for '{key}'")]
    SessionNotFound { key: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Field-level validation failures blocking a transition or submission
    #[error("{}", validation_message(*step, errors))]
    Validation {
        step: Option<WizardStep>,
        errors: FieldErrors,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Backend API errors, already sanitized
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn validation_message(step: Option<WizardStep>, errors: &FieldErrors) -> String {
    match step {
        Some(step) => format!(
            "Step '{}' is incomplete: {}",
            step.title(),
            errors.field_names().join(", ")
        ),
        None => format!(
            "Event details are incomplete: {}",
            errors.field_names().join(", ")
        ),
    }
}

/// Builder for creating storage errors with optional context.
pub struct StorageErrorBuilder {
    message: String,
}

impl StorageErrorBuilder {
    /// Create a new storage error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlanningError {
        PlanningError::Storage {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlanningError {
        PlanningError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlanningError {
    /// Creates a builder for storage errors.
    pub fn storage(message: impl Into<String>) -> StorageErrorBuilder {
        StorageErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Returns the field errors when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            PlanningError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// Specialized extension trait for storage-related Results.
pub trait StorageResultExt<T> {
    /// Map storage errors with a message.
    fn storage_context(self, message: &str) -> Result<T>;
}

impl<T> StorageResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn storage_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlanningError::storage(message).with_source(e))
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlanningError>;
