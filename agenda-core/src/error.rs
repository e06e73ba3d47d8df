//! Error types for the agenda client.

use thiserror::Error;

use crate::sync::ResourceKind;

/// Errors that can occur in agenda operations.
#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Not signed in. Run `agenda login` first")]
    NotAuthenticated,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server returned {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to load {resource}: {source}")]
    Sync {
        resource: ResourceKind,
        #[source]
        source: Box<AgendaError>,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AgendaError {
    /// Status code of a server-side rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AgendaError::Http { status, .. } => Some(*status),
            AgendaError::Sync { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Result type alias for agenda operations.
pub type AgendaResult<T> = Result<T, AgendaError>;
