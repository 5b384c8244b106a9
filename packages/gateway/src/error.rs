//! Error types for the gateway

use pagebuilder_model::ModelError;
use thiserror::Error;

/// Loading the document from the backend failed
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}")]
    Status { status: u16 },

    #[error("Backend sent an invalid document: {0}")]
    Document(#[from] ModelError),
}

/// Pushing `home_page` to the backend failed
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend rejected update with status {status}")]
    Status { status: u16 },
}

impl PersistError {
    /// HTTP status of a rejected update
    pub fn status(&self) -> Option<u16> {
        match self {
            PersistError::Status { status } => Some(*status),
            PersistError::Http(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload returned status {status}")]
    Status { status: u16 },

    #[error("Upload rejected: {0}")]
    Rejected(String),

    #[error("Upload response has no url")]
    MissingUrl,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned status {status}")]
    Status { status: u16 },

    #[error("GraphQL errors: {0}")]
    GraphQl(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
}

/// Building an HTTP client failed
pub type ClientError = reqwest::Error;
