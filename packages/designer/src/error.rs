use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pagebuilder_editor::EditorError;
use pagebuilder_gateway::{CatalogError, ClientError, FetchError, PersistError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignerError {
    #[error("Publish failed: {0}")]
    Persist(#[from] PersistError),

    #[error("Reload failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DesignerError {
    fn status_code(&self) -> StatusCode {
        match self {
            DesignerError::Persist(_) | DesignerError::Fetch(_) | DesignerError::Catalog(_) => {
                StatusCode::BAD_GATEWAY
            }
            DesignerError::Editor(EditorError::SyncStopped) => StatusCode::SERVICE_UNAVAILABLE,
            DesignerError::Editor(EditorError::Parse(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            DesignerError::Client(_) | DesignerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DesignerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let upstream = match &self {
            DesignerError::Persist(err) => err.status(),
            _ => None,
        };
        tracing::warn!(error = %self, "request failed");
        (
            status,
            Json(json!({ "error": self.to_string(), "upstreamStatus": upstream })),
        )
            .into_response()
    }
}
