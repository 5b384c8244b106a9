use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document root must be a JSON object")]
    NotAnObject,
}

pub type ModelResult<T> = Result<T, ModelError>;
