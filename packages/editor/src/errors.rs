//! Error types for the editor

use pagebuilder_model::{ModelError, NodeId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] ModelError),

    #[error("Text sync task has stopped")]
    SyncStopped,
}

/// Why a structural edit did not apply.
///
/// The session turns these into no-op outcomes; they never reach the user
/// as failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Nothing is selected")]
    NothingSelected,

    #[error("Node no longer in document: {0}")]
    NodeNotFound(NodeId),
}
