//! # Raw Text Sync
//!
//! Background task reconciling the raw-text editor with the parsed
//! document. Text is mirrored into the session as soon as it arrives; the
//! parse runs once the text has been quiet for the debounce delay.
//!
//! ```text
//! submit(text) ─> set_raw_text ─> revision ─(mpsc)─> Debouncer ─(quiet)─> commit_raw_text
//! ```

use crate::debounce::Debouncer;
use crate::errors::EditorError;
use crate::session::EditSession;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Session shared between the sync task and request handlers
pub type SharedSession = Arc<RwLock<EditSession>>;

pub struct TextSync {
    session: SharedSession,
    sender: mpsc::UnboundedSender<u64>,
    handle: JoinHandle<()>,
}

impl TextSync {
    /// Start the sync task on the current tokio runtime
    pub fn spawn(session: SharedSession, delay: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(session.clone(), delay, receiver));
        Self {
            session,
            sender,
            handle,
        }
    }

    /// Mirror `text` now and schedule its parse. Returns the text revision.
    pub async fn submit(&self, text: String) -> Result<u64, EditorError> {
        let revision = self.session.write().await.set_raw_text(text);
        self.sender
            .send(revision)
            .map_err(|_| EditorError::SyncStopped)?;
        Ok(revision)
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop the task; a pending parse is dropped
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

async fn run(session: SharedSession, delay: Duration, mut receiver: mpsc::UnboundedReceiver<u64>) {
    let mut debouncer = Debouncer::new(delay);

    loop {
        let deadline = debouncer.deadline();
        let sleep = tokio::time::sleep_until(
            deadline.map(Instant::from_std).unwrap_or_else(Instant::now),
        );

        tokio::select! {
            received = receiver.recv() => match received {
                Some(revision) => debouncer.push(revision, Instant::now().into_std()),
                None => break,
            },
            _ = sleep, if deadline.is_some() => {
                if let Some(revision) = debouncer.poll(Instant::now().into_std()) {
                    commit(&session, revision).await;
                }
            }
        }
    }

    tracing::debug!("raw text sync stopped");
}

async fn commit(session: &SharedSession, revision: u64) {
    let mut session = session.write().await;
    match session.commit_raw_text(revision) {
        Ok(true) => tracing::debug!(revision, version = session.store().version(), "raw text applied"),
        Ok(false) => tracing::debug!(revision, "raw text superseded before parse"),
        Err(err) => tracing::warn!(revision, error = %err, "raw text not applied; keeping previous document"),
    }
}
