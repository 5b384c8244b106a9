//! # Document Store
//!
//! Owns the parsed [`Document`] together with its raw-text mirror.
//!
//! ```text
//! set_raw_text ──(debounce)──> commit_raw_text ──> document
//!      ^                                              │
//!      └──────────── edit / replace_document <────────┘
//! ```
//!
//! Two counters drive reconciliation: `version` increments whenever the
//! parsed document changes, `text_revision` whenever the raw text changes.
//! A deferred parse names the revision it was scheduled for, so a parse that
//! was overtaken by newer text or by a structural edit is discarded.

use crate::EditorError;
use pagebuilder_model::{Document, IdGenerator};

#[derive(Debug, Clone)]
pub struct DocumentStore {
    document: Document,
    raw_text: String,
    ids: IdGenerator,

    /// Increments on each document change
    version: u64,

    /// Increments on each raw-text change
    text_revision: u64,

    last_parse_error: Option<String>,
    parse_attempts: u64,
}

impl DocumentStore {
    /// Empty store for a document that will come from `origin`
    pub fn new(origin: &str) -> Self {
        Self::from_document(origin, Document::default())
    }

    pub fn from_document(origin: &str, mut document: Document) -> Self {
        let mut ids = IdGenerator::new(origin);
        document.assign_ids(&mut ids);

        let mut store = Self {
            document,
            raw_text: String::new(),
            ids,
            version: 0,
            text_revision: 0,
            last_parse_error: None,
            parse_attempts: 0,
        };
        store.refresh_raw_text();
        store
    }

    pub fn load_json(origin: &str, text: &str) -> Result<Self, EditorError> {
        let document = Document::from_json(text)?;
        Ok(Self::from_document(origin, document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn text_revision(&self) -> u64 {
        self.text_revision
    }

    /// Diagnostic of the most recent failed parse, cleared by the next success
    pub fn last_parse_error(&self) -> Option<&str> {
        self.last_parse_error.as_deref()
    }

    pub fn parse_attempts(&self) -> u64 {
        self.parse_attempts
    }

    /// Swap in a whole new document.
    ///
    /// The store takes ownership of `next`, so the previous snapshot and the
    /// new one never share structure. Missing ids are assigned and the raw
    /// text is regenerated.
    pub fn replace_document(&mut self, mut next: Document) {
        next.assign_ids(&mut self.ids);
        self.document = next;
        self.version += 1;
        self.last_parse_error = None;
        self.refresh_raw_text();
    }

    /// Mirror text typed into the raw editor. Returns the revision a
    /// deferred [`commit_raw_text`](Self::commit_raw_text) should name.
    pub fn set_raw_text(&mut self, text: impl Into<String>) -> u64 {
        self.raw_text = text.into();
        self.text_revision += 1;
        self.text_revision
    }

    /// Parse the raw text scheduled at `revision`.
    ///
    /// Returns `Ok(false)` without parsing when the text has changed since.
    /// On a parse failure the document is left untouched and the diagnostic
    /// is recorded.
    pub fn commit_raw_text(&mut self, revision: u64) -> Result<bool, EditorError> {
        if revision != self.text_revision {
            return Ok(false);
        }
        self.parse_attempts += 1;

        match Document::from_json(&self.raw_text) {
            Ok(mut next) => {
                next.inherit_ids(&self.document, &mut self.ids);
                let changed = next != self.document;
                self.document = next;
                if changed {
                    self.version += 1;
                }
                self.last_parse_error = None;
                Ok(true)
            }
            Err(err) => {
                self.last_parse_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Apply a structural edit.
    ///
    /// On success the version increments and the raw text is regenerated,
    /// which also invalidates any parse still waiting on older text.
    pub fn edit<T, E>(
        &mut self,
        f: impl FnOnce(&mut Document, &mut IdGenerator) -> Result<T, E>,
    ) -> Result<T, E> {
        let result = f(&mut self.document, &mut self.ids)?;
        self.version += 1;
        self.refresh_raw_text();
        Ok(result)
    }

    fn refresh_raw_text(&mut self) {
        match self.document.to_pretty_json() {
            Ok(text) => self.raw_text = text,
            Err(err) => tracing::warn!(error = %err, "failed to serialize document"),
        }
        self.text_revision += 1;
    }
}
