//! # Edit Session
//!
//! One editor's view of the page: the [`DocumentStore`], the current
//! [`Selection`], the side-panel [`EditForm`] and the catalog shown by
//! product carousels.
//!
//! [`EditSession::dispatch`] is the single transition function. Each call
//! applies the action, derives the follow-up selection and refreshes the
//! form before returning, so the next [`EditSession::preview`] always
//! reflects a consistent state.

use crate::errors::{EditorError, MutationError};
use crate::form::{EditForm, FormControl};
use crate::mutations::{self, EditAction};
use crate::selection::Selection;
use crate::store::DocumentStore;
use pagebuilder_evaluator::{project, ProjectOptions, VNode, VirtualDomDocument};
use pagebuilder_model::{Collection, Document, NodePath};
use serde::Serialize;

/// Result of one transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOutcome {
    pub document_changed: bool,
    pub version: u64,
    pub selection: Selection,
    pub path: Option<NodePath>,
    /// Why the action had no effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

/// Serializable view of the whole session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub document: Document,
    pub raw_text: String,
    pub selection: Selection,
    pub path: Option<NodePath>,
    pub form: EditForm,
    pub controls: Vec<FormControl>,
    pub version: u64,
    pub last_parse_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    store: DocumentStore,
    selection: Selection,
    form: EditForm,
    collections: Vec<Collection>,
}

impl EditSession {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            store,
            selection: Selection::Idle,
            form: EditForm::default(),
            collections: Vec::new(),
        }
    }

    pub fn from_document(origin: &str, document: Document) -> Self {
        Self::new(DocumentStore::from_document(origin, document))
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn path(&self) -> Option<NodePath> {
        self.selection.path(self.store.document())
    }

    pub fn form(&self) -> &EditForm {
        &self.form
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn set_collections(&mut self, collections: Vec<Collection>) {
        self.collections = collections;
    }

    /// Apply one action
    pub fn dispatch(&mut self, action: EditAction) -> EditOutcome {
        tracing::debug!(?action, "dispatch");

        match action {
            EditAction::Select { id: None } | EditAction::Cancel => {
                self.set_selection(Selection::Idle);
                self.outcome(false, None)
            }
            EditAction::Select { id: Some(id) } => {
                match Selection::resolve(self.store.document(), &id) {
                    Some(selection) => {
                        self.set_selection(selection);
                        self.outcome(false, None)
                    }
                    None => self.skip(MutationError::NodeNotFound(id)),
                }
            }
            EditAction::SelectMatching { data } => {
                let vdom = self.render(None);
                let selection = Selection::from_data(self.store.document(), &vdom, &data);
                if selection.is_idle() {
                    tracing::debug!(?data, "no section matches element data");
                }
                self.set_selection(selection);
                self.outcome(false, None)
            }
            EditAction::NavigateToParent => {
                let parent = self.selection.navigate_to_parent();
                self.set_selection(parent);
                self.outcome(false, None)
            }
            EditAction::SetField { key, value } => {
                if self.selection.is_idle() {
                    return self.skip(MutationError::NothingSelected);
                }
                self.form.set_text(&key, &value);
                self.outcome(false, None)
            }
            EditAction::Duplicate => {
                let selection = self.selection.clone();
                let result = self
                    .store
                    .edit(|doc, ids| mutations::duplicate(doc, &selection, ids));
                self.finish_edit(result)
            }
            EditAction::Remove => {
                let selection = self.selection.clone();
                let result = self
                    .store
                    .edit(|doc, _| mutations::remove(doc, &selection));
                self.finish_edit(result)
            }
            EditAction::Modify { fields } => {
                let selection = self.selection.clone();
                let fields = fields.unwrap_or_else(|| self.form.fields().clone());
                let result = self
                    .store
                    .edit(|doc, _| mutations::modify(doc, &selection, &fields));
                self.finish_edit(result)
            }
        }
    }

    /// Select by clicking a rendered node of `vdom`, which must come from
    /// [`preview`](Self::preview) of the current state
    pub fn select_node(&mut self, vdom: &VirtualDomDocument, node: Option<&VNode>) -> EditOutcome {
        match Selection::from_node(self.store.document(), vdom, node) {
            Some(selection) => {
                self.set_selection(selection);
                self.outcome(false, None)
            }
            None => {
                tracing::debug!("clicked node is not a selectable part of the preview");
                self.outcome(false, Some("node is not in the current preview".to_string()))
            }
        }
    }

    /// Render the preview with the current selection highlighted
    pub fn preview(&self) -> VirtualDomDocument {
        self.render(self.selection.target())
    }

    /// Mirror raw text immediately; see [`DocumentStore::set_raw_text`]
    pub fn set_raw_text(&mut self, text: impl Into<String>) -> u64 {
        self.store.set_raw_text(text)
    }

    /// Parse the raw text scheduled at `revision` into the document.
    ///
    /// When it applies, the selection is re-derived from the new document
    /// and the form reloaded.
    pub fn commit_raw_text(&mut self, revision: u64) -> Result<bool, EditorError> {
        let applied = self.store.commit_raw_text(revision)?;
        if applied {
            let selection = self.selection.revalidate(self.store.document());
            self.set_selection(selection);
        }
        Ok(applied)
    }

    /// Discard all local state in favour of a freshly fetched document
    pub fn reload(&mut self, document: Document) {
        self.store.replace_document(document);
        self.set_selection(Selection::Idle);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let document = self.store.document();
        SessionSnapshot {
            document: document.clone(),
            raw_text: self.store.raw_text().to_string(),
            selection: self.selection.clone(),
            path: self.path(),
            form: self.form.clone(),
            controls: self.form.describe(&document.location_list),
            version: self.store.version(),
            last_parse_error: self.store.last_parse_error().map(str::to_string),
        }
    }

    fn render(&self, selected: Option<&pagebuilder_model::NodeId>) -> VirtualDomDocument {
        project(
            self.store.document(),
            &ProjectOptions {
                collections: &self.collections,
                selected,
            },
        )
    }

    fn set_selection(&mut self, selection: Selection) {
        self.form = EditForm::for_selection(self.store.document(), &selection);
        self.selection = selection;
    }

    fn finish_edit(&mut self, result: Result<Selection, MutationError>) -> EditOutcome {
        match result {
            Ok(selection) => {
                self.set_selection(selection);
                self.outcome(true, None)
            }
            Err(err) => self.skip(err),
        }
    }

    fn skip(&self, reason: MutationError) -> EditOutcome {
        tracing::debug!(%reason, "action skipped");
        self.outcome(false, Some(reason.to_string()))
    }

    fn outcome(&self, document_changed: bool, skipped: Option<String>) -> EditOutcome {
        EditOutcome {
            document_changed,
            version: self.store.version(),
            selection: self.selection.clone(),
            path: self.path(),
            skipped,
        }
    }
}
