//! # Pagebuilder Editor
//!
//! Editing engine behind the home page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Document, Section, Item, NodeId      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session state + transitions         │
//! │  - DocumentStore (document + raw text)      │
//! │  - Selection by stable node id              │
//! │  - Duplicate / Remove / Modify              │
//! │  - Debounced raw-text sync                  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ evaluator: Document → preview VDOM          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagebuilder_editor::{DocumentStore, EditAction, EditSession};
//!
//! let store = DocumentStore::load_json("http://localhost:5000", &json)?;
//! let mut session = EditSession::new(store);
//!
//! let id = session.document().home_page[0].id.clone();
//! session.dispatch(EditAction::Select { id: Some(id) });
//! session.dispatch(EditAction::Duplicate);
//!
//! let vdom = session.preview();
//! ```

pub mod debounce;
pub mod errors;
pub mod form;
pub mod mutations;
pub mod selection;
pub mod session;
pub mod store;
pub mod sync;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use errors::{EditorError, MutationError};
pub use form::{EditForm, FormControl, SelectOption};
pub use mutations::EditAction;
pub use selection::Selection;
pub use session::{EditOutcome, EditSession, SessionSnapshot};
pub use store::DocumentStore;
pub use sync::{SharedSession, TextSync};
