//! Shared state of the designer service

use crate::error::DesignerError;
use pagebuilder_editor::{DocumentStore, EditSession, SharedSession, TextSync, DEFAULT_DEBOUNCE};
use pagebuilder_gateway::{load_catalog, BackendClient, CatalogClient, ShopCredentials};
use pagebuilder_model::{Collection, Document};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Designer configuration
#[derive(Debug, Clone)]
pub struct DesignerConfig {
    pub backend_url: String,
    pub port: u16,
    pub debounce: Duration,
    /// No timeout when unset
    pub request_timeout: Option<Duration>,
    pub shop: Option<ShopCredentials>,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".to_string(),
            port: 3000,
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: None,
            shop: None,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub sync: Arc<TextSync>,
    pub backend: BackendClient,
    pub catalog: Option<CatalogClient>,
}

impl AppState {
    /// Wrap an existing session and start its raw-text sync task
    pub fn new(
        session: EditSession,
        backend: BackendClient,
        catalog: Option<CatalogClient>,
        debounce: Duration,
    ) -> Self {
        let session = Arc::new(RwLock::new(session));
        let sync = Arc::new(TextSync::spawn(session.clone(), debounce));
        Self {
            session,
            sync,
            backend,
            catalog,
        }
    }

    /// Build clients, fetch the document and its catalog.
    ///
    /// A failed fetch is logged and the session starts empty.
    pub async fn load(config: &DesignerConfig) -> Result<Self, DesignerError> {
        let backend = BackendClient::new(config.backend_url.clone(), config.request_timeout)?;
        let catalog = match &config.shop {
            Some(shop) => Some(CatalogClient::new(shop, config.request_timeout)?),
            None => None,
        };

        let document = match backend.fetch_document().await {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch document; starting empty");
                Document::default()
            }
        };

        let collections = fetch_collections(catalog.as_ref(), &document).await;
        let mut session = EditSession::new(DocumentStore::from_document(
            backend.base_url(),
            document,
        ));
        session.set_collections(collections);

        Ok(Self::new(session, backend, catalog, config.debounce))
    }

    /// Replace all local state with `document` and its catalog
    pub async fn reload(&self, document: Document) {
        let collections = fetch_collections(self.catalog.as_ref(), &document).await;
        let mut session = self.session.write().await;
        session.reload(document);
        session.set_collections(collections);
        tracing::info!(version = session.store().version(), "session reloaded");
    }
}

async fn fetch_collections(catalog: Option<&CatalogClient>, document: &Document) -> Vec<Collection> {
    match catalog {
        Some(client) => load_catalog(client, document).await,
        None => Vec::new(),
    }
}
