//! HTTP API of the designer
//!
//! ```text
//! GET  /                  preview page
//! GET  /api/state         session snapshot
//! GET  /api/collections   collection picker entries
//! POST /api/select        { id } | { data } | {}
//! POST /api/edit          EditAction
//! PUT  /api/source        raw text (202, parsed after the debounce delay)
//! POST /api/publish       persist, then reload from the backend
//! ```

use crate::error::DesignerError;
use crate::script::PREVIEW_SCRIPT;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use pagebuilder_editor::{EditAction, EditOutcome, SessionSnapshot};
use pagebuilder_evaluator::{render_page, PageOptions};
use pagebuilder_model::{CollectionSummary, ElementData, NodeId};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

pub const PAGE_TITLE: &str = "Home page builder";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(preview_handler))
        .route("/api/state", get(state_handler))
        .route("/api/collections", get(collections_handler))
        .route("/api/select", post(select_handler))
        .route("/api/edit", post(edit_handler))
        .route("/api/source", put(source_handler))
        .route("/api/publish", post(publish_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateResponse {
    #[serde(flatten)]
    snapshot: SessionSnapshot,
    timestamp: i64,
}

/// Body of `POST /api/select`
#[derive(Debug, Default, Deserialize)]
struct SelectRequest {
    #[serde(default)]
    id: Option<NodeId>,
    #[serde(default)]
    data: Option<ElementData>,
}

#[derive(Debug, Serialize)]
struct SourceResponse {
    revision: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    version: u64,
    sections: usize,
}

async fn preview_handler(State(state): State<AppState>) -> Html<String> {
    let vdom = state.session.read().await.preview();
    Html(render_page(
        &vdom,
        PageOptions {
            title: PAGE_TITLE.to_string(),
            script: Some(PREVIEW_SCRIPT.to_string()),
            ..Default::default()
        },
    ))
}

async fn state_handler(State(state): State<AppState>) -> Json<StateResponse> {
    let snapshot = state.session.read().await.snapshot();
    Json(StateResponse {
        snapshot,
        timestamp: chrono::Utc::now().timestamp_millis(),
    })
}

async fn collections_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CollectionSummary>>, DesignerError> {
    match &state.catalog {
        Some(catalog) => Ok(Json(catalog.all_collections().await?)),
        None => Ok(Json(Vec::new())),
    }
}

async fn select_handler(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Json<EditOutcome> {
    let action = match request {
        SelectRequest { id: Some(id), .. } => EditAction::Select { id: Some(id) },
        SelectRequest {
            data: Some(data), ..
        } => EditAction::SelectMatching { data },
        _ => EditAction::Select { id: None },
    };
    Json(state.session.write().await.dispatch(action))
}

async fn edit_handler(
    State(state): State<AppState>,
    Json(action): Json<EditAction>,
) -> Json<EditOutcome> {
    Json(state.session.write().await.dispatch(action))
}

async fn source_handler(
    State(state): State<AppState>,
    text: String,
) -> Result<(StatusCode, Json<SourceResponse>), DesignerError> {
    let revision = state.sync.submit(text).await?;
    Ok((StatusCode::ACCEPTED, Json(SourceResponse { revision })))
}

async fn publish_handler(
    State(state): State<AppState>,
) -> Result<Json<PublishResponse>, DesignerError> {
    let document = state.session.read().await.document().clone();
    state.backend.persist(&document).await?;

    let fresh = state.backend.fetch_document().await?;
    state.reload(fresh).await;

    let session = state.session.read().await;
    Ok(Json(PublishResponse {
        version: session.store().version(),
        sections: session.document().home_page.len(),
    }))
}
