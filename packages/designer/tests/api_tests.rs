//! Designer routes exercised through `tower::ServiceExt::oneshot`

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use pagebuilder_designer::{router, AppState};
use pagebuilder_editor::{DocumentStore, EditSession};
use pagebuilder_gateway::BackendClient;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

const PAGE: &str = r#"{"home_page":[{"type":"topbar","text":"Hi"},{"type":"banner","images":[{"src":"a.png"},{"src":"b.png"}]}],"location_list":["home"]}"#;

fn state_for(backend_url: &str) -> AppState {
    let session = EditSession::new(DocumentStore::load_json(backend_url, PAGE).unwrap());
    let backend = BackendClient::new(backend_url, None).unwrap();
    AppState::new(session, backend, None, Duration::from_millis(300))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn page_html(app: &Router) -> String {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn spawn_backend(fail_updates: bool) -> (String, Arc<Mutex<Vec<Value>>>) {
    let updates = Arc::new(Mutex::new(Vec::new()));
    let recorded = updates.clone();
    let app = Router::new()
        .route(
            "/api/data",
            get(|| async { Json(json!({ "home_page": [{ "type": "heading", "text": "Fresh" }] })) }),
        )
        .route(
            "/api/data/update",
            post(move |Json(body): Json<Value>| async move {
                if fail_updates {
                    return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
                }
                recorded.lock().unwrap().push(body);
                (StatusCode::OK, Json(json!({})))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), updates)
}

#[tokio::test]
async fn test_preview_page_renders_sections_and_script() {
    let app = router(state_for("http://127.0.0.1:9"));

    let html = page_html(&app).await;

    assert!(html.contains("<title>Home page builder</title>"));
    assert_eq!(html.matches("class=\"main\"").count(), 2);
    assert!(html.contains("data-temp_id="));
    assert!(html.contains("/api/select"));
    assert!(!html.contains("2px solid"));
}

#[tokio::test]
async fn test_select_highlights_and_fills_form() {
    let state = state_for("http://127.0.0.1:9");
    let item = state.session.read().await.document().home_page[1].items()[1]
        .id
        .clone();
    let app = router(state);

    let (status, outcome) = send(&app, "POST", "/api/select", Some(json!({ "id": item }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["path"], json!({ "sectionIndex": 1, "itemIndex": 1 }));
    assert_eq!(outcome["selection"]["state"], "item");

    let html = page_html(&app).await;
    assert_eq!(html.matches("border: 2px solid #3b82f6").count(), 1);

    let (_, state) = send(&app, "GET", "/api/state", None).await;
    assert_eq!(state["form"], json!({ "src": "b.png" }));
    assert_eq!(state["controls"][0]["label"], "SRC");

    let (_, outcome) = send(&app, "POST", "/api/select", Some(json!({}))).await;
    assert_eq!(outcome["selection"]["state"], "idle");
}

#[tokio::test]
async fn test_select_by_data() {
    let app = router(state_for("http://127.0.0.1:9"));

    let (_, outcome) = send(
        &app,
        "POST",
        "/api/select",
        Some(json!({ "data": { "type": "topbar", "text": "Hi" } })),
    )
    .await;

    assert_eq!(outcome["path"], json!({ "sectionIndex": 0 }));
}

#[tokio::test]
async fn test_edit_actions() {
    let state = state_for("http://127.0.0.1:9");
    let section = state.session.read().await.document().home_page[0].id.clone();
    let app = router(state.clone());

    send(&app, "POST", "/api/select", Some(json!({ "id": section }))).await;
    let (status, outcome) = send(&app, "POST", "/api/edit", Some(json!({ "type": "duplicate" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["documentChanged"], true);
    assert_eq!(outcome["path"], json!({ "sectionIndex": 1 }));

    let (_, outcome) = send(
        &app,
        "POST",
        "/api/edit",
        Some(json!({ "type": "modify", "fields": { "text": "Copy" } })),
    )
    .await;
    assert_eq!(outcome["version"], 2);

    let session = state.session.read().await;
    assert_eq!(session.document().home_page.len(), 3);
    assert_eq!(session.document().home_page[1].text(), Some("Copy"));
    assert_eq!(session.document().home_page[0].text(), Some("Hi"));
}

#[tokio::test]
async fn test_edit_without_selection_is_skipped() {
    let app = router(state_for("http://127.0.0.1:9"));

    let (status, outcome) = send(&app, "POST", "/api/edit", Some(json!({ "type": "remove" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["documentChanged"], false);
    assert!(outcome["skipped"].is_string());
}

#[tokio::test(start_paused = true)]
async fn test_source_is_parsed_after_debounce() {
    let state = state_for("http://127.0.0.1:9");
    let app = router(state.clone());

    let request = Request::builder()
        .method("PUT")
        .uri("/api/source")
        .body(Body::from(r#"{"home_page":[{"type":"topbar","text":"Typed"}]}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    assert_eq!(state.session.read().await.document().home_page.len(), 2);
    tokio::time::sleep(Duration::from_millis(301)).await;

    let session = state.session.read().await;
    assert_eq!(session.document().home_page.len(), 1);
    assert_eq!(session.document().home_page[0].text(), Some("Typed"));
}

#[tokio::test]
async fn test_publish_persists_then_reloads() {
    let (url, updates) = spawn_backend(false).await;
    let state = state_for(&url);
    let app = router(state.clone());

    let (status, body) = send(&app, "POST", "/api/publish", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sections"], 1);
    assert_eq!(
        updates.lock().unwrap()[0],
        json!({ "home_page": [
            { "type": "topbar", "text": "Hi" },
            { "type": "banner", "images": [{ "src": "a.png" }, { "src": "b.png" }] }
        ] })
    );

    let session = state.session.read().await;
    assert_eq!(session.document().home_page[0].text(), Some("Fresh"));
    assert!(session.selection().is_idle());
}

#[tokio::test]
async fn test_failed_publish_keeps_local_state() {
    let (url, _) = spawn_backend(true).await;
    let state = state_for(&url);
    let section = state.session.read().await.document().home_page[0].id.clone();
    let app = router(state.clone());

    send(&app, "POST", "/api/select", Some(json!({ "id": section }))).await;
    send(&app, "POST", "/api/edit", Some(json!({ "type": "remove" }))).await;

    let (status, body) = send(&app, "POST", "/api/publish", None).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["upstreamStatus"], 500);
    let session = state.session.read().await;
    assert_eq!(session.document().home_page.len(), 1);
    assert_eq!(session.document().home_page[0].section_type.as_str(), "banner");
}

#[tokio::test]
async fn test_collections_without_shop_is_empty() {
    let app = router(state_for("http://127.0.0.1:9"));

    let (status, body) = send(&app, "GET", "/api/collections", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
