//! Debounced raw-text sync, driven by tokio's paused clock

use pagebuilder_editor::{DocumentStore, EditAction, EditSession, SharedSession, TextSync};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::sleep;

const BANNER: &str = r#"{"home_page":[{"type":"banner","images":[{"src":"a.png"},{"src":"b.png"}]}]}"#;

fn shared() -> SharedSession {
    let store = DocumentStore::load_json("sync", BANNER).unwrap();
    Arc::new(RwLock::new(EditSession::new(store)))
}

fn topbar(text: &str) -> String {
    format!(r#"{{"home_page":[{{"type":"topbar","text":"{}"}}]}}"#, text)
}

#[tokio::test(start_paused = true)]
async fn test_rapid_edits_parse_once_after_last() {
    let session = shared();
    let sync = TextSync::spawn(session.clone(), Duration::from_millis(300));

    sync.submit(topbar("one")).await.unwrap();
    sleep(Duration::from_millis(100)).await;
    sync.submit(topbar("two")).await.unwrap();
    sleep(Duration::from_millis(100)).await;
    sync.submit(topbar("three")).await.unwrap();

    sleep(Duration::from_millis(299)).await;
    {
        let session = session.read().await;
        assert_eq!(session.store().parse_attempts(), 0);
        assert_eq!(session.document().home_page[0].section_type.as_str(), "banner");
        assert_eq!(session.store().raw_text(), topbar("three"));
    }

    sleep(Duration::from_millis(2)).await;
    let session = session.read().await;
    assert_eq!(session.store().parse_attempts(), 1);
    assert_eq!(session.document().home_page[0].text(), Some("three"));
    assert_eq!(session.store().version(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_text_keeps_previous_document() {
    let session = shared();
    let before = session.read().await.document().clone();
    let sync = TextSync::spawn(session.clone(), Duration::from_millis(300));

    sync.submit("{ \"home_page\": [".to_string()).await.unwrap();
    sleep(Duration::from_millis(301)).await;

    let session = session.read().await;
    assert_eq!(session.store().parse_attempts(), 1);
    assert_eq!(session.document(), &before);
    assert_eq!(session.store().raw_text(), "{ \"home_page\": [");
    assert!(session.store().last_parse_error().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_structural_edit_supersedes_pending_text() {
    let session = shared();
    let sync = TextSync::spawn(session.clone(), Duration::from_millis(300));

    sync.submit(topbar("typed")).await.unwrap();
    sleep(Duration::from_millis(100)).await;
    {
        let mut session = session.write().await;
        let item = session.document().home_page[0].items()[0].id.clone();
        session.dispatch(EditAction::Select { id: Some(item) });
        session.dispatch(EditAction::Remove);
    }
    sleep(Duration::from_millis(400)).await;

    let session = session.read().await;
    assert_eq!(session.store().parse_attempts(), 0);
    assert_eq!(session.document().home_page[0].items().len(), 1);
    assert!(session.store().raw_text().contains("b.png"));
    assert!(!session.store().raw_text().contains("typed"));
}

#[tokio::test(start_paused = true)]
async fn test_selection_survives_text_sync() {
    let session = shared();
    let sync = TextSync::spawn(session.clone(), Duration::from_millis(300));
    {
        let mut session = session.write().await;
        let item = session.document().home_page[0].items()[1].id.clone();
        session.dispatch(EditAction::Select { id: Some(item) });
    }

    let edited = session.read().await.store().raw_text().replace("b.png", "z.png");
    sync.submit(edited).await.unwrap();
    sleep(Duration::from_millis(301)).await;

    let session = session.read().await;
    assert_eq!(session.document().home_page[0].items()[1].src(), Some("z.png"));
    assert_eq!(
        session.selection().target(),
        Some(&session.document().home_page[0].items()[1].id)
    );
    assert_eq!(session.form().fields()["src"], "z.png");
    assert!(sync.is_running());
}
