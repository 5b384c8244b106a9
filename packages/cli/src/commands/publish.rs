use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_gateway::BackendClient;
use pagebuilder_model::Document;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Document to publish
    pub file: PathBuf,

    /// Page data backend (overrides config)
    #[arg(long)]
    pub backend_url: Option<String>,
}

pub async fn publish(args: PublishArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let backend_url = args.backend_url.unwrap_or(config.backend_url.clone());

    let path = PathBuf::from(cwd).join(&args.file);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let document = Document::from_json(&text)?;

    let client = BackendClient::new(backend_url.clone(), config.request_timeout())?;
    client.persist(&document).await?;

    println!(
        "  {} Published {} sections to {}",
        "✓".green(),
        document.home_page.len(),
        backend_url
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_publish_sends_home_page() {
        let received = Arc::new(Mutex::new(None));
        let recorded = received.clone();
        let app = Router::new().route(
            "/api/data/update",
            post(move |Json(body): Json<Value>| async move {
                *recorded.lock().unwrap() = Some(body);
                Json(json!({}))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("page.json"),
            r#"{"home_page":[{"type":"topbar","text":"Hi"}],"location_list":["home"]}"#,
        )
        .unwrap();

        publish(
            PublishArgs {
                file: PathBuf::from("page.json"),
                backend_url: Some(url),
            },
            &dir.path().display().to_string(),
        )
        .await
        .unwrap();

        assert_eq!(
            received.lock().unwrap().clone(),
            Some(json!({ "home_page": [{ "type": "topbar", "text": "Hi" }] }))
        );
    }

    #[tokio::test]
    async fn test_publish_rejects_invalid_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.json"), "[1, 2]").unwrap();

        let result = publish(
            PublishArgs {
                file: PathBuf::from("page.json"),
                backend_url: Some("http://127.0.0.1:9".to_string()),
            },
            &dir.path().display().to_string(),
        )
        .await;

        assert!(result.is_err());
    }
}
