use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_evaluator::{project, render_page, PageOptions, ProjectOptions};
use pagebuilder_gateway::{load_catalog, BackendClient, CatalogClient};
use pagebuilder_model::{Document, IdGenerator, NodeId, NodePath};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Read the document from a file instead of the backend
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output HTML file
    #[arg(short, long, default_value = "preview.html")]
    pub out: PathBuf,

    /// Output to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Highlight a section ("2") or an item ("2.1")
    #[arg(long)]
    pub select: Option<String>,

    /// Backend URL (overrides config)
    #[arg(long)]
    pub backend_url: Option<String>,
}

pub async fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let backend_url = args.backend_url.unwrap_or_else(|| config.backend_url.clone());

    let (origin, mut document) = match &args.file {
        Some(file) => {
            let path = PathBuf::from(cwd).join(file);
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (path.display().to_string(), Document::from_json(&text)?)
        }
        None => {
            let client = BackendClient::new(backend_url.clone(), config.request_timeout())?;
            (backend_url, client.fetch_document().await?)
        }
    };
    document.assign_ids(&mut IdGenerator::new(&origin));

    let selected = match &args.select {
        Some(path) => Some(node_at(&document, parse_path(path)?)?),
        None => None,
    };

    let collections = match config.shop_credentials() {
        Some(shop) => {
            let client = CatalogClient::new(&shop, config.request_timeout())?;
            load_catalog(&client, &document).await
        }
        None => Vec::new(),
    };

    let vdom = project(
        &document,
        &ProjectOptions {
            collections: &collections,
            selected: selected.as_ref(),
        },
    );
    let html = render_page(
        &vdom,
        PageOptions {
            title: "Home page preview".to_string(),
            ..Default::default()
        },
    );

    if args.stdout {
        println!("{}", html);
        return Ok(());
    }

    let out = PathBuf::from(cwd).join(&args.out);
    fs::write(&out, html)?;
    println!(
        "  {} {} sections → {}",
        "✓".green(),
        document.home_page.len(),
        out.display()
    );
    Ok(())
}

/// `"2"` → section 2, `"2.1"` → item 1 of section 2
pub fn parse_path(text: &str) -> Result<NodePath> {
    let mut parts = text.split('.');
    let section_index = parts
        .next()
        .unwrap_or_default()
        .trim()
        .parse()
        .with_context(|| format!("Invalid selection: {}", text))?;
    let item_index = match parts.next() {
        Some(item) => Some(
            item.trim()
                .parse()
                .with_context(|| format!("Invalid selection: {}", text))?,
        ),
        None => None,
    };
    if parts.next().is_some() {
        return Err(anyhow!("Invalid selection: {}", text));
    }
    Ok(NodePath {
        section_index,
        item_index,
    })
}

fn node_at(document: &Document, path: NodePath) -> Result<NodeId> {
    let section = document
        .home_page
        .get(path.section_index)
        .ok_or_else(|| anyhow!("No section at index {}", path.section_index))?;
    match path.item_index {
        None => Ok(section.id.clone()),
        Some(index) => section
            .items()
            .get(index)
            .map(|item| item.id.clone())
            .ok_or_else(|| anyhow!("No item {} in section {}", index, path.section_index)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path() {
        assert_eq!(
            parse_path("2").unwrap(),
            NodePath {
                section_index: 2,
                item_index: None
            }
        );
        assert_eq!(
            parse_path("2.1").unwrap(),
            NodePath {
                section_index: 2,
                item_index: Some(1)
            }
        );
        assert!(parse_path("a").is_err());
        assert!(parse_path("1.2.3").is_err());
    }

    #[tokio::test]
    async fn test_render_file_with_selection() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        fs::write(
            dir.path().join("page.json"),
            r#"{"home_page":[{"type":"banner","images":[{"src":"a.png"},{"src":"b.png"}]}]}"#,
        )
        .unwrap();

        render(
            RenderArgs {
                file: Some(PathBuf::from("page.json")),
                out: PathBuf::from("out.html"),
                stdout: false,
                select: Some("0.1".to_string()),
                backend_url: None,
            },
            &cwd,
        )
        .await
        .unwrap();

        let html = fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert!(html.contains("b.png"));
        assert_eq!(html.matches("border: 2px solid #3b82f6").count(), 1);
    }

    #[tokio::test]
    async fn test_render_rejects_missing_node() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        fs::write(dir.path().join("page.json"), r#"{"home_page":[]}"#).unwrap();

        let result = render(
            RenderArgs {
                file: Some(PathBuf::from("page.json")),
                out: PathBuf::from("out.html"),
                stdout: false,
                select: Some("0".to_string()),
                backend_url: None,
            },
            &cwd,
        )
        .await;

        assert!(result.is_err());
    }
}
