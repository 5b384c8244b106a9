use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagebuilder_gateway::BackendClient;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Image to upload
    pub file: PathBuf,

    /// Page data backend (overrides config)
    #[arg(long)]
    pub backend_url: Option<String>,
}

pub async fn upload(args: UploadArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let backend_url = args.backend_url.unwrap_or(config.backend_url.clone());

    let path = PathBuf::from(cwd).join(&args.file);
    let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let client = BackendClient::new(backend_url, config.request_timeout())?;
    let url = client
        .upload_image(file_name, bytes, guess_mime(&path))
        .await?;

    println!("  {} Uploaded {}", "✓".green(), path.display());
    println!("{}", url);
    Ok(())
}

/// Content type from the file extension
pub fn guess_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
