use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

pub const SAMPLE_DOCUMENT_NAME: &str = "home_page.json";

const SAMPLE_DOCUMENT: &str = r##"{
  "home_page": [
    { "type": "topbar", "text": "Free shipping on orders over $50" },
    {
      "type": "carousel",
      "images": [
        { "src": "https://placehold.co/300x300.png", "label": "New arrivals" },
        { "src": "https://placehold.co/300x300.png", "label": "Best sellers" }
      ]
    },
    { "type": "heading", "text": "Shop the look", "font-size": 22, "background-color": ["#fde68a", "#fca5a5"] },
    { "type": "banner", "images": [{ "src": "https://placehold.co/600x300.png", "title": "Summer sale" }] }
  ],
  "location_list": ["home", "collection", "product"]
}
"##;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Page data backend
    #[arg(short, long)]
    pub backend_url: Option<String>,

    /// Designer port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing page builder project...".bright_blue().bold()
    );

    let mut config = Config::default();
    if let Some(backend_url) = args.backend_url {
        config.backend_url = backend_url;
    }
    if let Some(port) = args.port {
        config.designer_port = port;
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let sample_path = PathBuf::from(cwd).join(SAMPLE_DOCUMENT_NAME);
    if !sample_path.exists() {
        fs::write(&sample_path, SAMPLE_DOCUMENT)?;
        println!("  {} Created {}", "✓".green(), SAMPLE_DOCUMENT_NAME);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagebuilder render --file {}", SAMPLE_DOCUMENT_NAME);
    println!("  2. Run: pagebuilder serve");
    println!("  3. Open http://localhost:{}", config.designer_port);

    Ok(())
}
