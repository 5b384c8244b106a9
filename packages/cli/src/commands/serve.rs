use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Page data backend (overrides config)
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Quiet period before raw text is parsed, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,
}

pub async fn serve(args: ServeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut designer = config.designer_config();
    if let Some(port) = args.port {
        designer.port = port;
    }
    if let Some(backend_url) = args.backend_url {
        designer.backend_url = backend_url;
    }
    if let Some(debounce_ms) = args.debounce_ms {
        designer.debounce = Duration::from_millis(debounce_ms);
    }

    println!("{}", "🎨 Starting designer...".bright_blue().bold());
    println!("   Backend: {}", designer.backend_url);
    println!("   Open:    http://localhost:{}", designer.port);
    println!();

    pagebuilder_designer::serve(designer).await?;
    Ok(())
}
