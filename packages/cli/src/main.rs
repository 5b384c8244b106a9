mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    init, publish, render, serve, upload, InitArgs, PublishArgs, RenderArgs, ServeArgs,
    UploadArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagebuilder CLI - storefront home page builder
#[derive(Parser, Debug)]
#[command(name = "pagebuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new page builder project
    Init(InitArgs),

    /// Render the home page preview to HTML
    Render(RenderArgs),

    /// Start the visual designer
    Serve(ServeArgs),

    /// Persist a document to the backend
    Publish(PublishArgs),

    /// Upload an image and print its url
    Upload(UploadArgs),
}

async fn run(command: Command) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match command {
        Command::Init(args) => init(args, &cwd),
        Command::Render(args) => render(args, &cwd).await,
        Command::Serve(args) => serve(args, &cwd).await,
        Command::Publish(args) => publish(args, &cwd).await,
        Command::Upload(args) => upload(args, &cwd).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
