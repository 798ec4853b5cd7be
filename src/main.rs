use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use murmur::config::Config;
use murmur::error::ErrorEnvelope;

/// Murmur: comment corpus analytics.
///
/// Reads a CSV of user comments and reports sentiment, key terms, topics
/// and word co-occurrence, with a word cloud and a graph image.
#[derive(Parser)]
#[command(name = "murmur", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV file and print a summary
    Analyze {
        /// CSV file with a text, comment, body or message column
        csv: PathBuf,

        /// Also write the full result as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Also write wordcloud.png and cooccurrence.png into this directory
        #[arg(long)]
        images: Option<PathBuf>,
    },

    /// Start the HTTP API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: PORT env var, then 10000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: MURMUR_BIND env var, then 0.0.0.0)
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("murmur=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { csv, json, images } => {
            let config = Config::load()?;
            let analysis = config.analysis();

            let bytes =
                std::fs::read(&csv).with_context(|| format!("failed to read {}", csv.display()))?;
            info!(path = %csv.display(), bytes = bytes.len(), "Loaded input");

            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner} Analyzing {msg} ({elapsed})")
                    .expect("valid template"),
            );
            pb.set_message(csv.display().to_string());
            pb.enable_steady_tick(Duration::from_millis(120));

            let outcome =
                tokio::task::spawn_blocking(move || murmur::analyze(&bytes, &analysis)).await?;
            pb.finish_and_clear();

            let result = match outcome {
                Ok(result) => result,
                Err(e) => {
                    murmur::output::terminal::display_error(&ErrorEnvelope::from(&e));
                    std::process::exit(1);
                }
            };

            murmur::output::terminal::display_summary(&result);

            if let Some(path) = json {
                murmur::output::files::write_json(&result, &path)?;
                println!(
                    "\n{}",
                    format!("JSON result saved to: {}", path.display()).bold()
                );
            }

            if let Some(dir) = images {
                for path in murmur::output::files::write_images(&result, &dir)? {
                    println!("{}", format!("Image saved to: {}", path.display()).bold());
                }
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let port = port.unwrap_or(config.port);
            let bind = bind.unwrap_or_else(|| config.bind.clone());
            murmur::web::run_server(config.analysis(), port, &bind).await?;
        }
    }

    Ok(())
}
