use anyhow::Context;
use clap::Parser;
use pokefinder::cli::commands::{Cli, Commands};
use pokefinder::web::{self, AppState};
use pokefinder::{build_asset_store, PokeFinder};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pokefinder=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run_command(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.settings;
    let assets = Arc::new(build_asset_store(&settings).context("configuring asset storage")?);
    let finder = PokeFinder::new(&settings, assets.clone()).context("initializing pokefinder")?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Ok(count) = finder.candidate_count() {
                tracing::info!(candidates = count, "candidate store ready");
            }
            let state = AppState {
                finder: Arc::new(finder),
                assets,
            };
            web::serve(state, &bind).await.context("web server failed")?;
        }
        Commands::Ingest { pattern } => {
            let report = finder.ingest(&pattern).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Recommend { query } => {
            let resolution = finder.recommend(&query).await;
            match resolution.recommendation() {
                Some(r) => println!("{}", serde_json::to_string_pretty(r)?),
                None => anyhow::bail!(resolution.message().unwrap_or("no recommendation")),
            }
        }
    }
    Ok(())
}
