mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use url::Url;

use capsift_core::pipeline::get_or_build_listing;
use capsift_core::recognize::EngineRecognizer;
use capsift_core::store::DirStore;
use capsift_core::PipelineConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Scan {
            frames,
            video_id,
            video_url,
            cache_dir,
            engine,
            engine_arg,
            lag,
            output,
        } => {
            info!(?frames, video_id, lag, "starting scan");

            let video_url = Url::parse(&video_url)
                .with_context(|| format!("bad video URL: {video_url}"))?;

            let config = PipelineConfig {
                lag_seconds: lag,
                ..PipelineConfig::default()
            };
            let store = DirStore::new(cache_dir);
            let recognizer = EngineRecognizer::new(engine, engine_arg);

            let listing = get_or_build_listing(
                &video_id,
                &video_url,
                &frames,
                &config,
                &store,
                &recognizer,
            )
            .context("pipeline failed")?;

            match output {
                Some(path) => write_listing(&listing, &path)?,
                None => println!("{listing}"),
            }

            info!(video_id, "scan complete");
            Ok(())
        }
    }
}

fn write_listing(listing: &str, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).context("failed to create output directory")?;
    }
    std::fs::write(output, listing)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(?output, bytes = listing.len(), "listing written");
    Ok(())
}
