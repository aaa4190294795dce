//! Swatch - Main Entry Point
//!
//! Usage: `swatch [config.toml]`

use anyhow::{Context, Result};
use swatch::{Config, Page};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Swatch v{} starting", swatch::VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).with_context(|| format!("loading config {path}"))?,
        None => Config::default(),
    };

    let mut page = Page::new(&config).context("building page")?;
    let boxes = page
        .render(&config.colors, config.hex)
        .context("rendering boxes")?;

    for (clr, node) in config.colors.iter().zip(&boxes) {
        tracing::info!("{:>4} -> {}", clr, page.label(*node));
    }
    println!("{}", page.to_html());

    Ok(())
}
