//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use garland_site::SiteBuilder;

use crate::config::load_config;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building storefront...");

    let file_config = load_config(config_path)?;
    let config = file_config.build_config(output, minify);

    let result = SiteBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} page with {} static files in {}ms",
        result.pages,
        result.static_files,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
