//! Development server command.

use std::path::Path;

use anyhow::Result;
use garland_server::{DevServer, DevServerConfig};

use crate::config::load_config;

/// Run the dev server.
pub async fn run(config_path: &Path, port: u16, open: bool) -> Result<()> {
    tracing::info!("Starting development server on port {}", port);

    let file_config = load_config(config_path)?;

    let config = DevServerConfig {
        content_path: file_config.site.content,
        prices_path: file_config.site.prices,
        static_dir: Some(file_config.site.static_dir),
        title: file_config.site.title,
        port,
        open,
        ..Default::default()
    };

    DevServer::new(config).start().await?;

    Ok(())
}
