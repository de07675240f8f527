//! Initialize a storefront project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use garland_pricing::PricingConfig;
use garland_site::SiteContent;

use crate::config::load_config;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing garland...");

    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    } else {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    }

    let config = load_config(config_path)?;

    let content = SiteContent::default().to_toml()?;
    write_starter(&config.site.content, &content, yes)?;

    let prices = PricingConfig::default().to_toml()?;
    write_starter(&config.site.prices, &prices, yes)?;

    let static_dir = &config.site.static_dir;
    if !static_dir.exists() {
        fs::create_dir_all(static_dir).context("Failed to create static directory")?;
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'garland dev' to start the development server.");

    Ok(())
}

fn write_starter(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::warn!("{} already exists, skipping", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Garland Configuration

[site]
# Storefront copy, products, tutorials and FAQs
content = "content/site.toml"

# Custom-order price table
prices = "content/prices.toml"

# Images and other files copied to dist/static
static_dir = "static"

# Output directory for built site
output = "dist"

# Base URL (for deployment)
base_url = "/"

[build]
minify = true
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn starter_files_skip_existing() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("content/prices.toml");

        write_starter(&path, "first", false).unwrap();
        write_starter(&path, "second", false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        write_starter(&path, "third", true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "third");
    }

    #[test]
    fn default_config_parses() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("garland.toml");
        fs::write(&path, DEFAULT_CONFIG).unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.build.minify);
        assert_eq!(config.site.base_url, "/");
    }

    #[test]
    fn starter_prices_load_back() {
        let prices = PricingConfig::default().to_toml().unwrap();
        assert_eq!(
            PricingConfig::from_toml(&prices).unwrap(),
            PricingConfig::default()
        );
    }
}
