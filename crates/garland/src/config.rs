//! `garland.toml` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use garland_site::BuildConfig;

/// Configuration file structure (garland.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSettings,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_content")]
    pub content: PathBuf,
    #[serde(default = "default_prices")]
    pub prices: PathBuf,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Page title; the brand name when unset
    pub title: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            content: default_content(),
            prices: default_prices(),
            static_dir: default_static_dir(),
            output: default_output(),
            base_url: default_base_url(),
            title: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_content() -> PathBuf {
    PathBuf::from("content/site.toml")
}
fn default_prices() -> PathBuf {
    PathBuf::from("content/prices.toml")
}
fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}
fn default_output() -> PathBuf {
    PathBuf::from("dist")
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_minify() -> bool {
    true
}

impl ConfigFile {
    /// Builder settings, with optional command-line overrides.
    pub fn build_config(&self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        BuildConfig {
            content_path: self.site.content.clone(),
            prices_path: self.site.prices.clone(),
            static_dir: Some(self.site.static_dir.clone()),
            output_dir: output.unwrap_or_else(|| self.site.output.clone()),
            minify: minify.unwrap_or(self.build.minify),
            base_url: self.site.base_url.clone(),
            title: self.site.title.clone(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(ConfigFile::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_config_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = load_config(&temp.path().join("garland.toml")).unwrap();
        let build = config.build_config(None, None);

        assert_eq!(build.content_path, PathBuf::from("content/site.toml"));
        assert_eq!(build.prices_path, PathBuf::from("content/prices.toml"));
        assert_eq!(build.output_dir, PathBuf::from("dist"));
        assert!(build.minify);
    }

    #[test]
    fn overrides_apply() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("garland.toml");
        fs::write(
            &path,
            "[site]\noutput = \"public\"\ntitle = \"Shop\"\n\n[build]\nminify = true\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        let build = config.build_config(Some(PathBuf::from("out")), Some(false));

        assert_eq!(build.output_dir, PathBuf::from("out"));
        assert_eq!(build.title.as_deref(), Some("Shop"));
        assert!(!build.minify);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("garland.toml");
        fs::write(&path, "[site\n").unwrap();

        assert!(load_config(&path).is_err());
    }
}
