//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use garland_pricing::{quote, OrderForm, PricingConfig, Selections, TableError};

use crate::assets::AssetPipeline;
use crate::content::{ContentError, SiteContent};
use crate::templates::{BuilderView, Context, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Site content file (site.toml)
    pub content_path: PathBuf,

    /// Price table file (prices.toml)
    pub prices_path: PathBuf,

    /// Directory of files copied verbatim into the output
    pub static_dir: Option<PathBuf>,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title (defaults to the brand name)
    pub title: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_path: PathBuf::from("content/site.toml"),
            prices_path: PathBuf::from("content/prices.toml"),
            static_dir: None,
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of static files copied
    pub static_files: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to load site content: {0}")]
    Content(#[from] ContentError),

    #[error("Failed to load price table: {0}")]
    Pricing(#[from] TableError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Content and pricing that together define the rendered site.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteBundle {
    pub content: SiteContent,
    pub pricing: PricingConfig,
}

impl SiteBundle {
    /// Load both files; either may be absent.
    pub fn load(content_path: &Path, prices_path: &Path) -> Result<Self, BuildError> {
        Ok(Self {
            content: SiteContent::load(content_path)?,
            pricing: PricingConfig::load(prices_path)?,
        })
    }

    /// The pricing data handed to the live estimator in the browser.
    pub fn pricing_json(&self) -> Result<String, BuildError> {
        serde_json::to_string(&self.pricing.to_file())
            .map_err(|e| BuildError::WriteError(e.to_string()))
    }
}

/// Static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Load the configured content and price files.
    pub fn load_bundle(&self) -> Result<SiteBundle, BuildError> {
        SiteBundle::load(&self.config.content_path, &self.config.prices_path)
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        let bundle = self.load_bundle()?;

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let html = self.render_index(&bundle, &[])?;
        write(&self.config.output_dir.join("index.html"), html)?;

        write(
            &self.config.output_dir.join("prices.json"),
            bundle.pricing_json()?,
        )?;

        self.generate_assets()?;
        let static_files = self.copy_static()?;
        self.generate_sitemap()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: 1,
            static_files,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Render the storefront page for a bundle, with extra script tags appended.
    pub fn render_index(&self, bundle: &SiteBundle, scripts: &[String]) -> Result<String, BuildError> {
        let selections = Selections::default();
        let initial = quote(&OrderForm::from(&selections), &bundle.pricing);
        if !initial.is_available() {
            tracing::warn!("Default selections cannot be priced: {:?}", initial);
        }

        let context = Context {
            title: self
                .config
                .title
                .clone()
                .unwrap_or_else(|| bundle.content.brand.name.clone()),
            base_url: self.config.base_url.clone(),
            site: bundle.content.clone(),
            builder: BuilderView::new(&selections, &bundle.pricing, &initial),
            pricing_json: bundle.pricing_json()?,
            scripts: scripts.to_vec(),
        };

        self.templates
            .render_page("index.html", &context)
            .map_err(|e: minijinja::Error| BuildError::TemplateError(e.to_string()))
    }

    /// Main stylesheet, minified when configured.
    pub fn css(&self) -> String {
        let css = AssetPipeline::generate_css();
        if !self.config.minify {
            return css;
        }
        match AssetPipeline::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Serving unminified CSS: {}", e);
                css
            }
        }
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        write(&assets_dir.join("main.css"), self.css())?;
        write(&assets_dir.join("main.js"), AssetPipeline::generate_js())
    }

    /// Copy the static directory into `<output>/static`.
    fn copy_static(&self) -> Result<usize, BuildError> {
        let Some(static_dir) = &self.config.static_dir else {
            return Ok(0);
        };
        if !static_dir.exists() {
            tracing::debug!("Static directory {} not found", static_dir.display());
            return Ok(0);
        }

        let target_root = self.config.output_dir.join("static");
        let mut copied = 0;

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir).unwrap_or(path);
            let target = target_root.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
            }
            fs::copy(path, &target)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))?;
            copied += 1;
        }

        tracing::info!("Copied {} static files", copied);
        Ok(copied)
    }

    /// Generate sitemap and robots.txt.
    fn generate_sitemap(&self) -> Result<(), BuildError> {
        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>{}</loc>
  </url>
</urlset>"#,
            self.config.base_url
        );
        write(&self.config.output_dir.join("sitemap.xml"), sitemap)?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        write(&self.config.output_dir.join("robots.txt"), robots)
    }
}

fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), BuildError> {
    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn config_in(root: &Path) -> BuildConfig {
        BuildConfig {
            content_path: root.join("content/site.toml"),
            prices_path: root.join("content/prices.toml"),
            static_dir: Some(root.join("static")),
            output_dir: root.join("dist"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn builds_with_defaults_when_files_are_missing() {
        let temp = tempdir().unwrap();
        let config = config_in(temp.path());
        let out = config.output_dir.clone();

        let result = SiteBuilder::new(config).build().await.unwrap();

        assert_eq!(result.pages, 1);
        assert_eq!(result.static_files, 0);
        for file in [
            "index.html",
            "prices.json",
            "assets/main.css",
            "assets/main.js",
            "sitemap.xml",
            "robots.txt",
        ] {
            assert!(out.join(file).exists(), "missing {}", file);
        }

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("Melissa&#x27;s Wreaths &amp; Giggles"));
    }

    #[tokio::test]
    async fn uses_configured_prices() {
        let temp = tempdir().unwrap();
        let config = config_in(temp.path());
        let out = config.output_dir.clone();

        let prices = PricingConfig::default()
            .to_toml()
            .unwrap()
            .replace("medium = 65.0", "medium = 100.0");
        fs::create_dir_all(temp.path().join("content")).unwrap();
        fs::write(&config.prices_path, prices).unwrap();

        SiteBuilder::new(config).build().await.unwrap();

        // medium wreath in faux with ribbon: 100 + 8
        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains(">$108.00</output>"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("prices.json")).unwrap()).unwrap();
        assert_eq!(json["base"]["wreath"]["medium"], 100.0);
        assert_eq!(json["quantity"]["policy"], "clamp");
    }

    #[tokio::test]
    async fn invalid_prices_fail_the_build() {
        let temp = tempdir().unwrap();
        let config = config_in(temp.path());
        fs::create_dir_all(temp.path().join("content")).unwrap();
        fs::write(&config.prices_path, "[materials]\nfaux = 1.0\n").unwrap();

        let err = SiteBuilder::new(config).build().await.unwrap_err();
        assert!(matches!(err, BuildError::Pricing(TableError::MissingEntry(_))));
    }

    #[tokio::test]
    async fn copies_static_files() {
        let temp = tempdir().unwrap();
        let config = config_in(temp.path());
        let out = config.output_dir.clone();

        let images = temp.path().join("static/images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("wreath.jpg"), b"jpeg").unwrap();
        fs::write(temp.path().join("static/favicon.ico"), b"ico").unwrap();

        let result = SiteBuilder::new(config).build().await.unwrap();

        assert_eq!(result.static_files, 2);
        assert!(out.join("static/images/wreath.jpg").exists());
        assert!(out.join("static/favicon.ico").exists());
    }

    #[test]
    fn renders_extra_scripts() {
        let builder = SiteBuilder::new(BuildConfig::default());
        let html = builder
            .render_index(&SiteBundle::default(), &["/__hmr.js".to_string()])
            .unwrap();
        assert!(html.contains("<script src=\"&#x2f;__hmr.js\"></script>"));
    }

    #[test]
    fn links_only_the_generated_stylesheet() {
        let builder = SiteBuilder::new(BuildConfig::default());
        let html = builder.render_index(&SiteBundle::default(), &[]).unwrap();

        assert_eq!(html.matches("rel=\"stylesheet\"").count(), 1);
        assert!(html.contains("href=\"&#x2f;assets/main.css\""));
    }

    #[test]
    fn uses_configured_title() {
        let builder = SiteBuilder::new(BuildConfig {
            title: Some("Custom Title".to_string()),
            ..Default::default()
        });
        let html = builder.render_index(&SiteBundle::default(), &[]).unwrap();
        assert!(html.contains("<title>Custom Title</title>"));
    }
}
