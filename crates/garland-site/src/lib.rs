//! Static storefront generator for garland shops.
//!
//! Renders a single-page storefront (shop grid, custom-order builder with a
//! live estimate, tutorials, about, FAQ and contact) from TOML content and a
//! price table.

pub mod assets;
pub mod builder;
pub mod content;
pub mod templates;

pub use assets::AssetPipeline;
pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder, SiteBundle};
pub use content::{ContentError, SiteContent};
