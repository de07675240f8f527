//! Storefront copy and static listings.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading site content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse site content: {0}")]
    ParseError(String),

    #[error("Failed to render site content: {0}")]
    SerializeError(String),
}

/// Everything the page shows apart from prices computed by the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    /// Where the quote, contact and newsletter forms post to.
    pub form_action: String,
    pub palettes: Vec<String>,
    pub brand: Brand,
    pub nav: Vec<NavLink>,
    pub hero: Hero,
    pub products: Vec<Product>,
    pub tutorials: Vec<Tutorial>,
    pub about: About,
    pub stats: Vec<Stat>,
    pub faqs: Vec<Faq>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Brand {
    pub name: String,
    pub tagline: String,
    pub phone: String,
    pub email: String,
    pub socials: Socials,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Socials {
    pub instagram: String,
    pub facebook: String,
    pub youtube: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub blurb: String,
    pub note: String,
    pub image: String,
}

/// A ready-made design in the shop grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: String,
    pub title: String,
    pub duration: String,
    pub thumbnail: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub story: String,
    pub highlights: Vec<String>,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub number: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

impl SiteContent {
    pub fn from_toml(source: &str) -> Result<Self, ContentError> {
        toml::from_str(source).map_err(|e| ContentError::ParseError(e.to_string()))
    }

    /// Load content from a TOML file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        if !path.exists() {
            tracing::debug!("No site content at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let source = fs::read_to_string(path).map_err(|e| ContentError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let content = Self::from_toml(&source)?;
        tracing::info!("Loaded site content from {}", path.display());
        Ok(content)
    }

    pub fn to_toml(&self) -> Result<String, ContentError> {
        toml::to_string_pretty(self).map_err(|e| ContentError::SerializeError(e.to_string()))
    }
}

fn unsplash(id: &str) -> String {
    format!(
        "https://images.unsplash.com/photo-{}?q=80&w=1200&auto=format&fit=crop",
        id
    )
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            form_action: "#".to_string(),
            palettes: strings(&[
                "Evergreen + Gold",
                "Berry + Pine",
                "Neutrals + Pampas",
                "Sunset Citrus",
                "Pastel Spring",
                "Custom",
            ]),
            brand: Brand::default(),
            nav: [
                ("#shop", "Shop"),
                ("#custom", "Custom Order"),
                ("#tutorials", "Tutorials"),
                ("#about", "About"),
                ("#faq", "FAQ"),
                ("#contact", "Contact"),
            ]
            .iter()
            .map(|(href, label)| NavLink {
                href: href.to_string(),
                label: label.to_string(),
            })
            .collect(),
            hero: Hero::default(),
            products: vec![
                Product {
                    id: "spring-bloom".to_string(),
                    title: "Spring Bloom Wreath".to_string(),
                    price: 75.0,
                    image: unsplash("1490578474895-699cd4e2cf59"),
                    tags: strings(&["Faux", "18\""]),
                },
                Product {
                    id: "autumn-harvest".to_string(),
                    title: "Autumn Harvest Centerpiece".to_string(),
                    price: 68.0,
                    image: unsplash("1543342386-c5a4f5ea62cc"),
                    tags: strings(&["Dried", "Table"]),
                },
                Product {
                    id: "evergreen-classic".to_string(),
                    title: "Evergreen Classic Wreath".to_string(),
                    price: 95.0,
                    image: unsplash("1543589077-47f3ea36d3f6"),
                    tags: strings(&["Fresh", "24\""]),
                },
            ],
            tutorials: vec![
                Tutorial {
                    id: "vid1".to_string(),
                    title: "Beginner: 30-min Faux Wreath".to_string(),
                    duration: "30:12".to_string(),
                    thumbnail: unsplash("1512428559087-560fa5ceab42"),
                    url: None,
                },
                Tutorial {
                    id: "vid2".to_string(),
                    title: "Dried Florals Centerpiece".to_string(),
                    duration: "18:47".to_string(),
                    thumbnail: unsplash("1501447108233-4a8d6d83dfdf"),
                    url: None,
                },
                Tutorial {
                    id: "vid3".to_string(),
                    title: "Memorial Arrangement Basics".to_string(),
                    duration: "22:03".to_string(),
                    thumbnail: unsplash("1470058869958-2a77ade41c02"),
                    url: None,
                },
            ],
            about: About::default(),
            stats: [
                ("1-3 days", "Typical build time"),
                ("500+", "Happy customers"),
                ("4.9/5", "Average review score"),
            ]
            .iter()
            .map(|(number, label)| Stat {
                number: number.to_string(),
                label: label.to_string(),
            })
            .collect(),
            faqs: vec![
                Faq {
                    question: "How do you price customs?".to_string(),
                    answer: "By category, size, and materials. The builder shows a live estimate; we confirm by email before payment. No surprises, just sparkles.".to_string(),
                },
                Faq {
                    question: "Do you ship?".to_string(),
                    answer: "Yep! Wreaths and dried pieces ship across the U.S. Fresh items are local delivery or pickup because we do not trust the postal system with moist foliage.".to_string(),
                },
                Faq {
                    question: "Do you offer memorial/gravesite pieces?".to_string(),
                    answer: "We create tasteful memorial wreaths and saddle arrangements. Share cemetery regulations in the notes, and we'll tailor the design: respectful first, fancy second.".to_string(),
                },
                Faq {
                    question: "Are tutorials beginner-friendly?".to_string(),
                    answer: "Absolutely. Captions, tool lists, and seated alternatives included. If you can wield scissors and a good pun, you're in.".to_string(),
                },
            ],
        }
    }
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            name: "Melissa's Wreaths & Giggles".to_string(),
            tagline: "Ridiculously delightful wreaths, centerpieces, and memorial florals"
                .to_string(),
            phone: "(555) 867-5309".to_string(),
            email: "hello@wreathandwarmth.com".to_string(),
            socials: Socials::default(),
        }
    }
}

impl Default for Socials {
    fn default() -> Self {
        Self {
            instagram: "https://instagram.com/yourwreathshop".to_string(),
            facebook: "https://facebook.com/yourwreathshop".to_string(),
            youtube: "https://youtube.com/@yourwreathshop".to_string(),
        }
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            blurb: "Custom work available for every season and occasion, with accessible at-home craftsmanship at our core.".to_string(),
            note: "Hand-made in small batches, powered by snacks. Disability-friendly studio practices.".to_string(),
            image: unsplash("1542990253-0d0f5be5f0ed"),
        }
    }
}

impl Default for About {
    fn default() -> Self {
        Self {
            story: "We craft decor that feels like home, and sometimes makes you snort-laugh. Founded by a professional floral designer named Melissa, our studio runs on joy, gentle pacing, and a strategically placed snack drawer. Every purchase supports fair pay, flexible workflows, and captioned tutorials for the community.".to_string(),
            highlights: strings(&[
                "Seated-friendly processes, adjustable work heights, and zero ladder drama",
                "Lightweight tools to reduce strain, fatigue, and grumpy elbows",
                "Clear pricing, custom options, and fast confirmations (slightly slower during cookie breaks)",
            ]),
            image: unsplash("1482304513936-8c79aa2fb2a1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn defaults_cover_every_section() {
        let content = SiteContent::default();
        assert_eq!(content.nav.len(), 6);
        assert_eq!(content.products.len(), 3);
        assert_eq!(content.tutorials.len(), 3);
        assert_eq!(content.faqs.len(), 4);
        assert_eq!(content.palettes.len(), 6);
        assert_eq!(content.form_action, "#");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let content = SiteContent::from_toml(
            r#"
[brand]
name = "Pine & Petal"

[[faqs]]
question = "Rush orders?"
answer = "Sometimes."
"#,
        )
        .unwrap();

        assert_eq!(content.brand.name, "Pine & Petal");
        assert_eq!(content.brand.email, Brand::default().email);
        assert_eq!(content.faqs.len(), 1);
        assert_eq!(content.products.len(), 3);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = SiteContent::from_toml("[brand\nname = 1").unwrap_err();
        assert!(matches!(err, ContentError::ParseError(_)));
    }

    #[test]
    fn writes_a_file_it_can_read_back() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        let content = SiteContent::default();
        fs::write(&path, content.to_toml().unwrap()).unwrap();

        assert_eq!(SiteContent::load(&path).unwrap(), content);
    }
}
