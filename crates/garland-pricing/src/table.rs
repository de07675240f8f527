//! Price table and its TOML file form.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::options::{AddOn, Category, Material, Size};
use crate::selections::{QuantityBounds, QuantityPolicy, QuantityRules};

/// Prices for every option combination.
///
/// The table is total over the option enums: every category × size pair,
/// material and add-on has exactly one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    base: [[f64; Size::COUNT]; Category::COUNT],
    multipliers: [f64; Material::COUNT],
    add_ons: [f64; AddOn::COUNT],
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            base: [
                [45.0, 65.0, 95.0],  // wreath
                [35.0, 55.0, 85.0],  // centerpiece
                [40.0, 70.0, 110.0], // memorial
            ],
            multipliers: [1.0, 1.15, 1.25],
            add_ons: [12.0, 8.0, 10.0],
        }
    }
}

impl PriceTable {
    pub fn base_price(&self, category: Category, size: Size) -> f64 {
        self.base[category.index()][size.index()]
    }

    pub fn multiplier(&self, material: Material) -> f64 {
        self.multipliers[material.index()]
    }

    pub fn add_on_price(&self, add_on: AddOn) -> f64 {
        self.add_ons[add_on.index()]
    }

    /// Build a table from its sparse file form, requiring every entry.
    pub fn from_file(file: &PricingFile) -> Result<Self, TableError> {
        let mut table = Self {
            base: [[0.0; Size::COUNT]; Category::COUNT],
            multipliers: [0.0; Material::COUNT],
            add_ons: [0.0; AddOn::COUNT],
        };

        for &category in Category::ALL {
            let row = file.base.get(&category);
            for &size in Size::ALL {
                let key = format!("base.{}.{}", category, size);
                let value = row
                    .and_then(|r| r.get(&size))
                    .copied()
                    .ok_or_else(|| TableError::MissingEntry(key.clone()))?;
                table.base[category.index()][size.index()] = checked_amount(key, value)?;
            }
        }

        for &material in Material::ALL {
            let key = format!("materials.{}", material);
            let value = file
                .materials
                .get(&material)
                .copied()
                .ok_or_else(|| TableError::MissingEntry(key.clone()))?;
            table.multipliers[material.index()] = checked_amount(key, value)?;
        }

        for &add_on in AddOn::ALL {
            let key = format!("add_ons.{}", add_on);
            let value = file
                .add_ons
                .get(&add_on)
                .copied()
                .ok_or_else(|| TableError::MissingEntry(key.clone()))?;
            table.add_ons[add_on.index()] = checked_amount(key, value)?;
        }

        Ok(table)
    }
}

fn checked_amount(key: String, value: f64) -> Result<f64, TableError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TableError::InvalidAmount { key, value })
    }
}

/// Everything the order builder needs to price a request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingConfig {
    pub table: PriceTable,
    pub quantity: QuantityRules,
}

impl PricingConfig {
    /// Parse a pricing file from TOML source.
    pub fn from_toml(source: &str) -> Result<Self, TableError> {
        let file: PricingFile =
            toml::from_str(source).map_err(|e| TableError::ParseError(e.to_string()))?;
        Self::from_file(&file)
    }

    /// Load a pricing file, falling back to the default table when it does not exist.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        if !path.exists() {
            tracing::debug!("No price table at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let source = fs::read_to_string(path).map_err(|e| TableError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&source)?;
        tracing::info!("Loaded price table from {}", path.display());
        Ok(config)
    }

    pub fn from_file(file: &PricingFile) -> Result<Self, TableError> {
        let defaults = QuantityBounds::default();
        let bounds = QuantityBounds {
            min: file.quantity.min.unwrap_or(defaults.min),
            max: file.quantity.max.unwrap_or(defaults.max),
        };
        bounds.validate()?;

        Ok(Self {
            table: PriceTable::from_file(file)?,
            quantity: QuantityRules {
                bounds,
                policy: file.quantity.policy.unwrap_or_default(),
            },
        })
    }

    /// The fully populated file form of this configuration.
    pub fn to_file(&self) -> PricingFile {
        let base = Category::ALL
            .iter()
            .map(|&c| {
                let row = Size::ALL
                    .iter()
                    .map(|&s| (s, self.table.base_price(c, s)))
                    .collect();
                (c, row)
            })
            .collect();

        PricingFile {
            base,
            materials: Material::ALL
                .iter()
                .map(|&m| (m, self.table.multiplier(m)))
                .collect(),
            add_ons: AddOn::ALL
                .iter()
                .map(|&a| (a, self.table.add_on_price(a)))
                .collect(),
            quantity: QuantitySection {
                min: Some(self.quantity.bounds.min),
                max: Some(self.quantity.bounds.max),
                policy: Some(self.quantity.policy),
            },
        }
    }

    /// Render this configuration as a pricing TOML file.
    pub fn to_toml(&self) -> Result<String, TableError> {
        toml::to_string_pretty(&self.to_file())
            .map_err(|e| TableError::SerializeError(e.to_string()))
    }
}

/// Pricing file layout (`prices.toml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PricingFile {
    #[serde(default)]
    pub base: BTreeMap<Category, BTreeMap<Size, f64>>,

    #[serde(default)]
    pub materials: BTreeMap<Material, f64>,

    #[serde(default)]
    pub add_ons: BTreeMap<AddOn, f64>,

    #[serde(default)]
    pub quantity: QuantitySection,
}

/// `[quantity]` section of the pricing file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuantitySection {
    pub min: Option<u32>,
    pub max: Option<u32>,
    pub policy: Option<QuantityPolicy>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const FULL: &str = r#"
[base.wreath]
small = 45
medium = 65
large = 95

[base.centerpiece]
small = 35
medium = 55
large = 85

[base.memorial]
small = 40
medium = 70
large = 110

[materials]
faux = 1.0
dried = 1.15
fresh = 1.25

[add_ons]
lights = 12
ribbon = 8
personalization = 10

[quantity]
min = 1
max = 12
policy = "reject"
"#;

    #[test]
    fn default_table_matches_reference_prices() {
        let table = PriceTable::default();
        assert_eq!(table.base_price(Category::Wreath, Size::Medium), 65.0);
        assert_eq!(table.base_price(Category::Memorial, Size::Large), 110.0);
        assert_eq!(table.base_price(Category::Centerpiece, Size::Small), 35.0);
        assert_eq!(table.multiplier(Material::Dried), 1.15);
        assert_eq!(table.add_on_price(AddOn::Lights), 12.0);
    }

    #[test]
    fn parses_full_file() {
        let config = PricingConfig::from_toml(FULL).unwrap();
        assert_eq!(config.table, PriceTable::default());
        assert_eq!(config.quantity.bounds, QuantityBounds { min: 1, max: 12 });
        assert_eq!(config.quantity.policy, QuantityPolicy::Reject);
    }

    #[test]
    fn reports_missing_entries() {
        let source = FULL.replace("large = 110\n", "");
        let err = PricingConfig::from_toml(&source).unwrap_err();
        assert!(matches!(err, TableError::MissingEntry(ref k) if k == "base.memorial.large"));
    }

    #[test]
    fn rejects_unknown_options() {
        let source = format!("{}\n[base.holiday]\nsmall = 1\n", FULL);
        let err = PricingConfig::from_toml(&source).unwrap_err();
        assert!(matches!(err, TableError::ParseError(_)));
    }

    #[test]
    fn rejects_negative_amounts() {
        let source = FULL.replace("ribbon = 8", "ribbon = -8");
        let err = PricingConfig::from_toml(&source).unwrap_err();
        assert!(matches!(err, TableError::InvalidAmount { ref key, .. } if key == "add_ons.ribbon"));
    }

    #[test]
    fn rejects_inverted_quantity_bounds() {
        let source = FULL.replace("max = 12", "max = 0");
        let err = PricingConfig::from_toml(&source).unwrap_err();
        assert!(matches!(err, TableError::InvalidQuantityBounds { .. }));
    }

    #[test]
    fn quantity_section_is_optional() {
        let source = FULL.split("[quantity]").next().unwrap();
        let config = PricingConfig::from_toml(source).unwrap();
        assert_eq!(config.quantity, QuantityRules::default());
    }

    #[test]
    fn writes_a_file_it_can_read_back() {
        let config = PricingConfig::default();
        let source = config.to_toml().unwrap();
        assert!(source.contains("[base.wreath]"));
        assert_eq!(PricingConfig::from_toml(&source).unwrap(), config);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = PricingConfig::load(&temp.path().join("prices.toml")).unwrap();
        assert_eq!(config, PricingConfig::default());
    }

    #[test]
    fn loads_file_from_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("prices.toml");
        fs::write(&path, FULL.replace("medium = 65", "medium = 70")).unwrap();

        let config = PricingConfig::load(&path).unwrap();
        assert_eq!(config.table.base_price(Category::Wreath, Size::Medium), 70.0);
    }
}
