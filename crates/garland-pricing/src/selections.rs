//! The user's current custom-order choices and quantity handling.

use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, TableError};
use crate::options::{AddOn, AddOnSet, Category, Material, Size};

/// A complete set of custom-order choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selections {
    pub category: Category,
    pub size: Size,
    pub material: Material,
    pub quantity: u32,
    #[serde(default)]
    pub add_ons: AddOnSet,
}

impl Default for Selections {
    /// What the builder shows before the user touches anything.
    fn default() -> Self {
        Self {
            category: Category::Wreath,
            size: Size::Medium,
            material: Material::Faux,
            quantity: 1,
            add_ons: AddOnSet::empty().with(AddOn::Ribbon),
        }
    }
}

/// Inclusive quantity range accepted by the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityBounds {
    pub min: u32,
    pub max: u32,
}

impl Default for QuantityBounds {
    fn default() -> Self {
        Self { min: 1, max: 20 }
    }
}

impl QuantityBounds {
    /// Check `1 <= min <= max`.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.min == 0 || self.min > self.max {
            return Err(TableError::InvalidQuantityBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, quantity: u32) -> bool {
        (self.min..=self.max).contains(&quantity)
    }

    fn clamp(&self, value: i64) -> u32 {
        // min >= 1, so the clamped value always fits a u32
        value.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }
}

/// What to do with quantity input that is missing, malformed or out of range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityPolicy {
    /// Fall back to 1 for unreadable input and pull values into bounds.
    #[default]
    Clamp,
    /// Refuse anything that is not an in-bounds integer.
    Reject,
}

/// Quantity bounds plus the policy applied at the form boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuantityRules {
    #[serde(flatten)]
    pub bounds: QuantityBounds,
    pub policy: QuantityPolicy,
}

impl QuantityRules {
    /// Turn raw quantity input into a quantity the estimator accepts.
    pub fn resolve(&self, raw: Option<&str>) -> Result<u32, EstimateError> {
        let raw = raw.map(str::trim).unwrap_or("");

        match self.policy {
            QuantityPolicy::Clamp => {
                let value = leading_integer(raw).unwrap_or(1);
                Ok(self.bounds.clamp(value))
            }
            QuantityPolicy::Reject => {
                let value: i64 = raw.parse().map_err(|_| {
                    EstimateError::InvalidQuantity(format!("'{}' is not a whole number", raw))
                })?;
                match u32::try_from(value) {
                    Ok(q) if self.bounds.contains(q) => Ok(q),
                    _ => Err(EstimateError::InvalidQuantity(format!(
                        "{} is outside {}..={}",
                        value, self.bounds.min, self.bounds.max
                    ))),
                }
            }
        }
    }
}

/// Integer value of the leading `[+-]digits` of `s`, saturating on overflow.
fn leading_integer(s: &str) -> Option<i64> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clamp_rules() -> QuantityRules {
        QuantityRules::default()
    }

    fn reject_rules() -> QuantityRules {
        QuantityRules {
            policy: QuantityPolicy::Reject,
            ..Default::default()
        }
    }

    #[test]
    fn default_selections_match_first_render() {
        let s = Selections::default();
        assert_eq!(s.category, Category::Wreath);
        assert_eq!(s.size, Size::Medium);
        assert_eq!(s.material, Material::Faux);
        assert_eq!(s.quantity, 1);
        assert_eq!(s.add_ons.iter().collect::<Vec<_>>(), vec![AddOn::Ribbon]);
    }

    #[test]
    fn clamp_falls_back_to_one() {
        let rules = clamp_rules();
        assert_eq!(rules.resolve(None).unwrap(), 1);
        assert_eq!(rules.resolve(Some("")).unwrap(), 1);
        assert_eq!(rules.resolve(Some("lots")).unwrap(), 1);
    }

    #[test]
    fn clamp_pulls_values_into_bounds() {
        let rules = clamp_rules();
        assert_eq!(rules.resolve(Some("0")).unwrap(), 1);
        assert_eq!(rules.resolve(Some("-4")).unwrap(), 1);
        assert_eq!(rules.resolve(Some("7")).unwrap(), 7);
        assert_eq!(rules.resolve(Some("21")).unwrap(), 20);
        assert_eq!(rules.resolve(Some("99999999999999999999")).unwrap(), 20);
    }

    #[test]
    fn clamp_reads_leading_digits() {
        let rules = clamp_rules();
        assert_eq!(rules.resolve(Some("3.7")).unwrap(), 3);
        assert_eq!(rules.resolve(Some(" 12 wreaths")).unwrap(), 12);
    }

    #[test]
    fn clamp_fallback_respects_raised_minimum() {
        let rules = QuantityRules {
            bounds: QuantityBounds { min: 2, max: 10 },
            policy: QuantityPolicy::Clamp,
        };
        assert_eq!(rules.resolve(None).unwrap(), 2);
    }

    #[test]
    fn reject_refuses_bad_input() {
        let rules = reject_rules();
        assert_eq!(rules.resolve(Some("5")).unwrap(), 5);

        for raw in [None, Some(""), Some("abc"), Some("2.5"), Some("0"), Some("-1"), Some("21")] {
            assert!(
                matches!(rules.resolve(raw), Err(EstimateError::InvalidQuantity(_))),
                "expected rejection for {:?}",
                raw
            );
        }
    }

    #[test]
    fn validates_bounds() {
        assert!(QuantityBounds::default().validate().is_ok());
        assert!(QuantityBounds { min: 0, max: 5 }.validate().is_err());
        assert!(QuantityBounds { min: 6, max: 5 }.validate().is_err());
    }
}
