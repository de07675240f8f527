//! Raw order-form input and the estimate shown beside it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EstimateError;
use crate::estimate::{estimate, Price};
use crate::options::{AddOn, AddOnSet};
use crate::selections::{QuantityRules, Selections};
use crate::table::PricingConfig;

/// Order-form values exactly as a browser or command line sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub category: String,
    pub size: String,
    pub material: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub add_ons: Vec<String>,
}

impl OrderForm {
    /// Parse the form into typed selections.
    pub fn selections(&self, rules: &QuantityRules) -> Result<Selections, EstimateError> {
        let add_ons = self
            .add_ons
            .iter()
            .map(|a| a.parse::<AddOn>())
            .collect::<Result<AddOnSet, _>>()?;

        Ok(Selections {
            category: self.category.parse()?,
            size: self.size.parse()?,
            material: self.material.parse()?,
            quantity: rules.resolve(self.quantity.as_deref())?,
            add_ons,
        })
    }
}

impl From<&Selections> for OrderForm {
    fn from(s: &Selections) -> Self {
        Self {
            category: s.category.key().to_string(),
            size: s.size.key().to_string(),
            material: s.material.key().to_string(),
            quantity: Some(s.quantity.to_string()),
            add_ons: s.add_ons.iter().map(|a| a.key().to_string()).collect(),
        }
    }
}

/// What the estimate panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Quote {
    Available(Price),
    Unavailable(EstimateError),
}

impl Quote {
    pub fn price(&self) -> Option<Price> {
        match self {
            Quote::Available(p) => Some(*p),
            Quote::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Quote::Available(_))
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quote::Available(p) => write!(f, "{}", p),
            Quote::Unavailable(_) => f.write_str("Estimate unavailable"),
        }
    }
}

/// Quote a raw form against the active pricing.
pub fn quote(form: &OrderForm, config: &PricingConfig) -> Quote {
    let result = form
        .selections(&config.quantity)
        .and_then(|s| estimate(&s, &config.table));

    match result {
        Ok(price) => Quote::Available(price),
        Err(e) => {
            tracing::debug!("Estimate unavailable: {}", e);
            Quote::Unavailable(e)
        }
    }
}
