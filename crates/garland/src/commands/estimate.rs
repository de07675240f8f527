//! Price a custom order from the command line.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use garland_pricing::{quote, OrderForm, PricingConfig, Quote, Selections};

use crate::config::load_config;

#[derive(Debug, Clone, Args)]
pub struct EstimateArgs {
    /// wreath, centerpiece or memorial
    #[arg(long, default_value = "wreath")]
    pub category: String,

    /// small, medium or large
    #[arg(long, default_value = "medium")]
    pub size: String,

    /// faux, dried or fresh
    #[arg(long, default_value = "faux")]
    pub material: String,

    /// Number of pieces
    #[arg(short, long)]
    pub quantity: Option<String>,

    /// Add-on to include (lights, ribbon, personalization); repeatable
    #[arg(long = "add-on")]
    pub add_ons: Vec<String>,

    /// Print the estimate as JSON
    #[arg(long)]
    pub json: bool,
}

impl EstimateArgs {
    fn form(&self) -> OrderForm {
        OrderForm {
            category: self.category.clone(),
            size: self.size.clone(),
            material: self.material.clone(),
            quantity: self.quantity.clone(),
            add_ons: self.add_ons.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct EstimateReport {
    selections: Selections,
    amount: f64,
    formatted: String,
}

/// Run the estimate command.
pub fn run(config_path: &Path, args: EstimateArgs) -> Result<()> {
    let file_config = load_config(config_path)?;
    let pricing = PricingConfig::load(&file_config.site.prices)
        .with_context(|| format!("Failed to load {}", file_config.site.prices.display()))?;

    println!("{}", render(&args, &pricing)?);

    Ok(())
}

fn render(args: &EstimateArgs, pricing: &PricingConfig) -> Result<String> {
    let form = args.form();

    let price = match quote(&form, pricing) {
        Quote::Available(price) => price,
        Quote::Unavailable(e) => anyhow::bail!("Estimate unavailable: {}", e),
    };

    if !args.json {
        return Ok(price.to_string());
    }

    // quote() succeeded, so parsing again cannot fail
    let selections = form.selections(&pricing.quantity)?;
    let report = EstimateReport {
        selections,
        amount: price.amount(),
        formatted: price.to_string(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
