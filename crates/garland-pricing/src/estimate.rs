//! The custom-order price estimator.

use std::fmt;

use serde::Serialize;

use crate::error::EstimateError;
use crate::selections::Selections;
use crate::table::PriceTable;

/// A non-negative monetary amount in dollars, kept at full precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub const ZERO: Price = Price(0.0);

    /// Amount in dollars, unrounded.
    pub fn amount(self) -> f64 {
        self.0
    }

    /// Amount rounded to whole cents, half away from zero.
    pub fn cents(self) -> i64 {
        (self.0 * 100.0).round() as i64
    }

    /// Plain two-decimal amount, e.g. `1234.50`, rounded the same way as `Display`.
    pub fn decimal(self) -> String {
        let cents = self.cents();
        format!("{}.{:02}", cents / 100, cents % 100)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_usd(self.0))
    }
}

/// Format an amount as US currency, e.g. `$1,234.50`.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();

    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Price a set of selections.
///
/// The add-on total is added per unit before multiplying by quantity, so every
/// add-on is charged once per piece.
pub fn estimate(selections: &Selections, table: &PriceTable) -> Result<Price, EstimateError> {
    if selections.quantity == 0 {
        return Err(EstimateError::InvalidQuantity(
            "quantity must be at least 1".to_string(),
        ));
    }

    let base = table.base_price(selections.category, selections.size);
    let material_adjusted = base * table.multiplier(selections.material);
    let add_on_total: f64 = selections
        .add_ons
        .iter()
        .map(|a| table.add_on_price(a))
        .sum();

    let per_unit = material_adjusted + add_on_total;
    let total = per_unit * f64::from(selections.quantity);

    if !total.is_finite() {
        return Err(EstimateError::InvalidSelection(format!(
            "price table produced a non-finite total for {}/{}/{}",
            selections.category, selections.size, selections.material
        )));
    }

    Ok(Price(total.max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{AddOn, AddOnSet, Category, Material, Size};
    use pretty_assertions::assert_eq;

    fn selections(
        category: Category,
        size: Size,
        material: Material,
        quantity: u32,
        add_ons: &[AddOn],
    ) -> Selections {
        Selections {
            category,
            size,
            material,
            quantity,
            add_ons: add_ons.iter().copied().collect(),
        }
    }

    fn assert_close(price: Price, expected: f64) {
        assert!(
            (price.amount() - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            price.amount()
        );
    }

    #[test]
    fn faux_single_piece_is_base_price() {
        let table = PriceTable::default();
        let s = selections(Category::Wreath, Size::Medium, Material::Faux, 1, &[]);
        let price = estimate(&s, &table).unwrap();
        assert_eq!(price.amount(), 65.0);
        assert_eq!(price.to_string(), "$65.00");
    }

    #[test]
    fn dried_with_ribbon() {
        let table = PriceTable::default();
        let s = selections(
            Category::Wreath,
            Size::Medium,
            Material::Dried,
            1,
            &[AddOn::Ribbon],
        );
        let price = estimate(&s, &table).unwrap();
        assert_close(price, 82.75);
        assert_eq!(price.cents(), 8275);
        assert_eq!(price.to_string(), "$82.75");
    }

    #[test]
    fn add_ons_scale_with_quantity() {
        let table = PriceTable::default();
        let s = selections(
            Category::Wreath,
            Size::Medium,
            Material::Dried,
            3,
            &[AddOn::Ribbon],
        );
        let price = estimate(&s, &table).unwrap();
        assert_close(price, 248.25);
        assert_eq!(price.to_string(), "$248.25");
    }

    #[test]
    fn fresh_memorial_with_two_add_ons() {
        let table = PriceTable::default();
        let s = selections(
            Category::Memorial,
            Size::Large,
            Material::Fresh,
            2,
            &[AddOn::Lights, AddOn::Personalization],
        );
        let price = estimate(&s, &table).unwrap();
        assert_close(price, 319.0);
        assert_eq!(price.to_string(), "$319.00");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let table = PriceTable::default();
        let s = Selections {
            quantity: 0,
            ..Default::default()
        };
        assert!(matches!(
            estimate(&s, &table),
            Err(EstimateError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn does_not_touch_inputs() {
        let table = PriceTable::default();
        let s = Selections::default();
        let before = (s, table.clone());

        let first = estimate(&s, &table).unwrap();
        let second = estimate(&s, &table).unwrap();

        assert_eq!(first.amount().to_bits(), second.amount().to_bits());
        assert_eq!((s, table), before);
    }

    #[test]
    fn empty_add_on_set_adds_nothing() {
        let table = PriceTable::default();
        let s = Selections {
            add_ons: AddOnSet::empty(),
            ..Default::default()
        };
        assert_eq!(estimate(&s, &table).unwrap().amount(), 65.0);
    }

    #[test]
    fn decimal_rounds_ties_like_display() {
        // 50.5 * 1.25, exact in binary
        let price = Price(63.125);
        assert_eq!(price.decimal(), "63.13");
        assert_eq!(price.to_string(), "$63.13");
        assert_eq!(Price(1234.5).decimal(), "1234.50");
        assert_eq!(Price::ZERO.decimal(), "0.00");
    }

    #[test]
    fn formats_currency() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(8.5), "$8.50");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(-12.0), "-$12.00");
    }
}
