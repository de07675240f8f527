//! Custom-order pricing for garland storefronts.
//!
//! Maps a set of order choices (category, size, material, quantity, add-ons)
//! to a price using a total, read-only price table.

pub mod error;
pub mod estimate;
pub mod form;
pub mod options;
pub mod selections;
pub mod table;

pub use error::{EstimateError, TableError};
pub use estimate::{estimate, format_usd, Price};
pub use form::{quote, OrderForm, Quote};
pub use options::{AddOn, AddOnSet, Category, Material, Size};
pub use selections::{QuantityBounds, QuantityPolicy, QuantityRules, Selections};
pub use table::{PriceTable, PricingConfig, PricingFile};
