//! Error types for estimation and price table loading.

/// Errors returned by the estimator and the form boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    /// Unknown category, size, material or add-on, or a price table gap.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Quantity missing, non-integer, zero, or outside the configured bounds.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),
}

/// Errors that can occur while loading a price table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Failed to read price table {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse price table: {0}")]
    ParseError(String),

    #[error("Failed to render price table: {0}")]
    SerializeError(String),

    #[error("Price table has no entry for {0}")]
    MissingEntry(String),

    #[error("Invalid amount for {key}: {value}")]
    InvalidAmount { key: String, value: f64 },

    #[error("Invalid quantity bounds: min {min}, max {max}")]
    InvalidQuantityBounds { min: u32, max: u32 },
}
