//! Validation Errors

use serde_json::Value;
use thiserror::Error;

/// Errors produced while validating a quote submission.
///
/// Every variant carries enough detail for the client to self-correct in a
/// single round trip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// One or more required form fields are absent, null, or empty.
    /// Field names are reported in wire order, all at once.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The amount could not be coerced to a finite number.
    /// `got` echoes the raw value as submitted (null when absent).
    #[error("amount is not a finite number")]
    AmountNotNumeric { got: Value },

    /// The amount rounds to less than the checkout minimum of 50 cents.
    #[error("amount {got} is below the 50 minor-unit minimum")]
    AmountBelowMinimum { got: i64 },
}
