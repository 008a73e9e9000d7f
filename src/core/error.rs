//! Error types for Hypercoin.

use thiserror::Error;

/// Result type alias for Hypercoin operations.
pub type Result<T> = std::result::Result<T, HypercoinError>;

/// Error types for the simulation and projection engines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HypercoinError {
    /// Invalid parameter value.
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// Numeric input outside its accepted range.
    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Allocation percentages do not sum to 100.
    #[error("Allocation must total 100% (got {total:.1}%)")]
    InvalidAllocation { total: f64 },

    /// Down payment larger than the property price.
    #[error("Down payment {down_payment} exceeds property price {property_price}")]
    DownPaymentExceedsPrice {
        down_payment: f64,
        property_price: f64,
    },

    /// Empty data error.
    #[error("Empty data provided for {context}")]
    EmptyData { context: String },

    /// A price provider failed to produce a quote.
    #[error("{provider} quote unavailable: {reason}")]
    QuoteUnavailable { provider: String, reason: String },

    /// A quote was produced but failed validation.
    #[error("Invalid quote from {provider}: {value}")]
    InvalidQuote { provider: String, value: f64 },
}

impl HypercoinError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create an out-of-range error.
    pub fn out_of_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }

    /// Create an empty data error.
    pub fn empty_data(context: impl Into<String>) -> Self {
        Self::EmptyData {
            context: context.into(),
        }
    }

    /// Create a quote-unavailable error.
    pub fn quote_unavailable(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::QuoteUnavailable {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}
