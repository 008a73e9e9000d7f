//! Current Bitcoin price lookup.
//!
//! The HTTP client is supplied by the host through [`QuoteTransport`]; this
//! module only decides which responses to trust.

pub mod provider;
pub mod resolver;

pub use provider::{validate_price, QuoteProvider};
pub use resolver::{
    PriceResolver, QuoteResponse, QuoteSource, QuoteTransport, ResolvedQuote, TransportError,
    DEFAULT_TIMEOUT, FALLBACK_PRICE, MAX_RESPONSE_BYTES,
};
