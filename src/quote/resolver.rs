//! Best-effort price lookup across providers with a constant fallback.

use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use super::provider::{validate_price, QuoteProvider};
use crate::core::error::{HypercoinError, Result};
use crate::core::types::Price;

/// Price used when every provider fails.
pub const FALLBACK_PRICE: Price = 115_000.0;
/// Largest response body accepted from a provider.
pub const MAX_RESPONSE_BYTES: usize = 10_000;
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Raw HTTP response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl QuoteResponse {
    /// 200 response with a JSON content type.
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: body.into(),
        }
    }
}

/// Failure below the HTTP layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timeout")]
    Timeout,
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Performs a GET. Implemented by the host's HTTP client.
pub trait QuoteTransport {
    fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<QuoteResponse, TransportError>;
}

/// Where a resolved price came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuoteSource {
    Provider(QuoteProvider),
    Fallback,
}

/// Resolved price and its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedQuote {
    pub price: Price,
    pub source: QuoteSource,
}

/// Tries each provider in order and falls back to [`FALLBACK_PRICE`].
#[derive(Debug, Clone)]
pub struct PriceResolver<T> {
    transport: T,
    providers: Vec<QuoteProvider>,
    timeout: Duration,
}

impl<T: QuoteTransport> PriceResolver<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            providers: QuoteProvider::ALL.to_vec(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_providers(mut self, providers: Vec<QuoteProvider>) -> Self {
        self.providers = providers;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch, parse and validate one provider's quote.
    pub fn fetch(&self, provider: QuoteProvider) -> Result<Price> {
        let response = self
            .transport
            .get(provider.url(), self.timeout)
            .map_err(|e| HypercoinError::quote_unavailable(provider.name(), e.to_string()))?;

        if !(200..300).contains(&response.status) {
            return Err(HypercoinError::quote_unavailable(
                provider.name(),
                format!("HTTP {}", response.status),
            ));
        }
        let is_json = response
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"));
        if !is_json {
            return Err(HypercoinError::quote_unavailable(
                provider.name(),
                "invalid response content type",
            ));
        }
        if response.body.len() > MAX_RESPONSE_BYTES {
            return Err(HypercoinError::quote_unavailable(
                provider.name(),
                "response too large",
            ));
        }

        let raw = provider.parse(&response.body)?;
        validate_price(provider, raw)
    }

    /// First valid quote, or the fallback price. Never fails.
    pub fn resolve(&self) -> ResolvedQuote {
        for &provider in &self.providers {
            match self.fetch(provider) {
                Ok(price) => {
                    info!(%provider, price, "bitcoin price resolved");
                    return ResolvedQuote {
                        price,
                        source: QuoteSource::Provider(provider),
                    };
                }
                Err(e) => warn!(%provider, error = %e, "price provider failed"),
            }
        }
        warn!(price = FALLBACK_PRICE, "all price providers failed; using fallback");
        ResolvedQuote {
            price: FALLBACK_PRICE,
            source: QuoteSource::Fallback,
        }
    }
}
