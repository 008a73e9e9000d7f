//! Price providers and their response shapes.

use serde::{Deserialize, Serialize};

use crate::core::config::CURRENT_PRICE_BOUNDS;
use crate::core::error::{HypercoinError, Result};
use crate::core::types::Price;

/// Public Bitcoin/USD price endpoints, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuoteProvider {
    CoinGecko,
    CoinCap,
    Binance,
}

#[derive(Deserialize)]
struct CoinGeckoResponse {
    bitcoin: CoinGeckoQuote,
}

#[derive(Deserialize)]
struct CoinGeckoQuote {
    usd: f64,
}

#[derive(Deserialize)]
struct CoinCapResponse {
    data: CoinCapAsset,
}

#[derive(Deserialize)]
struct CoinCapAsset {
    #[serde(rename = "priceUsd")]
    price_usd: String,
}

#[derive(Deserialize)]
struct BinanceTicker {
    price: String,
}

impl QuoteProvider {
    pub const ALL: [QuoteProvider; 3] = [
        QuoteProvider::CoinGecko,
        QuoteProvider::CoinCap,
        QuoteProvider::Binance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QuoteProvider::CoinGecko => "CoinGecko",
            QuoteProvider::CoinCap => "CoinCap",
            QuoteProvider::Binance => "Binance",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            QuoteProvider::CoinGecko => {
                "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd"
            }
            QuoteProvider::CoinCap => "https://api.coincap.io/v2/assets/bitcoin",
            QuoteProvider::Binance => "https://api.binance.com/api/v3/ticker/price?symbol=BTCUSDT",
        }
    }

    /// Extract the raw (unvalidated) price from a JSON body.
    ///
    /// CoinGecko reports a JSON number; CoinCap and Binance report a decimal
    /// string.
    pub fn parse(&self, body: &[u8]) -> Result<Price> {
        let malformed = |e: serde_json::Error| {
            HypercoinError::quote_unavailable(self.name(), format!("malformed response: {e}"))
        };
        match self {
            QuoteProvider::CoinGecko => {
                let r: CoinGeckoResponse = serde_json::from_slice(body).map_err(malformed)?;
                Ok(r.bitcoin.usd)
            }
            QuoteProvider::CoinCap => {
                let r: CoinCapResponse = serde_json::from_slice(body).map_err(malformed)?;
                self.parse_decimal(&r.data.price_usd)
            }
            QuoteProvider::Binance => {
                let r: BinanceTicker = serde_json::from_slice(body).map_err(malformed)?;
                self.parse_decimal(&r.price)
            }
        }
    }

    fn parse_decimal(&self, raw: &str) -> Result<Price> {
        raw.trim().parse::<f64>().map_err(|_| {
            HypercoinError::quote_unavailable(self.name(), format!("unparseable price {raw:?}"))
        })
    }
}

impl std::fmt::Display for QuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Accept a quote only when it is finite, positive and within the sane
/// price bounds; accepted quotes are rounded to whole dollars.
pub fn validate_price(provider: QuoteProvider, price: Price) -> Result<Price> {
    if !price.is_finite()
        || price <= 0.0
        || price < CURRENT_PRICE_BOUNDS.min
        || price > CURRENT_PRICE_BOUNDS.max
    {
        return Err(HypercoinError::InvalidQuote {
            provider: provider.name().to_string(),
            value: price,
        });
    }
    Ok(price.round())
}
