//! Price lookup (CoinGecko simple/price, public)

use serde::Deserialize;
use std::collections::HashMap;

use super::{VendorClient, VendorRequest, VendorResult};
use crate::application::errors::{Capability, VendorError};
use crate::infrastructure::config::PriceVendorConfig;

/// Price snapshot for one coin, in USD
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: Option<f64>,
    /// Percent change over 24h, zero when the vendor omits it
    pub change_24h: f64,
    pub market_cap: Option<f64>,
    /// Unix seconds of the vendor's last update
    pub last_updated_at: Option<i64>,
}

#[derive(Deserialize, Debug)]
struct CoinQuote {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
    usd_market_cap: Option<f64>,
    last_updated_at: Option<i64>,
}

pub fn lookup_request(config: &PriceVendorConfig, symbol: &str) -> VendorRequest {
    let endpoint = format!("{}/simple/price", config.base_url.trim_end_matches('/'));

    VendorRequest::get(Capability::Price, endpoint)
        .with_query("ids", symbol)
        .with_query("vs_currencies", "usd")
        .with_query("include_24hr_change", "true")
        .with_query("include_market_cap", "true")
        .with_query("include_last_updated_at", "true")
}

/// Pick the requested coin out of the response map
fn quote_for(mut data: HashMap<String, CoinQuote>, symbol: &str) -> VendorResult<PriceQuote> {
    let coin = data
        .remove(symbol)
        .ok_or_else(|| VendorError::data_miss(Capability::Price, symbol))?;

    Ok(PriceQuote {
        symbol: symbol.to_string(),
        price: coin.usd,
        change_24h: coin.usd_24h_change.unwrap_or(0.0),
        market_cap: coin.usd_market_cap,
        last_updated_at: coin.last_updated_at,
    })
}

impl VendorClient {
    /// Look up a coin by its vendor id; `symbol` must already be lower-cased
    pub async fn price_lookup(&self, symbol: &str) -> VendorResult<PriceQuote> {
        let request = lookup_request(&self.config().vendors.price, symbol);
        let data: HashMap<String, CoinQuote> = self.execute_json(request).await?;
        quote_for(data, symbol)
    }
}
