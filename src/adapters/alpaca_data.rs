//! Alpaca market-data API adapter for [`MarketDataPort`].

use crate::adapters::alpaca::{AlpacaEnv, DATA_BASE};
use crate::domain::bar::Bar;
use crate::domain::error::BotError;
use crate::ports::data_port::{Instrument, MarketDataPort};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::collections::HashMap;

const PAGE_LIMIT: u32 = 10_000;

pub struct AlpacaData {
    client: Client,
    trading_base: &'static str,
    key: String,
    secret: String,
    feed: String,
}

#[derive(Debug, Deserialize)]
struct BarsPage {
    bars: Option<Vec<Bar>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MultiBarsPage {
    bars: Option<HashMap<String, Vec<Bar>>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssetWire {
    symbol: String,
    tradable: bool,
}

impl AlpacaData {
    pub fn from_env() -> Result<Self, BotError> {
        Ok(Self::new(AlpacaEnv::from_env()?))
    }

    pub fn new(env: AlpacaEnv) -> Self {
        AlpacaData {
            client: Client::new(),
            trading_base: env.trading_base(),
            key: env.key,
            secret: env.secret,
            feed: env.feed,
        }
    }

    fn request(
        &self,
        builder: reqwest::blocking::RequestBuilder,
        what: &str,
    ) -> Result<Response, BotError> {
        let response = builder
            .header("APCA-API-KEY-ID", &self.key)
            .header("APCA-API-SECRET-KEY", &self.secret)
            .send()
            .map_err(|e| BotError::Data {
                reason: format!("{what}: {e}"),
            })?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(BotError::Data {
                reason: format!("{what}: HTTP {status}: {body}"),
            });
        }
        Ok(response)
    }
}

impl MarketDataPort for AlpacaData {
    fn get_bars(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, BotError> {
        let url = format!("{DATA_BASE}/v2/stocks/{symbol}/bars");
        let mut bars = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("timeframe".to_string(), "1Min".to_string()),
                ("start".to_string(), start.to_rfc3339()),
                ("end".to_string(), end.to_rfc3339()),
                ("limit".to_string(), PAGE_LIMIT.to_string()),
                ("adjustment".to_string(), "raw".to_string()),
                ("feed".to_string(), self.feed.clone()),
            ];
            if let Some(token) = &page_token {
                query.push(("page_token".to_string(), token.clone()));
            }

            let page: BarsPage = self
                .request(self.client.get(&url).query(&query), "bars fetch")?
                .json()
                .map_err(|e| BotError::Data {
                    reason: format!("bars decode: {e}"),
                })?;

            if let Some(chunk) = page.bars {
                bars.extend(chunk);
            }
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(bars)
    }

    fn get_daily_bars(
        &self,
        symbols: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<Bar>>, BotError> {
        let url = format!("{DATA_BASE}/v2/stocks/bars");
        let mut per_symbol: HashMap<String, Vec<Bar>> = HashMap::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("symbols".to_string(), symbols.join(",")),
                ("timeframe".to_string(), "1Day".to_string()),
                ("start".to_string(), start.to_rfc3339()),
                ("end".to_string(), end.to_rfc3339()),
                ("limit".to_string(), PAGE_LIMIT.to_string()),
                ("adjustment".to_string(), "raw".to_string()),
                ("feed".to_string(), self.feed.clone()),
            ];
            if let Some(token) = &page_token {
                query.push(("page_token".to_string(), token.clone()));
            }

            let page: MultiBarsPage = self
                .request(self.client.get(&url).query(&query), "daily bars fetch")?
                .json()
                .map_err(|e| BotError::Data {
                    reason: format!("daily bars decode: {e}"),
                })?;

            if let Some(map) = page.bars {
                for (symbol, chunk) in map {
                    per_symbol.entry(symbol).or_default().extend(chunk);
                }
            }
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(per_symbol)
    }

    fn list_tradable_instruments(&self) -> Result<Vec<Instrument>, BotError> {
        let url = format!("{}/v2/assets", self.trading_base);
        let query = [("status", "active"), ("asset_class", "us_equity")];
        let wire: Vec<AssetWire> = self
            .request(self.client.get(&url).query(&query), "assets fetch")?
            .json()
            .map_err(|e| BotError::Data {
                reason: format!("assets decode: {e}"),
            })?;

        Ok(wire
            .into_iter()
            .map(|a| Instrument {
                symbol: a.symbol,
                tradable: a.tradable,
            })
            .collect())
    }
}
