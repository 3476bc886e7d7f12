//! Alpaca trading API adapter for [`BrokerPort`].

use crate::adapters::alpaca::AlpacaEnv;
use crate::domain::account::{AccountSnapshot, HeldPosition, OrderSide};
use crate::domain::error::BotError;
use crate::ports::broker_port::BrokerPort;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::json;

pub struct AlpacaBroker {
    client: Client,
    base: &'static str,
    key: String,
    secret: String,
}

// Alpaca reports numeric fields as strings on the wire.
#[derive(Debug, Deserialize)]
struct AccountWire {
    equity: String,
}

#[derive(Debug, Deserialize)]
struct PositionWire {
    symbol: String,
    qty: String,
    avg_entry_price: String,
}

#[derive(Debug, Deserialize)]
struct OrderWire {
    id: String,
}

fn parse_money(value: &str, field: &str) -> Result<f64, BotError> {
    value.parse().map_err(|_| BotError::Broker {
        reason: format!("unparseable {field}: {value:?}"),
    })
}

impl AlpacaBroker {
    pub fn from_env() -> Result<Self, BotError> {
        Ok(Self::new(AlpacaEnv::from_env()?))
    }

    pub fn new(env: AlpacaEnv) -> Self {
        AlpacaBroker {
            client: Client::new(),
            base: env.trading_base(),
            key: env.key,
            secret: env.secret,
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
            .map_err(|e| BotError::Broker {
                reason: format!("{what}: {e}"),
            })?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(BotError::Broker {
                reason: format!("{what}: HTTP {status}: {body}"),
            });
        }
        Ok(response)
    }
}

impl BrokerPort for AlpacaBroker {
    fn account(&self) -> Result<AccountSnapshot, BotError> {
        let url = format!("{}/v2/account", self.base);
        let wire: AccountWire = self
            .request(self.client.get(url), "account query")?
            .json()
            .map_err(|e| BotError::Broker {
                reason: format!("account decode: {e}"),
            })?;
        Ok(AccountSnapshot {
            equity: parse_money(&wire.equity, "equity")?,
        })
    }

    fn positions(&self) -> Result<Vec<HeldPosition>, BotError> {
        let url = format!("{}/v2/positions", self.base);
        let wire: Vec<PositionWire> = self
            .request(self.client.get(url), "positions query")?
            .json()
            .map_err(|e| BotError::Broker {
                reason: format!("positions decode: {e}"),
            })?;

        wire.into_iter()
            .map(|p| {
                Ok(HeldPosition {
                    quantity: parse_money(&p.qty, "qty")? as i64,
                    avg_entry_price: parse_money(&p.avg_entry_price, "avg_entry_price")?,
                    symbol: p.symbol,
                })
            })
            .collect()
    }

    fn submit_market_order(
        &self,
        symbol: &str,
        qty: i64,
        side: OrderSide,
    ) -> Result<String, BotError> {
        let url = format!("{}/v2/orders", self.base);
        let body = json!({
            "symbol": symbol,
            "qty": qty.to_string(),
            "side": side.as_str(),
            "type": "market",
            "time_in_force": "day",
        });
        let wire: OrderWire = self
            .request(self.client.post(url).json(&body), "order submit")?
            .json()
            .map_err(|e| BotError::Broker {
                reason: format!("order decode: {e}"),
            })?;
        Ok(wire.id)
    }

    fn close_position(&self, symbol: &str) -> Result<(), BotError> {
        let url = format!("{}/v2/positions/{symbol}", self.base);
        self.request(self.client.delete(url), "position close")?;
        Ok(())
    }
}
