//! Response models for the one-shot REST operations

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::enums::OrderSide;

/// Current ticker for a pair
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ticker {
    /// Server timestamp (seconds, as a string on the wire)
    pub timestamp: String,
    pub last: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub volume: Decimal,
}

/// Aggregated order book snapshot
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderBook {
    pub timestamp: u64,
    /// `[price, amount]` levels, best bid first
    pub bids: Vec<(Decimal, Decimal)>,
    /// `[price, amount]` levels, best ask first
    pub asks: Vec<(Decimal, Decimal)>,
}

impl OrderBook {
    /// Best bid price, if the book has bids
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|(price, _)| *price)
    }

    /// Best ask price, if the book has asks
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|(price, _)| *price)
    }

    /// Current spread, if both sides are present
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// One public trade from the trade history endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeHistoryEntry {
    pub tid: String,
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub amount: Decimal,
    pub price: Decimal,
    /// Unix timestamp in seconds, as a string on the wire
    pub date: String,
}

/// An open or archived order
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub id: String,
    /// Creation time (millisecond epoch as a string on the wire)
    pub time: String,
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub price: Decimal,
    pub amount: Decimal,
    #[serde(default)]
    pub pending: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response to placing a limit order
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlacedOrder {
    pub id: String,
    pub time: u64,
    #[serde(rename = "type")]
    pub side: OrderSide,
    pub price: Decimal,
    pub amount: Decimal,
    pub pending: Decimal,
}

/// Response to placing a market order
///
/// The two symbol amounts arrive in raw remote units and are rescaled by
/// the client via the currency profiles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketOrderResult {
    pub id: String,
    #[serde(rename = "type")]
    pub side: OrderSide,
    #[serde(rename = "symbol1Amount")]
    pub symbol1_amount: Decimal,
    #[serde(rename = "symbol2Amount")]
    pub symbol2_amount: Decimal,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Funds available and reserved for one currency
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CurrencyBalance {
    pub available: Decimal,
    #[serde(default)]
    pub orders: Option<Decimal>,
}

/// Full account balance: per-currency entries plus envelope metadata
#[derive(Debug, Clone, Deserialize)]
pub struct AccountBalance {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// Remaining keys are currency codes mapping to balance objects
    #[serde(flatten)]
    entries: HashMap<String, Value>,
}

impl AccountBalance {
    /// Balance entry for one currency code, if present and well-formed
    pub fn currency(&self, code: &str) -> Option<CurrencyBalance> {
        let value = self.entries.get(code)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Currency codes with a well-formed balance entry
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, v)| v.get("available").is_some())
            .map(|(code, _)| code.as_str())
    }
}
