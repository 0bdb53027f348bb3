//! Transaction records and the classification rule
//!
//! A transaction is an opaque record from the `raw_tx_history` endpoint.
//! Besides the fixed fields, buy/sell transactions carry their originating
//! order id under a field named after their own raw type (`tx["sell"]` for
//! a sell), while hold/cancel/return transactions only carry the generic
//! `order` field. The flattened `extra` map keeps those type-named fields
//! around so the owning order can be resolved.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::TransactionKind;
use crate::error::CexError;

/// A single transaction record, immutable once received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique id, monotonically assigned by the remote system
    pub id: String,
    /// Server-side timestamp
    pub time: DateTime<Utc>,
    /// Raw type as reported by the remote (`buy`, `sell`, `cancel`, ...)
    #[serde(rename = "type")]
    pub tx_type: String,
    /// Signed amount; negative for holds
    pub amount: Decimal,
    /// Generic reference to the originating order, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// Remaining fields, including the type-named order id of buy/sell
    /// transactions
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Look up a field by name, covering both the fixed `order` field and
    /// the flattened remainder
    pub fn field(&self, name: &str) -> Option<&str> {
        if name == "order" {
            return self.order.as_deref();
        }
        self.extra.get(name).and_then(Value::as_str)
    }

    /// Resolve the id of the order this transaction belongs to
    ///
    /// Buy/sell transactions store it under a field named by their own raw
    /// type; everything else falls back to the generic `order` field.
    pub fn owning_order_id(&self) -> Option<&str> {
        match self.field(&self.tx_type) {
            Some(id) if !id.is_empty() => Some(id),
            _ => self.order.as_deref(),
        }
    }

    /// Resolve the semantic kind of this transaction
    ///
    /// A transaction referencing an order with a negative amount is a hold
    /// regardless of its raw type; `cancel` maps to [`TransactionKind::Return`].
    ///
    /// # Errors
    /// [`CexError::UnknownTransactionType`] if the raw type is outside the
    /// closed set.
    pub fn classify(&self) -> Result<TransactionKind, CexError> {
        if self.order.is_some() && self.amount < Decimal::ZERO {
            return Ok(TransactionKind::Hold);
        }
        match self.tx_type.as_str() {
            "cancel" => Ok(TransactionKind::Return),
            "buy" => Ok(TransactionKind::Buy),
            "sell" => Ok(TransactionKind::Sell),
            other => Err(CexError::unknown_transaction_type(other)),
        }
    }

    /// Returns true if this transaction holds funds on the balance or
    /// returns them, rather than executing a deal
    pub fn is_non_deal(&self) -> Result<bool, CexError> {
        Ok(self.classify()?.is_non_deal())
    }

    /// Format a timestamp the way the pagination cursor expects it
    /// (RFC3339 with millisecond precision, e.g. `1970-01-01T00:00:00.000Z`)
    pub fn format_time(time: &DateTime<Utc>) -> String {
        time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// This record's timestamp in cursor format
    pub fn cursor_time(&self) -> String {
        Self::format_time(&self.time)
    }
}

/// Response envelope of one `raw_tx_history` fetch
///
/// A non-empty `error` is fatal for that fetch. Absent `data.vtx` is an
/// empty page; absent `data.prev` means no more pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransactionsResponse {
    /// Error string reported by the remote, if any
    #[serde(default)]
    pub error: Option<String>,
    /// Page payload
    #[serde(default)]
    pub data: Option<RawTransactionPage>,
}

/// One page of transaction records in the remote's native newest-first order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransactionPage {
    /// Transaction records, sorted by id descending
    #[serde(default)]
    pub vtx: Vec<Transaction>,
    /// True when more (older) data is still queryable
    #[serde(default)]
    pub prev: Option<bool>,
}

impl RawTransactionsResponse {
    /// Build a successful response from a page of records
    pub fn page(vtx: Vec<Transaction>, prev: bool) -> Self {
        Self {
            error: None,
            data: Some(RawTransactionPage {
                vtx,
                prev: Some(prev),
            }),
        }
    }

    /// Build an error response
    pub fn remote_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn tx(value: Value) -> Transaction {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_deserialize_keeps_type_named_field() {
        let t = tx(json!({
            "id": "102",
            "time": "2016-03-09T11:26:11.629Z",
            "type": "sell",
            "amount": "-0.01",
            "sell": "99",
            "symbol": "BTC"
        }));
        assert_eq!(t.id, "102");
        assert_eq!(t.tx_type, "sell");
        assert_eq!(t.amount, dec!(-0.01));
        assert_eq!(t.field("sell"), Some("99"));
        assert_eq!(t.field("symbol"), Some("BTC"));
        assert_eq!(t.field("order"), None);
    }

    #[test]
    fn test_owning_order_prefers_type_named_field() {
        let t = tx(json!({
            "id": "1",
            "time": "2020-01-01T00:00:00.000Z",
            "type": "sell",
            "amount": "1.5",
            "sell": "42",
            "order": "7"
        }));
        assert_eq!(t.owning_order_id(), Some("42"));
    }

    #[test]
    fn test_owning_order_falls_back_to_order_field() {
        // spec row: {type:'sell', order:'5', amount:-10} resolves via `order`
        // because there is no non-empty `sell` field
        let t = tx(json!({
            "id": "1",
            "time": "2020-01-01T00:00:00.000Z",
            "type": "sell",
            "amount": "-10",
            "order": "5"
        }));
        assert_eq!(t.owning_order_id(), Some("5"));
    }

    #[test]
    fn test_empty_type_named_field_falls_back() {
        let t = tx(json!({
            "id": "1",
            "time": "2020-01-01T00:00:00.000Z",
            "type": "buy",
            "amount": "1",
            "buy": "",
            "order": "13"
        }));
        assert_eq!(t.owning_order_id(), Some("13"));
    }

    #[test]
    fn test_classify_hold_wins_over_raw_type() {
        let t = tx(json!({
            "id": "1",
            "time": "2020-01-01T00:00:00.000Z",
            "type": "sell",
            "amount": "-10",
            "order": "5"
        }));
        assert_eq!(t.classify().unwrap(), TransactionKind::Hold);
        assert!(t.is_non_deal().unwrap());
    }

    #[test]
    fn test_classify_cancel_is_return() {
        let t = tx(json!({
            "id": "1",
            "time": "2020-01-01T00:00:00.000Z",
            "type": "cancel",
            "amount": "10"
        }));
        assert_eq!(t.classify().unwrap(), TransactionKind::Return);
    }

    #[test]
    fn test_classify_buy_and_sell() {
        let buy = tx(json!({
            "id": "1", "time": "2020-01-01T00:00:00.000Z",
            "type": "buy", "amount": "1"
        }));
        let sell = tx(json!({
            "id": "2", "time": "2020-01-01T00:00:00.000Z",
            "type": "sell", "amount": "1"
        }));
        assert_eq!(buy.classify().unwrap(), TransactionKind::Buy);
        assert_eq!(sell.classify().unwrap(), TransactionKind::Sell);
        assert!(!buy.is_non_deal().unwrap());
    }

    #[test]
    fn test_classify_unknown_type_errors() {
        let t = tx(json!({
            "id": "1",
            "time": "2020-01-01T00:00:00.000Z",
            "type": "teleport",
            "amount": "1"
        }));
        let err = t.classify().unwrap_err();
        assert!(matches!(err, CexError::UnknownTransactionType { .. }));
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn test_cursor_time_has_millisecond_precision() {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        assert_eq!(Transaction::format_time(&epoch), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_envelope_defaults() {
        let res: RawTransactionsResponse = serde_json::from_str("{}").unwrap();
        assert!(res.error.is_none());
        assert!(res.data.is_none());

        let res: RawTransactionsResponse =
            serde_json::from_value(json!({"data": {}})).unwrap();
        let page = res.data.unwrap();
        assert!(page.vtx.is_empty());
        assert!(page.prev.is_none());
    }
}
