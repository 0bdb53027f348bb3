//! Transaction history filters and the wire-level query they produce
//!
//! User-facing time bounds are taken in seconds and normalized to the
//! remote's millisecond units at construction; the continuation flag is
//! always serialized as an integer. Both rules come from the remote
//! endpoint's parameter contract.

use serde::Serialize;

use crate::enums::TransactionTypeFilter;

/// Milliseconds per second, the remote's time unit scale
const MS_PER_SEC: i64 = 1_000;

/// Normalized filter set for a transaction stream
///
/// # Example
///
/// ```
/// use cex_types::{TransactionFilters, TransactionTypeFilter};
///
/// let filters = TransactionFilters::new()
///     .with_start(1_457_521_571)
///     .with_type(TransactionTypeFilter::Trade);
/// assert_eq!(filters.start_ms(), Some(1_457_521_571_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilters {
    start_ms: Option<i64>,
    end_ms: Option<i64>,
    kind: Option<TransactionTypeFilter>,
}

impl TransactionFilters {
    /// Create an empty filter set (no bounds, all types)
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower time bound, in seconds since the epoch
    pub fn with_start(mut self, secs: i64) -> Self {
        self.start_ms = Some(secs * MS_PER_SEC);
        self
    }

    /// Upper time bound, in seconds since the epoch
    pub fn with_end(mut self, secs: i64) -> Self {
        self.end_ms = Some(secs * MS_PER_SEC);
        self
    }

    /// Restrict to one server-side transaction type group
    pub fn with_type(mut self, kind: TransactionTypeFilter) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Lower bound in remote units (milliseconds)
    pub fn start_ms(&self) -> Option<i64> {
        self.start_ms
    }

    /// Upper bound in remote units (milliseconds)
    pub fn end_ms(&self) -> Option<i64> {
        self.end_ms
    }

    /// Selected type group, if any
    pub fn type_filter(&self) -> Option<TransactionTypeFilter> {
        self.kind
    }

    /// Build the wire query for one fetch with the given page limit
    pub fn to_query(&self, limit: u32) -> TransactionQuery {
        TransactionQuery {
            limit,
            start: self.start_ms,
            end: self.end_ms,
            kind: self.kind,
            txid: None,
            time: None,
            prev: None,
        }
    }
}

/// Complete parameter set sent with one `raw_tx_history` fetch
///
/// `txid`/`time`/`prev` are the pagination continuation fields; `prev` is
/// an integer flag on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionQuery {
    /// Page size cap, also the unit of internal buffering
    pub limit: u32,
    /// Lower time bound in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// Upper time bound in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    /// Server-side type group
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionTypeFilter>,
    /// Continuation cursor: transaction id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
    /// Continuation cursor: transaction timestamp, RFC3339 with milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Continuation flag (`1` = an older page is queryable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<u8>,
}

impl TransactionQuery {
    /// Attach a continuation cursor to this query
    pub fn with_cursor(mut self, txid: impl Into<String>, time: impl Into<String>) -> Self {
        self.txid = Some(txid.into());
        self.time = Some(time.into());
        self.prev = Some(1);
        self
    }
}
