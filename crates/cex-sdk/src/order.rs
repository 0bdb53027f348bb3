//! Order-scoped view over the transaction stream
//!
//! Narrows the full transaction history down to the trade transactions of
//! one order. The server-side part of the narrowing (`type = trade`,
//! `start = order creation time`) goes into the stream's filters; the rest
//! is a lazy per-record predicate on the owning order id.

use cex_types::{CexResult, Transaction, TransactionFilters, TransactionTypeFilter};

use crate::source::TransactionSource;
use crate::stream::TransactionStream;

/// Lazy sequence of the trade transactions belonging to one order
///
/// All stream mechanics (paging, restart, hooks, limit) are inherited from
/// the wrapped [`TransactionStream`], reachable via [`stream`](Self::stream)
/// and [`stream_mut`](Self::stream_mut).
///
/// # Example
///
/// ```no_run
/// use cex_sdk::prelude::*;
///
/// # async fn example(client: CexClient) -> CexResult<()> {
/// let mut trades = client.order_transactions("17234872", 1_457_521_571);
/// while let Some(tx) = trades.next_record().await? {
///     println!("fill: {} {}", tx.id, tx.amount);
/// }
/// # Ok(())
/// # }
/// ```
pub struct OrderTransactions<S> {
    stream: TransactionStream<S>,
    order_id: String,
}

impl<S> OrderTransactions<S> {
    /// Create a view over `source` for the order with the given id and
    /// creation time (seconds since the epoch)
    pub fn new(source: S, order_id: impl Into<String>, created_at_secs: i64) -> Self {
        let filters = TransactionFilters::new()
            .with_start(created_at_secs)
            .with_type(TransactionTypeFilter::Trade);

        Self {
            stream: TransactionStream::new(source, filters),
            order_id: order_id.into(),
        }
    }

    /// Id of the order this view is scoped to
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// The wrapped stream
    pub fn stream(&self) -> &TransactionStream<S> {
        &self.stream
    }

    /// The wrapped stream, mutable (hooks, limit)
    pub fn stream_mut(&mut self) -> &mut TransactionStream<S> {
        &mut self.stream
    }

    fn accept(&self, tx: &Transaction) -> bool {
        tx.owning_order_id() == Some(self.order_id.as_str())
    }
}

impl<S: TransactionSource> OrderTransactions<S> {
    /// Pull the next transaction belonging to the order
    ///
    /// Skips over other orders' transactions, fetching further pages as
    /// needed; `Ok(None)` once the underlying stream is exhausted.
    pub async fn next_record(&mut self) -> CexResult<Option<Transaction>> {
        while let Some(tx) = self.stream.next_record().await? {
            if self.accept(&tx) {
                return Ok(Some(tx));
            }
        }
        Ok(None)
    }

    /// Restart the underlying stream
    pub async fn rewind(&mut self) -> CexResult<()> {
        self.stream.rewind().await
    }

    /// Drain the remaining matching transactions into a vector
    pub async fn collect_remaining(&mut self) -> CexResult<Vec<Transaction>> {
        let mut records = Vec::new();
        while let Some(tx) = self.next_record().await? {
            records.push(tx);
        }
        Ok(records)
    }
}

impl<S> std::fmt::Debug for OrderTransactions<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderTransactions")
            .field("order_id", &self.order_id)
            .field("stream", &self.stream)
            .finish()
    }
}
