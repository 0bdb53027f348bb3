//! The remote transaction source contract
//!
//! The pagination engine never talks HTTP directly; it pulls pages through
//! this trait. [`CexClient`](crate::client::CexClient) implements it over
//! the `raw_tx_history` endpoint, and tests implement it with scripted
//! responses.

use async_trait::async_trait;
use cex_types::{CexResult, RawTransactionsResponse, TransactionQuery};

/// A remote source of transaction-history pages
///
/// One call fetches one page of transactions matching `query`, or signals
/// an API error through the response envelope (transport failures surface
/// as `Err`). Implementations must not paginate on their own; cursor state
/// belongs to the [`TransactionStream`](crate::stream::TransactionStream).
#[async_trait]
pub trait TransactionSource {
    /// Fetch one page of transactions matching the given query
    async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> CexResult<RawTransactionsResponse>;
}

#[async_trait]
impl<S: TransactionSource + Sync> TransactionSource for &S {
    async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> CexResult<RawTransactionsResponse> {
        (**self).fetch_transactions(query).await
    }
}

#[async_trait]
impl<S: TransactionSource + Send + Sync> TransactionSource for std::sync::Arc<S> {
    async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> CexResult<RawTransactionsResponse> {
        (**self).fetch_transactions(query).await
    }
}
