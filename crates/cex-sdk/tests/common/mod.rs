//! Shared fixtures for integration tests

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use cex_sdk::prelude::*;
use serde_json::json;

/// Install a test subscriber so `RUST_LOG`-style filtering works in tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cex_sdk=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Scripted transaction source
///
/// Hands out pre-built responses in order and records every query it
/// receives. Fetching past the script panics, which doubles as an
/// assertion that no extra fetch was issued.
pub struct MockSource {
    responses: Mutex<VecDeque<CexResult<RawTransactionsResponse>>>,
    queries: Mutex<Vec<TransactionQuery>>,
}

impl MockSource {
    pub fn new(
        responses: impl IntoIterator<Item = CexResult<RawTransactionsResponse>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            queries: Mutex::new(Vec::new()),
        })
    }

    /// Queries received so far, oldest first
    pub fn queries(&self) -> Vec<TransactionQuery> {
        self.queries.lock().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.queries.lock().len()
    }
}

#[async_trait]
impl TransactionSource for MockSource {
    async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> CexResult<RawTransactionsResponse> {
        self.queries.lock().push(query.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected fetch: {:?}", query))
    }
}

/// A buy transaction with the given id
pub fn tx(id: &str) -> Transaction {
    serde_json::from_value(json!({
        "id": id,
        "time": format!("2020-01-01T00:00:{:02}.000Z", id.parse::<u64>().unwrap_or(0) % 60),
        "type": "buy",
        "amount": "1",
    }))
    .unwrap()
}

/// A trade transaction attributed to `order` via its type-named field
pub fn trade_tx(id: &str, side: &str, order: &str) -> Transaction {
    serde_json::from_value(json!({
        "id": id,
        "time": "2020-01-01T00:00:00.000Z",
        "type": side,
        "amount": "1",
        side: order,
    }))
    .unwrap()
}

/// A page response in the remote's native newest-first order
pub fn page(ids_newest_first: &[&str], prev: bool) -> CexResult<RawTransactionsResponse> {
    Ok(RawTransactionsResponse::page(
        ids_newest_first.iter().map(|id| tx(id)).collect(),
        prev,
    ))
}

pub fn ids(records: &[Transaction]) -> Vec<String> {
    records.iter().map(|tx| tx.id.clone()).collect()
}
