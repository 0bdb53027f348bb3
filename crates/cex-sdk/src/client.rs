//! REST client for the CEX.io API
//!
//! All calls are form-encoded POSTs. Private calls prepend the API key,
//! an HMAC-SHA256 signature, and a strictly increasing nonce to the body;
//! the nonce counter is per-client state shared by clones, so a clone never
//! reuses or rewinds the sequence.

use cex_auth::Credentials;
use cex_types::{
    currency, AccountBalance, CexError, CexResult, MarketOrderResult, Order, OrderBook, OrderSide,
    PlacedOrder, RawTransactionsResponse, Ticker, TradeHistoryEntry, TransactionFilters,
    TransactionQuery,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument};

use crate::builder::CexClientBuilder;
use crate::order::OrderTransactions;
use crate::source::TransactionSource;
use crate::stream::TransactionStream;

const NO_PARAMS: [(&str, &str); 0] = [];

/// Client for the CEX.io REST API
///
/// Cheap to clone; clones share the HTTP connection pool and the nonce
/// counter.
///
/// # Example
///
/// ```no_run
/// use cex_sdk::prelude::*;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CexClient::builder()
///     .with_credentials(Credentials::from_env()?)
///     .build()?;
///
/// let ticker = client.ticker("BTC/USD").await?;
/// println!("last: {}", ticker.last);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CexClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
    /// Nonce state for private calls; per client, not process-global
    nonce: Arc<AtomicU64>,
}

impl CexClient {
    /// Create a client builder
    pub fn builder() -> CexClientBuilder {
        CexClientBuilder::new()
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        base_url: String,
        credentials: Option<Credentials>,
    ) -> Self {
        // Seed the nonce from the clock in centiseconds so a fresh client
        // starts above any nonce a previous process used
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64 / 10)
            .unwrap_or(0);

        Self {
            http,
            base_url,
            credentials,
            nonce: Arc::new(AtomicU64::new(seed)),
        }
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True when the client can call private endpoints
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    // === Public endpoints ===

    /// Current ticker for a pair
    #[instrument(skip(self))]
    pub async fn ticker(&self, pair: &str) -> CexResult<Ticker> {
        self.public_call("ticker", &NO_PARAMS, Some(pair)).await
    }

    /// Current bids and asks for a pair
    #[instrument(skip(self))]
    pub async fn order_book(&self, pair: &str) -> CexResult<OrderBook> {
        self.public_call("order_book", &NO_PARAMS, Some(pair)).await
    }

    /// Recent public trades for a pair, optionally only those after `since`
    pub async fn trade_history(
        &self,
        pair: &str,
        since: Option<u64>,
    ) -> CexResult<Vec<TradeHistoryEntry>> {
        #[derive(Serialize)]
        struct Params {
            #[serde(skip_serializing_if = "Option::is_none")]
            since: Option<u64>,
        }
        self.public_call("trade_history", &Params { since }, Some(pair))
            .await
    }

    // === Private endpoints ===

    /// Current account balance
    #[instrument(skip(self))]
    pub async fn balance(&self) -> CexResult<AccountBalance> {
        self.private_call("balance", &NO_PARAMS, None).await
    }

    /// Open orders for a pair
    pub async fn open_orders(&self, pair: &str) -> CexResult<Vec<Order>> {
        self.private_call("open_orders", &NO_PARAMS, Some(pair))
            .await
    }

    /// Archived (closed) orders for a pair
    pub async fn archived_orders(&self, pair: &str) -> CexResult<Vec<Order>> {
        self.private_call("archived_orders", &NO_PARAMS, Some(pair))
            .await
    }

    /// Order details by id
    pub async fn get_order(&self, order_id: &str) -> CexResult<Order> {
        self.private_call("get_order", &[("id", order_id)], None)
            .await
    }

    /// Cancel an order by id; returns whether the remote accepted
    pub async fn cancel_order(&self, order_id: &str) -> CexResult<bool> {
        self.private_call("cancel_order", &[("id", order_id)], None)
            .await
    }

    /// Place a limit order
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        side: OrderSide,
        amount: Decimal,
        price: Decimal,
        pair: &str,
    ) -> CexResult<PlacedOrder> {
        #[derive(Serialize)]
        struct Params {
            #[serde(rename = "type")]
            side: OrderSide,
            amount: Decimal,
            price: Decimal,
        }
        self.private_call("place_order", &Params { side, amount, price }, Some(pair))
            .await
    }

    /// Place a market order
    ///
    /// On success the two symbol amounts are rescaled from raw remote
    /// units via the currency profiles.
    #[instrument(skip(self))]
    pub async fn place_market_order(
        &self,
        side: OrderSide,
        amount: Decimal,
        pair: &str,
    ) -> CexResult<MarketOrderResult> {
        #[derive(Serialize)]
        struct Params {
            #[serde(rename = "type")]
            side: OrderSide,
            amount: Decimal,
            order_type: &'static str,
        }
        let result: MarketOrderResult = self
            .private_call(
                "place_order",
                &Params {
                    side,
                    amount,
                    order_type: "market",
                },
                Some(pair),
            )
            .await?;

        Ok(format_market_amounts(pair, result))
    }

    /// One raw page of transaction history matching `query`
    ///
    /// Unlike the other private calls this returns the full envelope,
    /// error string included; the transaction stream owns the error
    /// handling for its fetches.
    #[instrument(skip(self, query), fields(limit = query.limit, txid = ?query.txid))]
    pub async fn raw_transactions(
        &self,
        query: &TransactionQuery,
    ) -> CexResult<RawTransactionsResponse> {
        let value = self.private_post("raw_tx_history", query, None).await?;
        serde_json::from_value(value).map_err(CexError::parse)
    }

    // === Iterators ===

    /// Lazy stream over the account's transaction history
    pub fn transactions(&self, filters: TransactionFilters) -> TransactionStream<CexClient> {
        TransactionStream::new(self.clone(), filters)
    }

    /// Lazy stream over one order's trade transactions
    pub fn order_transactions(
        &self,
        order_id: impl Into<String>,
        created_at_secs: i64,
    ) -> OrderTransactions<CexClient> {
        OrderTransactions::new(self.clone(), order_id, created_at_secs)
    }

    // === Plumbing ===

    fn url(&self, method: &str, pair: Option<&str>) -> String {
        let mut url = format!("{}/api/{}/", self.base_url, method);
        if let Some(pair) = pair {
            url.push_str(pair);
            url.push('/');
        }
        url
    }

    fn next_nonce(&self) -> String {
        self.nonce.fetch_add(1, Ordering::SeqCst).to_string()
    }

    async fn public_call<P: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
        pair: Option<&str>,
    ) -> CexResult<T> {
        let body = serde_urlencoded::to_string(params).map_err(CexError::parse)?;
        let value = self.post_form(method, pair, body).await?;
        decode(value)
    }

    async fn private_call<P: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
        pair: Option<&str>,
    ) -> CexResult<T> {
        let value = self.private_post(method, params, pair).await?;
        decode(value)
    }

    async fn private_post<P: Serialize + ?Sized>(
        &self,
        method: &str,
        params: &P,
        pair: Option<&str>,
    ) -> CexResult<Value> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| CexError::MissingCredentials {
                endpoint: method.to_string(),
            })?;

        let nonce = self.next_nonce();
        let signature = credentials.sign(&nonce);
        let auth = [
            ("key", credentials.api_key()),
            ("signature", signature.as_str()),
            ("nonce", nonce.as_str()),
        ];

        let mut body = serde_urlencoded::to_string(auth).map_err(CexError::parse)?;
        let extra = serde_urlencoded::to_string(params).map_err(CexError::parse)?;
        if !extra.is_empty() {
            body.push('&');
            body.push_str(&extra);
        }

        self.post_form(method, pair, body).await
    }

    async fn post_form(&self, method: &str, pair: Option<&str>, body: String) -> CexResult<Value> {
        let url = self.url(method, pair);
        debug!(%url, "sending request");

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(CexError::transport)?;

        response.json().await.map_err(CexError::parse)
    }
}

impl std::fmt::Debug for CexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CexClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

#[async_trait]
impl TransactionSource for CexClient {
    async fn fetch_transactions(
        &self,
        query: &TransactionQuery,
    ) -> CexResult<RawTransactionsResponse> {
        self.raw_transactions(query).await
    }
}

/// Decode a one-shot response, surfacing the remote's `error` field
fn decode<T: DeserializeOwned>(value: Value) -> CexResult<T> {
    if let Some(message) = value.get("error").and_then(Value::as_str) {
        if !message.is_empty() {
            return Err(CexError::remote_fetch(message));
        }
    }
    serde_json::from_value(value).map_err(CexError::parse)
}

/// Rescale the two symbol amounts of a market order result
fn format_market_amounts(pair: &str, mut result: MarketOrderResult) -> MarketOrderResult {
    let mut symbols = pair.split('/');
    if let Some(symbol1) = symbols.next() {
        result.symbol1_amount = currency::format_amount(symbol1, result.symbol1_amount);
    }
    if let Some(symbol2) = symbols.next() {
        result.symbol2_amount = currency::format_amount(symbol2, result.symbol2_amount);
    }
    result
}
