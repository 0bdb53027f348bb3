//! Re-exports for convenience
//!
//! Import everything you need with:
//! ```
//! use cex_sdk::prelude::*;
//! ```

// Client
pub use crate::builder::{CexClientBuilder, ConfigError};
pub use crate::client::CexClient;

// Pagination engine
pub use crate::hooks::{HookId, PageHooks, PageTransform};
pub use crate::order::OrderTransactions;
pub use crate::source::TransactionSource;
pub use crate::stream::{TransactionStream, DEFAULT_PAGE_LIMIT};

// Types from cex-types
pub use cex_types::{
    AccountBalance, CexError, CexResult, CurrencyBalance, MarketOrderResult, Order, OrderBook,
    OrderSide, PlacedOrder, RawTransactionPage, RawTransactionsResponse, Ticker,
    TradeHistoryEntry, Transaction, TransactionFilters, TransactionKind, TransactionQuery,
    TransactionTypeFilter,
};

// Auth
pub use cex_auth::{AuthError, Credentials};

// Decimal for prices/amounts
pub use rust_decimal::Decimal;
