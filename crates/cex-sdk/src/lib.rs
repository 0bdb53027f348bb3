//! High-level SDK for the CEX.io REST API
//!
//! This crate provides an ergonomic client for CEX.io's public and private
//! REST endpoints, plus a lazy pagination engine over the account's
//! transaction history: the reverse-chronological, cursor-paginated
//! `raw_tx_history` endpoint is exposed as a uniform forward sequence with
//! restart, page-transform hooks, and an order-scoped filtered view.
//!
//! # Quick Start
//!
//! ```no_run
//! use cex_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CexClient::builder()
//!         .with_credentials(Credentials::from_env()?)
//!         .build()?;
//!
//!     // One-shot calls
//!     let ticker = client.ticker("BTC/USD").await?;
//!     println!("BTC/USD last: {}", ticker.last);
//!
//!     // Walk the whole trade history, page by page, lazily
//!     let filters = TransactionFilters::new().with_type(TransactionTypeFilter::Trade);
//!     let mut stream = client.transactions(filters);
//!     while let Some(tx) = stream.next_record().await? {
//!         println!("{}: {} {}", tx.id, tx.tx_type, tx.amount);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - **Lazy pagination**: one fetch per page, cursor state managed for you
//! - **Restartable**: rewind or swap filters at any point
//! - **Extensible**: page-transform hooks can drop or enrich records
//!   before they reach the consumer
//! - **Order-scoped views**: iterate just one order's trade transactions
//! - **Typed errors**: remote error strings, classification failures, and
//!   transport problems are distinct variants

pub mod builder;
pub mod client;
pub mod hooks;
pub mod order;
pub mod prelude;
pub mod source;
pub mod stream;

// Re-export main types
pub use builder::CexClientBuilder;
pub use client::CexClient;
pub use hooks::PageHooks;
pub use order::OrderTransactions;
pub use source::TransactionSource;
pub use stream::TransactionStream;

// Re-export commonly used types from dependencies
pub use cex_auth::Credentials;
pub use cex_types::{
    CexError, CexResult, Transaction, TransactionFilters, TransactionKind, TransactionTypeFilter,
};
