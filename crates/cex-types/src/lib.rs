//! Shared types for the CEX.io REST API
//!
//! This crate provides the core type definitions used across the CEX.io
//! SDK. It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Transaction`] - A transaction-history record with classification
//! - [`TransactionKind`] - Semantic kind (hold/return/buy/sell)
//! - [`TransactionFilters`], [`TransactionQuery`] - History filters and the
//!   wire query one fetch sends
//! - [`RawTransactionsResponse`] - Envelope of one history page
//! - [`OrderSide`], [`TransactionTypeFilter`] - Request enums
//! - [`CexError`] - Error types

pub mod currency;
pub mod enums;
pub mod error;
pub mod filters;
pub mod models;
pub mod transaction;

// Re-export commonly used types
pub use enums::*;
pub use error::*;
pub use filters::*;
pub use models::*;
pub use transaction::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
