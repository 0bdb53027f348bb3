//! Side, transaction group, and semantic kind enums

use serde::{Deserialize, Serialize};

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Returns the side name as used in API requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// Server-side transaction type groups accepted by the transaction
/// history endpoint's `type` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionTypeFilter {
    /// Trade executions: buy, sell, cancel
    Trade,
    /// Mining income and maintenance fees
    Mining,
    /// Deposits
    Deposit,
    /// Withdrawals
    Withdraw,
}

impl TransactionTypeFilter {
    /// Returns the filter value as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trade => "trade",
            Self::Mining => "mining",
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }
}

/// Semantic kind of a transaction, resolved by
/// [`Transaction::classify`](crate::Transaction::classify)
///
/// Separates balance-affecting holds/returns from actual trade executions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    /// Funds reserved against an open order
    Hold,
    /// Funds returned after a cancel
    Return,
    /// Buy execution
    Buy,
    /// Sell execution
    Sell,
}

impl TransactionKind {
    /// Returns true for transactions that hold funds on the balance or
    /// return them, rather than executing a deal
    pub fn is_non_deal(&self) -> bool {
        matches!(self, Self::Hold | Self::Return)
    }
}
