//! Ledger domain types for transfers and redemptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A request to move coins between two employees.
///
/// `sender` is always the authenticated principal; it is never read from the
/// request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Authenticated sender username.
    pub sender: String,
    /// Receiver username as supplied by the caller.
    pub receiver: String,
    /// Coins to move.
    pub amount: i64,
}

impl TransferRequest {
    /// Creates a transfer request.
    #[must_use]
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: i64) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
        }
    }
}

/// A request to redeem coins for a catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionRequest {
    /// Authenticated buyer username.
    pub buyer: String,
    /// Catalog item name.
    pub item: String,
}

impl RedemptionRequest {
    /// Creates a redemption request.
    #[must_use]
    pub fn new(buyer: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            buyer: buyer.into(),
            item: item.into(),
        }
    }
}

/// An account balance as read under lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Employee username.
    pub username: String,
    /// Balance in coins.
    pub balance: i64,
}

/// The outcome of planning a transfer against locked snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    /// Sender username.
    pub sender: String,
    /// Receiver username.
    pub receiver: String,
    /// Coins moved.
    pub amount: i64,
    /// Sender balance once the transfer commits.
    pub sender_balance_after: i64,
    /// Receiver balance once the transfer commits.
    pub receiver_balance_after: i64,
}

/// The outcome of planning a redemption against a locked snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionPlan {
    /// Buyer username.
    pub buyer: String,
    /// Catalog item name.
    pub item: String,
    /// Price paid.
    pub price: i64,
    /// Buyer balance once the redemption commits.
    pub balance_after: i64,
}

/// A committed transfer as recorded in the transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Sender username.
    pub from: String,
    /// Receiver username.
    pub to: String,
    /// Coins moved.
    pub amount: i64,
    /// Commit timestamp.
    pub created_at: DateTime<Utc>,
}
