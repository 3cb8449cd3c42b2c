//! Coin ledger logic.
//!
//! This module implements the pure part of the ledger:
//! - Error taxonomy shared by every layer
//! - Request, snapshot, and plan types
//! - Fail-fast validation rules
//! - Non-negative balance arithmetic
//! - Ledger service that turns locked snapshots into transfer plans

pub mod balance;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use balance::{apply_delta, total_supply};
pub use error::{ErrorClass, LedgerError};
pub use service::LedgerService;
pub use types::{
    AccountSnapshot, RedemptionPlan, RedemptionRequest, TransferPlan, TransferRecord,
    TransferRequest,
};
