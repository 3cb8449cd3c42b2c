//! Core business logic for Merchcoin.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage adapters feed it account snapshots; it decides whether a transfer
//! or redemption may proceed and what the balances become.
//!
//! # Modules
//!
//! - `ledger` - Coin transfers, redemptions, and their error taxonomy
//! - `auth` - Credential checks and password hashing

pub mod auth;
pub mod ledger;
