//! `SeaORM` entity definitions.
//!
//! Columns mirror the migration one to one.

#![allow(missing_docs)]

pub mod catalog_items;
pub mod coin_transfers;
pub mod employees;
pub mod purchases;
