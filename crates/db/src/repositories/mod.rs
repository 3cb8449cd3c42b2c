//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Balance writes only happen through [`LedgerRepository`], inside a unit of
//! work; everything else here is a read or an append.

pub mod account_store;
pub mod catalog;
pub mod employee;
pub mod ledger;
pub mod purchase_log;
pub mod transaction_log;

pub use account_store::AccountStore;
pub use catalog::Catalog;
pub use employee::{EmployeeRepository, Registration};
pub use ledger::{LedgerRepository, LedgerSettings, UnitOfWork};
pub use purchase_log::{InventoryItem, PurchaseLog};
pub use transaction_log::{CoinHistory, TransactionLog};
