//! Account store: balance reads and writes inside a unit of work.
//!
//! Every method takes the open `DatabaseTransaction`, so balances can only be
//! touched from inside [`LedgerRepository::in_unit_of_work`].
//!
//! [`LedgerRepository::in_unit_of_work`]: super::ledger::LedgerRepository::in_unit_of_work

use sea_orm::{
    ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};

use merchcoin_core::ledger::{AccountSnapshot, LedgerError};

use crate::entities::employees;
use crate::error::classify_db_error;

/// Row-locking access to employee balances.
#[derive(Debug, Clone, Copy)]
pub struct AccountStore<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> AccountStore<'a> {
    /// Creates an account store bound to an open transaction.
    #[must_use]
    pub const fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Reads one balance and holds its row lock until the transaction ends.
    ///
    /// Returns `None` if the employee does not exist.
    ///
    /// # Errors
    ///
    /// Returns a classified storage error if the query fails or the lock wait
    /// times out.
    pub async fn get_balance_for_update(
        &self,
        username: &str,
    ) -> Result<Option<AccountSnapshot>, LedgerError> {
        let mut locked = self.lock_accounts(&[username]).await?;
        Ok(locked.pop())
    }

    /// Locks every named row in one statement, in username order.
    ///
    /// Two transfers touching the same pair always lock in the same order, so
    /// they queue behind each other instead of deadlocking. Missing employees
    /// are simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns a classified storage error if the query fails or the lock wait
    /// times out.
    pub async fn lock_accounts(
        &self,
        usernames: &[&str],
    ) -> Result<Vec<AccountSnapshot>, LedgerError> {
        let rows = employees::Entity::find()
            .filter(employees::Column::Username.is_in(usernames.iter().copied()))
            .order_by_asc(employees::Column::Username)
            .lock_exclusive()
            .all(self.txn)
            .await
            .map_err(classify_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| AccountSnapshot {
                username: row.username,
                balance: row.balance,
            })
            .collect())
    }

    /// Returns true if the employee exists.
    ///
    /// # Errors
    ///
    /// Returns a classified storage error if the query fails.
    pub async fn exists(&self, username: &str) -> Result<bool, LedgerError> {
        let row = employees::Entity::find_by_id(username.to_string())
            .one(self.txn)
            .await
            .map_err(classify_db_error)?;
        Ok(row.is_some())
    }

    /// Applies a signed delta to a balance.
    ///
    /// The update is guarded by `balance >= -delta`, so it cannot overdraw the
    /// account even if the caller's snapshot is stale.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InsufficientFunds` if the guard rejects the
    /// update, `LedgerError::InvariantViolation` if the employee does not
    /// exist, or a classified storage error.
    pub async fn adjust_balance(&self, username: &str, delta: i64) -> Result<(), LedgerError> {
        let result = employees::Entity::update_many()
            .col_expr(
                employees::Column::Balance,
                Expr::col(employees::Column::Balance).add(delta),
            )
            .filter(employees::Column::Username.eq(username))
            .filter(employees::Column::Balance.gte(delta.saturating_neg()))
            .exec(self.txn)
            .await
            .map_err(classify_db_error)?;

        if result.rows_affected == 1 {
            return Ok(());
        }

        let current = employees::Entity::find_by_id(username.to_string())
            .one(self.txn)
            .await
            .map_err(classify_db_error)?;

        Err(match current {
            Some(row) => LedgerError::InsufficientFunds {
                username: username.to_string(),
                balance: row.balance,
                requested: delta.saturating_neg(),
            },
            None => LedgerError::InvariantViolation(format!(
                "balance adjustment for missing account {username}"
            )),
        })
    }
}
