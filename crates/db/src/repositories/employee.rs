//! Employee repository for registration and balance reads.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use merchcoin_core::ledger::{AccountSnapshot, total_supply};

use crate::entities::employees;
use crate::error::is_unique_violation;

/// Result of a register-if-absent call.
#[derive(Debug, Clone)]
pub enum Registration {
    /// The employee row was inserted by this call.
    Created(employees::Model),
    /// Another request registered the same username first.
    Existing(employees::Model),
}

/// Employee repository.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    db: DatabaseConnection,
}

impl EmployeeRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an employee by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<employees::Model>, DbErr> {
        employees::Entity::find_by_id(username.to_string())
            .one(&self.db)
            .await
    }

    /// Inserts a new employee with the given opening balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including when the username is
    /// already taken.
    pub async fn register(
        &self,
        username: &str,
        password_hash: &str,
        starting_balance: i64,
    ) -> Result<employees::Model, DbErr> {
        employees::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash.to_string()),
            balance: Set(starting_balance),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    /// Registers the employee unless the username already exists.
    ///
    /// Two first logins for one username can race; the loser sees a unique
    /// violation and gets the winner's row back.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails for any other reason, or if the
    /// conflicting row cannot be read back.
    pub async fn register_if_absent(
        &self,
        username: &str,
        password_hash: &str,
        starting_balance: i64,
    ) -> Result<Registration, DbErr> {
        match self.register(username, password_hash, starting_balance).await {
            Ok(model) => Ok(Registration::Created(model)),
            Err(err) if is_unique_violation(&err) => self
                .find_by_username(username)
                .await?
                .map(Registration::Existing)
                .ok_or_else(|| DbErr::RecordNotFound(username.to_string())),
            Err(err) => Err(err),
        }
    }

    /// Returns the current balance, or `None` for an unknown employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn balance_of(&self, username: &str) -> Result<Option<i64>, DbErr> {
        Ok(self.find_by_username(username).await?.map(|e| e.balance))
    }

    /// Lists every balance, sorted by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn all_balances(&self) -> Result<Vec<AccountSnapshot>, DbErr> {
        let rows = employees::Entity::find()
            .order_by_asc(employees::Column::Username)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|e| AccountSnapshot {
                username: e.username,
                balance: e.balance,
            })
            .collect())
    }

    /// Sums every balance. Constant across transfers; redemptions lower it.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn total_supply(&self) -> Result<i128, DbErr> {
        let balances = self.all_balances().await?;
        Ok(total_supply(balances.iter().map(|a| a.balance)))
    }
}
