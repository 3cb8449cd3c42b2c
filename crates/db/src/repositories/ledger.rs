//! Ledger repository: the unit of work and the balance-moving operations.
//!
//! A transfer locks both account rows in username order, re-validates against
//! the locked balances, applies two guarded updates, and appends to the
//! transaction log, all inside one database transaction. Nothing is visible to
//! other readers until the commit.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, TransactionTrait,
};
use tracing::{debug, error, info, warn};

use merchcoin_core::ledger::{
    ErrorClass, LedgerError, LedgerService, RedemptionPlan, RedemptionRequest, TransferRecord,
    TransferRequest,
};
use merchcoin_shared::LedgerConfig;

use super::account_store::AccountStore;
use super::catalog::Catalog;
use super::purchase_log::PurchaseLog;
use super::transaction_log::TransactionLog;
use crate::error::classify_db_error;

/// Boxed future returned by a unit-of-work body.
pub type UnitOfWork<'c, T> = Pin<Box<dyn Future<Output = Result<T, LedgerError>> + Send + 'c>>;

/// Timing bounds for a unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSettings {
    /// Longest a statement may wait for a row lock (Postgres only).
    pub lock_timeout: Duration,
    /// Deadline for the whole unit of work, commit excluded.
    pub request_timeout: Duration,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self::from(&LedgerConfig::default())
    }
}

impl From<&LedgerConfig> for LedgerSettings {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            lock_timeout: config.lock_timeout(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// Ledger repository.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
    settings: LedgerSettings,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, settings: LedgerSettings) -> Self {
        Self { db, settings }
    }

    /// Returns the underlying connection for read-side queries.
    #[must_use]
    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Runs `work` inside one database transaction.
    ///
    /// Commits if `work` returns `Ok`. On `Err`, or when the deadline passes,
    /// the transaction is rolled back before this returns, so no partial
    /// effect is ever left behind. An expired deadline is reported as
    /// `LedgerError::StorageContention`.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, a contention error on timeout, or
    /// a classified storage error if begin or commit fails.
    pub async fn in_unit_of_work<T, F>(&self, work: F) -> Result<T, LedgerError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> UnitOfWork<'c, T> + Send,
    {
        let txn = self.db.begin().await.map_err(classify_db_error)?;
        let lock_timeout = self.settings.lock_timeout;

        let outcome = tokio::time::timeout(self.settings.request_timeout, async {
            apply_lock_timeout(&txn, lock_timeout).await?;
            work(&txn).await
        })
        .await;

        match outcome {
            Ok(Ok(value)) => {
                txn.commit().await.map_err(classify_db_error)?;
                Ok(value)
            }
            Ok(Err(err)) => {
                rollback(txn).await;
                Err(err)
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.settings.request_timeout.as_millis(),
                    "Unit of work exceeded its deadline"
                );
                rollback(txn).await;
                Err(LedgerError::StorageContention(format!(
                    "unit of work exceeded {}ms",
                    self.settings.request_timeout.as_millis()
                )))
            }
        }
    }

    /// Moves `amount` coins from sender to receiver.
    ///
    /// Request-only checks run before any storage access. The rest runs against
    /// locked rows, so two racing debits of one sender are serialized and at
    /// most one can spend the same coins.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, a contention error the caller may
    /// retry, or a storage error.
    pub async fn transfer(&self, request: TransferRequest) -> Result<TransferRecord, LedgerError> {
        if let Err(err) = LedgerService::validate_request(&request) {
            log_rejection("transfer", &request.sender, &err);
            return Err(err);
        }

        let sender = request.sender.clone();
        let result = self
            .in_unit_of_work(move |txn| {
                Box::pin(async move {
                    let store = AccountStore::new(txn);
                    let locked = store
                        .lock_accounts(&[request.sender.as_str(), request.receiver.as_str()])
                        .await?;
                    let sender = locked.iter().find(|a| a.username == request.sender);
                    let receiver = locked.iter().find(|a| a.username == request.receiver);

                    let plan = LedgerService::plan_transfer(&request, sender, receiver)?;

                    store
                        .adjust_balance(&plan.sender, -plan.amount)
                        .await
                        .map_err(debit_after_plan)?;
                    store.adjust_balance(&plan.receiver, plan.amount).await?;

                    TransactionLog::append(txn, &plan).await
                })
            })
            .await;

        match &result {
            Ok(record) => info!(
                sender = %record.from,
                receiver = %record.to,
                amount = record.amount,
                "Transfer committed"
            ),
            Err(err) => log_rejection("transfer", &sender, err),
        }
        result
    }

    /// Spends coins on a catalog item and records the purchase.
    ///
    /// # Errors
    ///
    /// Returns `UnknownItem`, `Unauthorized`, `InsufficientFunds`, a
    /// contention error, or a storage error.
    pub async fn redeem(&self, request: RedemptionRequest) -> Result<RedemptionPlan, LedgerError> {
        let buyer = request.buyer.clone();
        let result = self
            .in_unit_of_work(move |txn| {
                Box::pin(async move {
                    let price = Catalog::price_of(txn, &request.item).await?;
                    let store = AccountStore::new(txn);
                    let account = store.get_balance_for_update(&request.buyer).await?;

                    let plan = LedgerService::plan_redemption(&request, account.as_ref(), price)?;

                    store
                        .adjust_balance(&plan.buyer, -plan.price)
                        .await
                        .map_err(debit_after_plan)?;
                    PurchaseLog::append(txn, &plan).await?;
                    Ok(plan)
                })
            })
            .await;

        match &result {
            Ok(plan) => info!(
                buyer = %plan.buyer,
                item = %plan.item,
                price = plan.price,
                "Redemption committed"
            ),
            Err(err) => log_rejection("redeem", &buyer, err),
        }
        result
    }
}

/// Bounds lock waits for the rest of the transaction. SQLite has no row locks.
async fn apply_lock_timeout(
    txn: &DatabaseTransaction,
    lock_timeout: Duration,
) -> Result<(), LedgerError> {
    if txn.get_database_backend() != DbBackend::Postgres {
        return Ok(());
    }

    let sql = format!("SET LOCAL lock_timeout = '{}ms'", lock_timeout.as_millis());
    txn.execute_unprepared(&sql)
        .await
        .map_err(classify_db_error)?;
    Ok(())
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(err) = txn.rollback().await {
        warn!(error = %err, "Rollback failed; the connection will discard the transaction");
    }
}

/// The debit was already checked against the locked balance, so a rejected
/// guard here means the lock did not hold.
fn debit_after_plan(err: LedgerError) -> LedgerError {
    match err {
        LedgerError::InsufficientFunds {
            username,
            balance,
            requested,
        } => LedgerError::InvariantViolation(format!(
            "guarded debit of {requested} rejected for {username} (balance {balance}) after funds check passed"
        )),
        other => other,
    }
}

fn log_rejection(operation: &str, principal: &str, err: &LedgerError) {
    match err.class() {
        ErrorClass::Validation | ErrorClass::Auth => {
            debug!(operation, principal, error = %err, "Ledger request rejected");
        }
        ErrorClass::Conflict => {
            info!(operation, principal, error = %err, "Ledger request rejected");
        }
        ErrorClass::Transient => {
            warn!(operation, principal, error = %err, "Ledger request hit contention");
        }
        ErrorClass::Fatal => {
            error!(operation, principal, error = %err, "Ledger request failed");
        }
    }
}
