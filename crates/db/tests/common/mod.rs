//! Shared setup for database integration tests.
//!
//! Most tests run against a fresh in-memory SQLite database. Tests that need
//! real row locks ask for Postgres via `DATABASE_URL` and skip without it.

#![allow(dead_code)]

use std::env;
use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use merchcoin_db::migration::Migrator;
use merchcoin_db::{EmployeeRepository, LedgerRepository, LedgerSettings};

/// Fresh, migrated in-memory SQLite database.
///
/// The pool holds exactly one connection so every query sees the same
/// in-memory database.
pub async fn setup_sqlite() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(30))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory SQLite");
    Migrator::up(&db, None).await.expect("Failed to migrate");
    db
}

/// Migrated Postgres database from `DATABASE_URL`, or `None` to skip.
pub async fn setup_postgres() -> Option<DatabaseConnection> {
    let Ok(url) = env::var("DATABASE_URL") else {
        eprintln!("Skipping test - DATABASE_URL not set");
        return None;
    };

    let mut options = ConnectOptions::new(url);
    options.max_connections(20).sqlx_logging(false);

    let db = match Database::connect(options).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Skipping test - database not available: {e}");
            return None;
        }
    };
    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("Skipping test - migration failed: {e}");
        return None;
    }
    Some(db)
}

/// Username that cannot collide with rows from earlier runs.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Inserts an employee with the given balance.
pub async fn seed_employee(db: &DatabaseConnection, username: &str, balance: i64) {
    EmployeeRepository::new(db.clone())
        .register(username, "not-a-real-hash", balance)
        .await
        .expect("Failed to seed employee");
}

/// Reads a balance, panicking if the employee is missing.
pub async fn balance(db: &DatabaseConnection, username: &str) -> i64 {
    EmployeeRepository::new(db.clone())
        .balance_of(username)
        .await
        .expect("Failed to read balance")
        .expect("Employee should exist")
}

/// Ledger repository with default timing.
pub fn ledger(db: &DatabaseConnection) -> LedgerRepository {
    LedgerRepository::new(db.clone(), LedgerSettings::default())
}

/// Ledger repository with a custom unit-of-work deadline.
pub fn ledger_with_deadline(db: &DatabaseConnection, request_timeout: Duration) -> LedgerRepository {
    LedgerRepository::new(
        db.clone(),
        LedgerSettings {
            lock_timeout: Duration::from_secs(2),
            request_timeout,
        },
    )
}
