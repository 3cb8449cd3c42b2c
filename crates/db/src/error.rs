//! Classification of storage errors into ledger error kinds.
//!
//! Postgres reports SQLSTATE codes, SQLite reports (extended) result codes;
//! both arrive through `DatabaseError::code()`.

use sea_orm::{DbErr, RuntimeErr, SqlErr, sqlx};
use tracing::{error, warn};

use merchcoin_core::ledger::LedgerError;

/// Codes meaning "another transaction holds what you need; try again".
const CONTENTION_CODES: &[&str] = &[
    "40001", // serialization_failure
    "40P01", // deadlock_detected
    "55P03", // lock_not_available (lock_timeout)
    "57014", // query_canceled (statement_timeout)
    "5",     // SQLITE_BUSY
    "6",     // SQLITE_LOCKED
    "261",   // SQLITE_BUSY_RECOVERY
    "262",   // SQLITE_LOCKED_SHAREDCACHE
    "517",   // SQLITE_BUSY_SNAPSHOT
];

/// Codes meaning a CHECK constraint rejected the write.
const CHECK_VIOLATION_CODES: &[&str] = &[
    "23514", // check_violation
    "275",   // SQLITE_CONSTRAINT_CHECK
];

/// Extracts the driver-level error code, if the error came from the database.
#[must_use]
pub fn database_code(err: &DbErr) -> Option<String> {
    let runtime = match err {
        DbErr::Conn(e) | DbErr::Exec(e) | DbErr::Query(e) => e,
        _ => return None,
    };

    match runtime {
        RuntimeErr::SqlxError(sqlx_err) => sqlx_err
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .map(|code| code.into_owned()),
        RuntimeErr::Internal(_) => None,
    }
}

/// Returns true if the database could not be reached or the connection broke.
///
/// These carry no database code but are as retryable as a lock timeout.
#[must_use]
pub fn is_connection_failure(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => matches!(
            e,
            sqlx::Error::Io(_)
                | sqlx::Error::PoolClosed
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::Protocol(_)
                | sqlx::Error::WorkerCrashed
        ),
        _ => false,
    }
}

/// Returns true if `err` is a unique-constraint violation.
#[must_use]
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Maps a storage error onto the ledger taxonomy.
///
/// Contention is kept apart from business conflicts so callers can retry it;
/// a CHECK violation means a balance would have gone negative and is fatal.
#[must_use]
pub fn classify_db_error(err: DbErr) -> LedgerError {
    if is_connection_failure(&err) {
        warn!(error = %err, "Database connection failure");
        return LedgerError::StorageContention(err.to_string());
    }

    match database_code(&err).as_deref() {
        Some(code) if CONTENTION_CODES.contains(&code) => {
            warn!(code, error = %err, "Storage contention");
            LedgerError::StorageContention(err.to_string())
        }
        Some(code) if CHECK_VIOLATION_CODES.contains(&code) => {
            error!(code, error = %err, "Balance constraint rejected a ledger write");
            LedgerError::InvariantViolation(err.to_string())
        }
        code => {
            error!(code = ?code, error = %err, "Storage failure");
            LedgerError::Storage(err.to_string())
        }
    }
}
