//! Ledger error types.
//!
//! A closed set of failure kinds for transfers and redemptions. Callers branch
//! on the variant (or on [`ErrorClass`]), never on the message text.

use thiserror::Error;

use merchcoin_shared::AppError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Amount is zero or negative.
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(i64),

    /// Sender and receiver are the same employee.
    #[error("Cannot transfer coins to yourself")]
    SelfTransfer,

    // ========== Business Conflicts ==========
    /// Receiver is not a registered employee.
    #[error("Recipient not found: {0}")]
    UnknownRecipient(String),

    /// Catalog has no item with this name.
    #[error("Item not found in catalog: {0}")]
    UnknownItem(String),

    /// Balance does not cover the requested amount.
    #[error("Insufficient funds for {username}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// The account being debited.
        username: String,
        /// Balance observed under lock.
        balance: i64,
        /// Amount that was requested.
        requested: i64,
    },

    // ========== Principal Errors ==========
    /// Authenticated principal has no account.
    #[error("Unknown principal: {0}")]
    Unauthorized(String),

    // ========== Storage Errors ==========
    /// Lock wait timeout, deadlock, serialization failure, or deadline expiry.
    #[error("Storage contention, please retry: {0}")]
    StorageContention(String),

    /// Any other storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A balance would have gone negative after the pre-check passed.
    #[error("Ledger invariant violated: {0}")]
    InvariantViolation(String),
}

/// Coarse classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Rejected from the request alone, before storage was touched.
    Validation,
    /// Rejected against the current account snapshot.
    Conflict,
    /// The caller is not a known principal.
    Auth,
    /// Infrastructure failure the caller may retry.
    Transient,
    /// Unexpected failure; never retry blindly.
    Fatal,
}

impl LedgerError {
    /// Returns the coarse class of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidAmount(_) | Self::SelfTransfer => ErrorClass::Validation,
            Self::UnknownRecipient(_) | Self::UnknownItem(_) | Self::InsufficientFunds { .. } => {
                ErrorClass::Conflict
            }
            Self::Unauthorized(_) => ErrorClass::Auth,
            Self::StorageContention(_) => ErrorClass::Transient,
            Self::Storage(_) | Self::InvariantViolation(_) => ErrorClass::Fatal,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::SelfTransfer => "SELF_TRANSFER",
            Self::UnknownRecipient(_) => "UNKNOWN_RECIPIENT",
            Self::UnknownItem(_) => "UNKNOWN_ITEM",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::StorageContention(_) => "STORAGE_CONTENTION",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self.class() {
            // Validation errors are reported as conflicts, like business rules.
            ErrorClass::Validation | ErrorClass::Conflict => 409,
            ErrorClass::Auth => 401,
            ErrorClass::Transient | ErrorClass::Fatal => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.class(), ErrorClass::Transient)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.class() {
            ErrorClass::Validation | ErrorClass::Conflict => Self::Conflict(message),
            ErrorClass::Auth => Self::Unauthorized(message),
            ErrorClass::Transient => Self::Database(message),
            ErrorClass::Fatal => Self::Internal(message),
        }
    }
}
