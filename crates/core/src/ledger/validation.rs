//! Business rule validation for ledger operations.
//!
//! Each check is a separate function so the service can run them in the
//! fixed fail-fast order: amount, parties, recipient, funds.

use super::error::LedgerError;

/// Rejects zero and negative amounts.
///
/// # Errors
///
/// Returns `LedgerError::InvalidAmount` if `amount <= 0`.
pub const fn validate_amount(amount: i64) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Ok(())
}

/// Rejects transfers where sender and receiver are the same employee.
///
/// # Errors
///
/// Returns `LedgerError::SelfTransfer` if both names are equal.
pub fn validate_parties(sender: &str, receiver: &str) -> Result<(), LedgerError> {
    if sender == receiver {
        return Err(LedgerError::SelfTransfer);
    }
    Ok(())
}

/// Checks that `balance` covers `amount`.
///
/// # Errors
///
/// Returns `LedgerError::InsufficientFunds` if `balance < amount`.
pub fn ensure_sufficient_funds(
    username: &str,
    balance: i64,
    amount: i64,
) -> Result<(), LedgerError> {
    if balance < amount {
        return Err(LedgerError::InsufficientFunds {
            username: username.to_string(),
            balance,
            requested: amount,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn test_non_positive_amount_rejected(#[case] amount: i64) {
        assert_eq!(
            validate_amount(amount),
            Err(LedgerError::InvalidAmount(amount))
        );
    }

    #[rstest]
    #[case(1)]
    #[case(1000)]
    #[case(i64::MAX)]
    fn test_positive_amount_accepted(#[case] amount: i64) {
        assert!(validate_amount(amount).is_ok());
    }

    #[test]
    fn test_self_transfer_rejected() {
        assert_eq!(
            validate_parties("alice", "alice"),
            Err(LedgerError::SelfTransfer)
        );
        assert!(validate_parties("alice", "bob").is_ok());
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        assert!(validate_parties("alice", "Alice").is_ok());
    }

    #[rstest]
    #[case(1000, 1000, true)]
    #[case(1000, 999, true)]
    #[case(1000, 1001, false)]
    #[case(0, 1, false)]
    fn test_sufficient_funds(#[case] balance: i64, #[case] amount: i64, #[case] ok: bool) {
        assert_eq!(ensure_sufficient_funds("alice", balance, amount).is_ok(), ok);
    }
}
