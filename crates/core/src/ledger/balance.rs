//! Balance arithmetic.
//!
//! Balances are whole coins in an `i64` and may never drop below zero.

use super::error::LedgerError;

/// Applies a signed delta to a balance.
///
/// # Errors
///
/// Returns `LedgerError::InsufficientFunds` if the result would be negative,
/// and `LedgerError::InvariantViolation` if the addition overflows.
pub fn apply_delta(username: &str, balance: i64, delta: i64) -> Result<i64, LedgerError> {
    let next = balance.checked_add(delta).ok_or_else(|| {
        LedgerError::InvariantViolation(format!(
            "balance overflow for {username}: {balance} + {delta}"
        ))
    })?;

    if next < 0 {
        return Err(LedgerError::InsufficientFunds {
            username: username.to_string(),
            balance,
            requested: delta.saturating_neg(),
        });
    }
    Ok(next)
}

/// Sums balances without overflow, for conservation checks.
#[must_use]
pub fn total_supply<I>(balances: I) -> i128
where
    I: IntoIterator<Item = i64>,
{
    balances.into_iter().map(i128::from).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_within_balance() {
        assert_eq!(apply_delta("alice", 1000, -50), Ok(950));
    }

    #[test]
    fn test_debit_to_exactly_zero() {
        assert_eq!(apply_delta("alice", 1000, -1000), Ok(0));
    }

    #[test]
    fn test_debit_below_zero() {
        assert_eq!(
            apply_delta("alice", 1000, -1001),
            Err(LedgerError::InsufficientFunds {
                username: "alice".to_string(),
                balance: 1000,
                requested: 1001,
            })
        );
    }

    #[test]
    fn test_credit_overflow_is_invariant_violation() {
        assert!(matches!(
            apply_delta("bob", i64::MAX, 1),
            Err(LedgerError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_total_supply_does_not_overflow() {
        assert_eq!(
            total_supply([i64::MAX, i64::MAX]),
            2 * i128::from(i64::MAX)
        );
    }
}
