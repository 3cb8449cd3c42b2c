//! Ledger service for transfer and redemption planning.
//!
//! This module decides, from locked account snapshots, whether an operation
//! may proceed and what the resulting balances are. Persisting the plan is
//! the storage layer's job; it must do so inside the same unit of work that
//! produced the snapshots.

use super::balance::apply_delta;
use super::error::LedgerError;
use super::types::{
    AccountSnapshot, RedemptionPlan, RedemptionRequest, TransferPlan, TransferRequest,
};
use super::validation::{ensure_sufficient_funds, validate_amount, validate_parties};

/// Ledger service for transfer and redemption validation.
///
/// This service contains pure business logic with no database dependencies.
pub struct LedgerService;

impl LedgerService {
    /// Checks the parts of a transfer that depend on the request alone.
    ///
    /// Runs before any storage access:
    /// 1. `amount <= 0` → `InvalidAmount`
    /// 2. `sender == receiver` → `SelfTransfer`
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate_request(request: &TransferRequest) -> Result<(), LedgerError> {
        validate_amount(request.amount)?;
        validate_parties(&request.sender, &request.receiver)
    }

    /// Plans a transfer against snapshots read under lock.
    ///
    /// Continues the fail-fast order of [`Self::validate_request`]:
    /// 3. receiver missing → `UnknownRecipient`
    /// 4. sender missing → `Unauthorized`, balance below amount →
    ///    `InsufficientFunds`
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn plan_transfer(
        request: &TransferRequest,
        sender: Option<&AccountSnapshot>,
        receiver: Option<&AccountSnapshot>,
    ) -> Result<TransferPlan, LedgerError> {
        Self::validate_request(request)?;

        let receiver =
            receiver.ok_or_else(|| LedgerError::UnknownRecipient(request.receiver.clone()))?;
        let sender = sender.ok_or_else(|| LedgerError::Unauthorized(request.sender.clone()))?;

        ensure_sufficient_funds(&sender.username, sender.balance, request.amount)?;

        let sender_balance_after = apply_delta(&sender.username, sender.balance, -request.amount)?;
        let receiver_balance_after =
            apply_delta(&receiver.username, receiver.balance, request.amount)?;

        Ok(TransferPlan {
            sender: sender.username.clone(),
            receiver: receiver.username.clone(),
            amount: request.amount,
            sender_balance_after,
            receiver_balance_after,
        })
    }

    /// Plans a redemption against the buyer's locked snapshot.
    ///
    /// Order: unknown item, unknown buyer, non-positive price, funds.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn plan_redemption(
        request: &RedemptionRequest,
        buyer: Option<&AccountSnapshot>,
        price: Option<i64>,
    ) -> Result<RedemptionPlan, LedgerError> {
        let price = price.ok_or_else(|| LedgerError::UnknownItem(request.item.clone()))?;
        let buyer = buyer.ok_or_else(|| LedgerError::Unauthorized(request.buyer.clone()))?;

        validate_amount(price)?;
        ensure_sufficient_funds(&buyer.username, buyer.balance, price)?;
        let balance_after = apply_delta(&buyer.username, buyer.balance, -price)?;

        Ok(RedemptionPlan {
            buyer: buyer.username.clone(),
            item: request.item.clone(),
            price,
            balance_after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(username: &str, balance: i64) -> AccountSnapshot {
        AccountSnapshot {
            username: username.to_string(),
            balance,
        }
    }

    #[test]
    fn test_transfer_plan_moves_amount() {
        let request = TransferRequest::new("alice", "bob", 50);
        let plan = LedgerService::plan_transfer(
            &request,
            Some(&account("alice", 1000)),
            Some(&account("bob", 0)),
        )
        .unwrap();

        assert_eq!(plan.sender_balance_after, 950);
        assert_eq!(plan.receiver_balance_after, 50);
        assert_eq!(plan.amount, 50);
    }

    #[test]
    fn test_invalid_amount_wins_over_self_transfer() {
        let request = TransferRequest::new("alice", "alice", 0);
        assert_eq!(
            LedgerService::validate_request(&request),
            Err(LedgerError::InvalidAmount(0))
        );
    }

    #[test]
    fn test_self_transfer_regardless_of_balance() {
        let request = TransferRequest::new("alice", "alice", 10);
        let alice = account("alice", 1_000_000);

        assert_eq!(
            LedgerService::plan_transfer(&request, Some(&alice), Some(&alice)),
            Err(LedgerError::SelfTransfer)
        );
    }

    #[test]
    fn test_unknown_recipient_wins_over_insufficient_funds() {
        let request = TransferRequest::new("alice", "ghost", 5000);

        assert_eq!(
            LedgerService::plan_transfer(&request, Some(&account("alice", 10)), None),
            Err(LedgerError::UnknownRecipient("ghost".to_string()))
        );
    }

    #[test]
    fn test_missing_sender_is_unauthorized() {
        let request = TransferRequest::new("nobody", "bob", 5);

        assert_eq!(
            LedgerService::plan_transfer(&request, None, Some(&account("bob", 0))),
            Err(LedgerError::Unauthorized("nobody".to_string()))
        );
    }

    #[test]
    fn test_boundary_balance() {
        let alice = account("alice", 1000);
        let bob = account("bob", 0);

        let exact = TransferRequest::new("alice", "bob", 1000);
        let plan = LedgerService::plan_transfer(&exact, Some(&alice), Some(&bob)).unwrap();
        assert_eq!(plan.sender_balance_after, 0);

        let over = TransferRequest::new("alice", "bob", 1001);
        assert!(matches!(
            LedgerService::plan_transfer(&over, Some(&alice), Some(&bob)),
            Err(LedgerError::InsufficientFunds { balance: 1000, requested: 1001, .. })
        ));
    }

    #[test]
    fn test_receiver_overflow_is_invariant_violation() {
        let request = TransferRequest::new("alice", "bob", 1);

        assert!(matches!(
            LedgerService::plan_transfer(
                &request,
                Some(&account("alice", 10)),
                Some(&account("bob", i64::MAX)),
            ),
            Err(LedgerError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_redemption_plan() {
        let request = RedemptionRequest::new("alice", "cup");
        let plan =
            LedgerService::plan_redemption(&request, Some(&account("alice", 100)), Some(20))
                .unwrap();

        assert_eq!(plan.balance_after, 80);
        assert_eq!(plan.price, 20);
    }

    #[test]
    fn test_redemption_unknown_item() {
        let request = RedemptionRequest::new("alice", "yacht");

        assert_eq!(
            LedgerService::plan_redemption(&request, Some(&account("alice", 100)), None),
            Err(LedgerError::UnknownItem("yacht".to_string()))
        );
    }

    #[test]
    fn test_redemption_insufficient_funds() {
        let request = RedemptionRequest::new("alice", "pink-hoody");

        assert!(matches!(
            LedgerService::plan_redemption(&request, Some(&account("alice", 499)), Some(500)),
            Err(LedgerError::InsufficientFunds { .. })
        ));
    }
}
