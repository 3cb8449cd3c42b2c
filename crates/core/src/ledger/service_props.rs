//! Property-based tests for LedgerService.
//!
//! - Conservation: successful transfers never change total supply
//! - Non-negativity: no planned balance is ever below zero
//! - Atomicity: a rejected plan leaves every balance untouched

use std::collections::BTreeMap;

use proptest::prelude::*;

use super::balance::total_supply;
use super::error::LedgerError;
use super::service::LedgerService;
use super::types::{AccountSnapshot, TransferRequest};

const NAMES: [&str; 4] = ["alice", "bob", "carol", "dave"];

/// Strategy to generate starting balances for every account.
fn balances() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..2_000, NAMES.len())
}

/// Strategy to generate a transfer between two (possibly equal) accounts.
fn transfer() -> impl Strategy<Value = (usize, usize, i64)> {
    (0..NAMES.len(), 0..NAMES.len(), -50i64..1_500)
}

fn snapshot(book: &BTreeMap<String, i64>, name: &str) -> Option<AccountSnapshot> {
    book.get(name).map(|&balance| AccountSnapshot {
        username: name.to_string(),
        balance,
    })
}

/// Applies a transfer to an in-memory book the way a unit of work would.
fn apply(
    book: &mut BTreeMap<String, i64>,
    request: &TransferRequest,
) -> Result<(), LedgerError> {
    let sender = snapshot(book, &request.sender);
    let receiver = snapshot(book, &request.receiver);
    let plan = LedgerService::plan_transfer(request, sender.as_ref(), receiver.as_ref())?;

    book.insert(plan.sender, plan.sender_balance_after);
    book.insert(plan.receiver, plan.receiver_balance_after);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* sequence of transfers, total supply is unchanged.
    #[test]
    fn prop_transfers_conserve_supply(
        start in balances(),
        transfers in prop::collection::vec(transfer(), 1..40),
    ) {
        let mut book: BTreeMap<String, i64> =
            NAMES.iter().map(|n| (*n).to_string()).zip(start).collect();
        let before = total_supply(book.values().copied());

        for (from, to, amount) in transfers {
            let request = TransferRequest::new(NAMES[from], NAMES[to], amount);
            let _ = apply(&mut book, &request);
        }

        prop_assert_eq!(total_supply(book.values().copied()), before);
    }

    /// *For any* sequence of transfers, no balance goes negative.
    #[test]
    fn prop_balances_never_negative(
        start in balances(),
        transfers in prop::collection::vec(transfer(), 1..40),
    ) {
        let mut book: BTreeMap<String, i64> =
            NAMES.iter().map(|n| (*n).to_string()).zip(start).collect();

        for (from, to, amount) in transfers {
            let request = TransferRequest::new(NAMES[from], NAMES[to], amount);
            let _ = apply(&mut book, &request);
            prop_assert!(book.values().all(|b| *b >= 0));
        }
    }

    /// *For any* rejected transfer, the book is unchanged.
    #[test]
    fn prop_rejected_transfer_changes_nothing(
        start in balances(),
        (from, to, amount) in transfer(),
    ) {
        let mut book: BTreeMap<String, i64> =
            NAMES.iter().map(|n| (*n).to_string()).zip(start).collect();
        let before = book.clone();

        let request = TransferRequest::new(NAMES[from], NAMES[to], amount);
        if apply(&mut book, &request).is_err() {
            prop_assert_eq!(book, before);
        }
    }

    /// A transfer succeeds exactly when amount, parties, and funds allow it.
    #[test]
    fn prop_acceptance_matches_rules(
        sender_balance in 0i64..2_000,
        (from, to, amount) in transfer(),
    ) {
        let sender = AccountSnapshot { username: NAMES[from].to_string(), balance: sender_balance };
        let receiver = AccountSnapshot { username: NAMES[to].to_string(), balance: 0 };
        let request = TransferRequest::new(NAMES[from], NAMES[to], amount);

        let result = LedgerService::plan_transfer(&request, Some(&sender), Some(&receiver));
        let expected = amount > 0 && from != to && sender_balance >= amount;

        prop_assert_eq!(result.is_ok(), expected);
    }
}
