//! Integration tests for coin transfers.
//!
//! Covers the fail-fast validation order, atomicity of rejected transfers,
//! conservation of total supply, and the transaction log.

mod common;

use merchcoin_core::ledger::{LedgerError, TransferRequest};
use merchcoin_db::{EmployeeRepository, TransactionLog};

use common::{balance, ledger, seed_employee, setup_sqlite};

#[tokio::test]
async fn test_transfer_moves_coins_and_records_it() {
    let db = setup_sqlite().await;
    seed_employee(&db, "alice", 1000).await;
    seed_employee(&db, "bob", 0).await;

    let record = ledger(&db)
        .transfer(TransferRequest::new("alice", "bob", 50))
        .await
        .unwrap();

    assert_eq!(record.from, "alice");
    assert_eq!(record.to, "bob");
    assert_eq!(record.amount, 50);
    assert_eq!(balance(&db, "alice").await, 950);
    assert_eq!(balance(&db, "bob").await, 50);

    let alice = TransactionLog::history_for(&db, "alice").await.unwrap();
    assert_eq!(alice.sent.len(), 1);
    assert!(alice.received.is_empty());

    let bob = TransactionLog::history_for(&db, "bob").await.unwrap();
    assert_eq!(bob.received, alice.sent);
    assert!(bob.sent.is_empty());
}

#[tokio::test]
async fn test_exact_balance_drains_to_zero() {
    let db = setup_sqlite().await;
    seed_employee(&db, "alice", 1000).await;
    seed_employee(&db, "bob", 0).await;

    ledger(&db)
        .transfer(TransferRequest::new("alice", "bob", 1000))
        .await
        .unwrap();

    assert_eq!(balance(&db, "alice").await, 0);
    assert_eq!(balance(&db, "bob").await, 1000);
}

#[tokio::test]
async fn test_insufficient_funds_changes_nothing() {
    let db = setup_sqlite().await;
    seed_employee(&db, "alice", 30).await;
    seed_employee(&db, "bob", 0).await;

    let err = ledger(&db)
        .transfer(TransferRequest::new("alice", "bob", 50))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::InsufficientFunds {
            username: "alice".to_string(),
            balance: 30,
            requested: 50,
        }
    );
    assert_eq!(balance(&db, "alice").await, 30);
    assert_eq!(balance(&db, "bob").await, 0);

    let history = TransactionLog::history_for(&db, "alice").await.unwrap();
    assert!(history.sent.is_empty());
}

#[tokio::test]
async fn test_unknown_recipient_is_rejected() {
    let db = setup_sqlite().await;
    seed_employee(&db, "alice", 1000).await;

    let err = ledger(&db)
        .transfer(TransferRequest::new("alice", "ghost", 10))
        .await
        .unwrap_err();

    assert_eq!(err, LedgerError::UnknownRecipient("ghost".to_string()));
    assert_eq!(balance(&db, "alice").await, 1000);
}

#[tokio::test]
async fn test_unknown_recipient_reported_before_insufficient_funds() {
    let db = setup_sqlite().await;
    seed_employee(&db, "alice", 10).await;

    let err = ledger(&db)
        .transfer(TransferRequest::new("alice", "ghost", 5000))
        .await
        .unwrap_err();

    assert_eq!(err, LedgerError::UnknownRecipient("ghost".to_string()));
}

#[tokio::test]
async fn test_self_transfer_is_rejected() {
    let db = setup_sqlite().await;
    seed_employee(&db, "alice", 1000).await;

    let err = ledger(&db)
        .transfer(TransferRequest::new("alice", "alice", 10))
        .await
        .unwrap_err();

    assert_eq!(err, LedgerError::SelfTransfer);
    assert_eq!(balance(&db, "alice").await, 1000);
}

#[tokio::test]
async fn test_non_positive_amounts_are_rejected() {
    let db = setup_sqlite().await;
    seed_employee(&db, "alice", 1000).await;
    seed_employee(&db, "bob", 0).await;
    let ledger = ledger(&db);

    for amount in [0, -1, -500, i64::MIN] {
        let err = ledger
            .transfer(TransferRequest::new("alice", "bob", amount))
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount(amount));
    }

    assert_eq!(balance(&db, "alice").await, 1000);
    assert_eq!(balance(&db, "bob").await, 0);
}

#[tokio::test]
async fn test_unregistered_sender_is_unauthorized() {
    let db = setup_sqlite().await;
    seed_employee(&db, "bob", 0).await;

    let err = ledger(&db)
        .transfer(TransferRequest::new("nobody", "bob", 10))
        .await
        .unwrap_err();

    assert_eq!(err, LedgerError::Unauthorized("nobody".to_string()));
    assert_eq!(balance(&db, "bob").await, 0);
}

#[tokio::test]
async fn test_sequence_conserves_total_supply() {
    let db = setup_sqlite().await;
    for (name, coins) in [("alice", 1000), ("bob", 500), ("carol", 0)] {
        seed_employee(&db, name, coins).await;
    }
    let employees = EmployeeRepository::new(db.clone());
    let before = employees.total_supply().await.unwrap();
    let ledger = ledger(&db);

    let transfers = [
        ("alice", "bob", 300),
        ("bob", "carol", 700),
        ("carol", "alice", 1000),
        ("carol", "alice", 650),
        ("alice", "carol", 1),
    ];
    let mut committed = 0;
    for (from, to, amount) in transfers {
        if ledger
            .transfer(TransferRequest::new(from, to, amount))
            .await
            .is_ok()
        {
            committed += 1;
        }
    }

    assert_eq!(committed, 4, "only carol's 1000 should bounce");
    assert_eq!(employees.total_supply().await.unwrap(), before);
    assert_eq!(balance(&db, "alice").await, 1349);
    assert_eq!(balance(&db, "bob").await, 100);
    assert_eq!(balance(&db, "carol").await, 51);
}

#[tokio::test]
async fn test_history_is_ordered_oldest_first() {
    let db = setup_sqlite().await;
    seed_employee(&db, "alice", 1000).await;
    seed_employee(&db, "bob", 0).await;
    let ledger = ledger(&db);

    for amount in [1, 2, 3] {
        ledger
            .transfer(TransferRequest::new("alice", "bob", amount))
            .await
            .unwrap();
    }

    let history = TransactionLog::history_for(&db, "bob").await.unwrap();
    let amounts: Vec<i64> = history.received.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![1, 2, 3]);
}
