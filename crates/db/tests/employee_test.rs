//! Integration tests for employee registration.

mod common;

use merchcoin_db::{EmployeeRepository, Registration};

use common::setup_sqlite;

#[tokio::test]
async fn test_register_then_find() {
    let db = setup_sqlite().await;
    let repo = EmployeeRepository::new(db.clone());

    let created = repo.register("alice", "hash-a", 1000).await.unwrap();
    assert_eq!(created.balance, 1000);

    let found = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.password_hash, "hash-a");
    assert!(repo.find_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_if_absent_keeps_first_registration() {
    let db = setup_sqlite().await;
    let repo = EmployeeRepository::new(db.clone());

    let first = repo.register_if_absent("alice", "hash-a", 1000).await.unwrap();
    assert!(matches!(first, Registration::Created(_)));

    let second = repo.register_if_absent("alice", "hash-b", 5).await.unwrap();
    let Registration::Existing(existing) = second else {
        panic!("second registration should find the existing row");
    };
    assert_eq!(existing.password_hash, "hash-a");
    assert_eq!(existing.balance, 1000);
}

#[tokio::test]
async fn test_total_supply_sums_balances() {
    let db = setup_sqlite().await;
    let repo = EmployeeRepository::new(db.clone());
    repo.register("alice", "h", 1000).await.unwrap();
    repo.register("bob", "h", 250).await.unwrap();

    assert_eq!(repo.total_supply().await.unwrap(), 1250);
    assert_eq!(repo.all_balances().await.unwrap().len(), 2);
}
