//! Append-only log of committed coin transfers.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use merchcoin_core::ledger::{LedgerError, TransferPlan, TransferRecord};

use crate::entities::coin_transfers;
use crate::error::classify_db_error;

/// Transfers an employee took part in, split by direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinHistory {
    /// Transfers where the employee was the receiver.
    pub received: Vec<TransferRecord>,
    /// Transfers where the employee was the sender.
    pub sent: Vec<TransferRecord>,
}

/// Transaction log repository.
///
/// There is no update or delete; rows are only ever appended.
pub struct TransactionLog;

impl TransactionLog {
    /// Records a transfer as part of the caller's unit of work.
    ///
    /// # Errors
    ///
    /// Returns a classified storage error if the insert fails.
    pub async fn append(
        txn: &DatabaseTransaction,
        plan: &TransferPlan,
    ) -> Result<TransferRecord, LedgerError> {
        let row = coin_transfers::ActiveModel {
            id: Set(Uuid::now_v7()),
            from_username: Set(plan.sender.clone()),
            to_username: Set(plan.receiver.clone()),
            amount: Set(plan.amount),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(txn)
        .await
        .map_err(classify_db_error)?;

        Ok(to_record(row))
    }

    /// Returns every transfer sent or received by `username`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a classified storage error if the query fails.
    pub async fn history_for<C>(db: &C, username: &str) -> Result<CoinHistory, LedgerError>
    where
        C: ConnectionTrait,
    {
        let rows = coin_transfers::Entity::find()
            .filter(
                coin_transfers::Column::FromUsername
                    .eq(username)
                    .or(coin_transfers::Column::ToUsername.eq(username)),
            )
            .order_by_asc(coin_transfers::Column::CreatedAt)
            .order_by_asc(coin_transfers::Column::Id)
            .all(db)
            .await
            .map_err(classify_db_error)?;

        let mut history = CoinHistory::default();
        for row in rows {
            let record = to_record(row);
            if record.from == username {
                history.sent.push(record);
            } else {
                history.received.push(record);
            }
        }
        Ok(history)
    }
}

fn to_record(row: coin_transfers::Model) -> TransferRecord {
    TransferRecord {
        from: row.from_username,
        to: row.to_username,
        amount: row.amount,
        created_at: row.created_at.to_utc(),
    }
}
