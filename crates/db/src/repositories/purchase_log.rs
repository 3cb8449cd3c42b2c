//! Purchase log and inventory read model.

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use merchcoin_core::ledger::{LedgerError, RedemptionPlan};

use crate::entities::purchases;
use crate::error::classify_db_error;

/// How many of one item an employee owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Catalog item name.
    pub item: String,
    /// Number of purchases of this item.
    pub quantity: u64,
}

/// Purchase log repository.
pub struct PurchaseLog;

impl PurchaseLog {
    /// Records a redemption as part of the caller's unit of work.
    ///
    /// # Errors
    ///
    /// Returns a classified storage error if the insert fails.
    pub async fn append(
        txn: &DatabaseTransaction,
        plan: &RedemptionPlan,
    ) -> Result<(), LedgerError> {
        purchases::ActiveModel {
            id: Set(Uuid::now_v7()),
            username: Set(plan.buyer.clone()),
            item: Set(plan.item.clone()),
            price: Set(plan.price),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(txn)
        .await
        .map_err(classify_db_error)?;
        Ok(())
    }

    /// Aggregates an employee's purchases by item, sorted by item name.
    ///
    /// # Errors
    ///
    /// Returns a classified storage error if the query fails.
    pub async fn inventory_for<C>(db: &C, username: &str) -> Result<Vec<InventoryItem>, LedgerError>
    where
        C: ConnectionTrait,
    {
        let rows = purchases::Entity::find()
            .filter(purchases::Column::Username.eq(username))
            .order_by_asc(purchases::Column::Item)
            .all(db)
            .await
            .map_err(classify_db_error)?;

        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for row in rows {
            *counts.entry(row.item).or_default() += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(item, quantity)| InventoryItem { item, quantity })
            .collect())
    }
}
