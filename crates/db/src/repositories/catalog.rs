//! Merch catalog lookups.

use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use merchcoin_core::ledger::LedgerError;

use crate::entities::catalog_items;
use crate::error::classify_db_error;

/// Read access to the fixed merch catalog.
pub struct Catalog;

impl Catalog {
    /// Returns the price of `item`, or `None` if it is not in the catalog.
    ///
    /// # Errors
    ///
    /// Returns a classified storage error if the query fails.
    pub async fn price_of<C>(db: &C, item: &str) -> Result<Option<i64>, LedgerError>
    where
        C: ConnectionTrait,
    {
        let row = catalog_items::Entity::find_by_id(item.to_string())
            .one(db)
            .await
            .map_err(classify_db_error)?;
        Ok(row.map(|r| r.price))
    }

    /// Lists the whole catalog, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns a classified storage error if the query fails.
    pub async fn items<C>(db: &C) -> Result<Vec<catalog_items::Model>, LedgerError>
    where
        C: ConnectionTrait,
    {
        catalog_items::Entity::find()
            .order_by_asc(catalog_items::Column::Name)
            .all(db)
            .await
            .map_err(classify_db_error)
    }
}
