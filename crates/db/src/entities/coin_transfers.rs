//! `SeaORM` Entity for coin_transfers table (the transaction log).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "coin_transfers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub from_username: String,
    pub to_username: String,
    pub amount: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::FromUsername",
        to = "super::employees::Column::Username"
    )]
    Sender,
    #[sea_orm(
        belongs_to = "super::employees::Entity",
        from = "Column::ToUsername",
        to = "super::employees::Column::Username"
    )]
    Receiver,
}

impl ActiveModelBehavior for ActiveModel {}
