//! Initial database migration.
//!
//! Creates the employee accounts, the transaction log, the merch catalog, and
//! the purchase log. Balances carry a `CHECK (balance >= 0)` so storage
//! rejects any write that would overdraw an account.

use sea_orm_migration::prelude::*;

/// Catalog seeded on first migration: (item, price in coins).
pub const CATALOG: &[(&str, i64)] = &[
    ("t-shirt", 80),
    ("cup", 20),
    ("book", 50),
    ("pen", 10),
    ("powerbank", 200),
    ("hoody", 300),
    ("umbrella", 200),
    ("socks", 10),
    ("wallet", 50),
    ("pink-hoody", 500),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // PART 1: ACCOUNTS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Username)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Employees::Balance)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(Employees::Balance).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 2: TRANSACTION LOG
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(CoinTransfers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoinTransfers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CoinTransfers::FromUsername)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoinTransfers::ToUsername)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoinTransfers::Amount)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(CoinTransfers::Amount).gt(0)),
                    )
                    .col(
                        ColumnDef::new(CoinTransfers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coin_transfers_from_username")
                            .from(CoinTransfers::Table, CoinTransfers::FromUsername)
                            .to(Employees::Table, Employees::Username),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coin_transfers_to_username")
                            .from(CoinTransfers::Table, CoinTransfers::ToUsername)
                            .to(Employees::Table, Employees::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_coin_transfers_from_username")
                    .table(CoinTransfers::Table)
                    .col(CoinTransfers::FromUsername)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_coin_transfers_to_username")
                    .table(CoinTransfers::Table)
                    .col(CoinTransfers::ToUsername)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 3: CATALOG & PURCHASES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(CatalogItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CatalogItems::Name)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CatalogItems::Price)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(CatalogItems::Price).gt(0)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Purchases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Purchases::Username).string_len(64).not_null())
                    .col(ColumnDef::new(Purchases::Item).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Purchases::Price)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(Purchases::Price).gt(0)),
                    )
                    .col(
                        ColumnDef::new(Purchases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchases_username")
                            .from(Purchases::Table, Purchases::Username)
                            .to(Employees::Table, Employees::Username),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchases_item")
                            .from(Purchases::Table, Purchases::Item)
                            .to(CatalogItems::Table, CatalogItems::Name),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_purchases_username")
                    .table(Purchases::Table)
                    .col(Purchases::Username)
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 4: SEED DATA
        // ============================================================
        let mut seed = Query::insert();
        seed.into_table(CatalogItems::Table)
            .columns([CatalogItems::Name, CatalogItems::Price]);
        for (name, price) in CATALOG {
            seed.values([(*name).into(), (*price).into()])
                .map_err(|e| DbErr::Migration(e.to_string()))?;
        }
        manager.exec_stmt(seed).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CatalogItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CoinTransfers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Username,
    PasswordHash,
    Balance,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CoinTransfers {
    Table,
    Id,
    FromUsername,
    ToUsername,
    Amount,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CatalogItems {
    Table,
    Name,
    Price,
}

#[derive(DeriveIden)]
enum Purchases {
    Table,
    Id,
    Username,
    Item,
    Price,
    CreatedAt,
}
