//! Ledger schema.
//!
//! Creates the account, operation type and transaction tables. Written with
//! the schema builder so the same migration runs on `PostgreSQL` and `SQLite`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::DocumentNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OperationTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OperationTypes::Id)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OperationTypes::Description).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::AccountId).big_integer().not_null())
                    .col(ColumnDef::new(Transactions::OperationTypeId).integer().not_null())
                    .col(ColumnDef::new(Transactions::Amount).decimal_len(16, 4).not_null())
                    .col(
                        ColumnDef::new(Transactions::EventDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_account")
                            .from(Transactions::Table, Transactions::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_operation_type")
                            .from(Transactions::Table, Transactions::OperationTypeId)
                            .to(OperationTypes::Table, OperationTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_account_event_date")
                    .table(Transactions::Table)
                    .col(Transactions::AccountId)
                    .col(Transactions::EventDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OperationTypes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    DocumentNumber,
}

#[derive(DeriveIden)]
enum OperationTypes {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    AccountId,
    OperationTypeId,
    Amount,
    EventDate,
}
