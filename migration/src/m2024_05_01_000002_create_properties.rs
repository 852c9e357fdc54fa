//! Migration to create the properties table.
//!
//! Each property references an owning client; the foreign key is
//! restrict-on-delete so a referenced client cannot be removed.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Properties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Properties::Address)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Properties::Price)
                            .decimal_len(18, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Properties::Type)
                            .text()
                            .not_null()
                            .default("Sale"),
                    )
                    .col(
                        ColumnDef::new(Properties::Description)
                            .string_len(500)
                            .null(),
                    )
                    .col(ColumnDef::new(Properties::OwnerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_owner_id")
                            .from(Properties::Table, Properties::OwnerId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_owner_id")
                    .table(Properties::Table)
                    .col(Properties::OwnerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_properties_owner_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Address,
    Price,
    Type,
    Description,
    OwnerId,
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
}
