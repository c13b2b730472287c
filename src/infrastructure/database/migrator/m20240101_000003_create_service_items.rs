//! Create service_items table
//!
//! Prices are stored in minor units (hundredths).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceItems::Name).string().not_null())
                    .col(
                        ColumnDef::new(ServiceItems::Category)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceItems::PricePerUnit)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ServiceItems::UnitType).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ServiceItems {
    Table,
    Id,
    Name,
    Category,
    PricePerUnit,
    UnitType,
}
