//! Create `properties` table.
//! Listings with address, pricing and optional photo/feature arrays.
use sea_orm_migration::{prelude::*, schema::*};

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
                    .col(pk_auto(Properties::Id))
                    .col(string(Properties::Title).not_null())
                    .col(ColumnDef::new(Properties::Description).text().null())
                    .col(text(Properties::Address).not_null())
                    .col(string(Properties::City).not_null())
                    .col(string(Properties::State).not_null())
                    .col(string(Properties::ZipCode).not_null())
                    .col(string_len(Properties::PropertyType, 32).not_null())
                    .col(string_len(Properties::Status, 32).not_null().default("available"))
                    .col(decimal_len(Properties::Price, 12, 2).not_null())
                    .col(ColumnDef::new(Properties::Bedrooms).integer().null())
                    .col(ColumnDef::new(Properties::Bathrooms).integer().null())
                    .col(ColumnDef::new(Properties::SquareFootage).integer().null())
                    .col(ColumnDef::new(Properties::LotSize).decimal_len(10, 2).null())
                    .col(ColumnDef::new(Properties::YearBuilt).integer().null())
                    .col(ColumnDef::new(Properties::ImageUrls).array(ColumnType::Text).null())
                    .col(ColumnDef::new(Properties::Features).array(ColumnType::Text).null())
                    .col(ColumnDef::new(Properties::ListingAgent).string_len(64).null())
                    .col(timestamp_with_time_zone(Properties::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Properties::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_listing_agent")
                            .from(Properties::Table, Properties::ListingAgent)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Properties::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Title,
    Description,
    Address,
    City,
    State,
    ZipCode,
    PropertyType,
    Status,
    Price,
    Bedrooms,
    Bathrooms,
    SquareFootage,
    LotSize,
    YearBuilt,
    ImageUrls,
    Features,
    ListingAgent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
