//! Create `users` table.
//!
//! Ids are opaque strings handed out by the identity layer; email is unique
//! but only advisory for the CRM itself.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(string_len(Users::Id, 64).primary_key())
                    .col(ColumnDef::new(Users::Email).string_len(255).unique_key().null())
                    .col(ColumnDef::new(Users::FirstName).string().null())
                    .col(ColumnDef::new(Users::LastName).string().null())
                    .col(ColumnDef::new(Users::ProfileImageUrl).string().null())
                    .col(string_len(Users::UserType, 32).not_null().default("individual"))
                    .col(ColumnDef::new(Users::CompanyName).string().null())
                    .col(ColumnDef::new(Users::CompanyLicense).string().null())
                    .col(timestamp_with_time_zone(Users::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Users::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    FirstName,
    LastName,
    ProfileImageUrl,
    UserType,
    CompanyName,
    CompanyLicense,
    CreatedAt,
    UpdatedAt,
}
