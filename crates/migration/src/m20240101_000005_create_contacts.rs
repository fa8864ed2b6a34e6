//! Create `contacts` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(pk_auto(Contacts::Id))
                    .col(string(Contacts::FirstName).not_null())
                    .col(string(Contacts::LastName).not_null())
                    .col(string(Contacts::Email).not_null())
                    .col(ColumnDef::new(Contacts::Phone).string().null())
                    .col(ColumnDef::new(Contacts::Company).string().null())
                    .col(ColumnDef::new(Contacts::JobTitle).string().null())
                    .col(ColumnDef::new(Contacts::Address).text().null())
                    .col(string_len(Contacts::ContactType, 32).not_null())
                    .col(ColumnDef::new(Contacts::Notes).text().null())
                    .col(ColumnDef::new(Contacts::AssignedTo).string_len(64).null())
                    .col(timestamp_with_time_zone(Contacts::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Contacts::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contacts_assigned_to")
                            .from(Contacts::Table, Contacts::AssignedTo)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contacts::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contacts {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    JobTitle,
    Address,
    ContactType,
    Notes,
    AssignedTo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
