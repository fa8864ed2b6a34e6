//! Create `tasks` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(pk_auto(Tasks::Id))
                    .col(string(Tasks::Title).not_null())
                    .col(ColumnDef::new(Tasks::Description).text().null())
                    .col(ColumnDef::new(Tasks::DueDate).date().null())
                    .col(string_len(Tasks::Priority, 16).not_null().default("medium"))
                    .col(string_len(Tasks::Status, 32).not_null().default("pending"))
                    .col(ColumnDef::new(Tasks::Category).string().null())
                    .col(ColumnDef::new(Tasks::LeadId).integer().null())
                    .col(ColumnDef::new(Tasks::ContactId).integer().null())
                    .col(ColumnDef::new(Tasks::PropertyId).integer().null())
                    .col(ColumnDef::new(Tasks::AssignedTo).string_len(64).null())
                    .col(timestamp_with_time_zone(Tasks::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Tasks::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_lead")
                            .from(Tasks::Table, Tasks::LeadId)
                            .to(Leads::Table, Leads::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_contact")
                            .from(Tasks::Table, Tasks::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_property")
                            .from(Tasks::Table, Tasks::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_assigned_to")
                            .from(Tasks::Table, Tasks::AssignedTo)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Tasks::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    DueDate,
    Priority,
    Status,
    Category,
    LeadId,
    ContactId,
    PropertyId,
    AssignedTo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Leads { Table, Id }

#[derive(DeriveIden)]
enum Contacts { Table, Id }

#[derive(DeriveIden)]
enum Properties { Table, Id }

#[derive(DeriveIden)]
enum Users { Table, Id }
