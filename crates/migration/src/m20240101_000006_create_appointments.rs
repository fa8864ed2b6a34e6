//! Create `appointments` table.
//! Optionally linked to a lead, contact and property; links are cleared when
//! the referenced record is deleted.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(pk_auto(Appointments::Id))
                    .col(string(Appointments::Title).not_null())
                    .col(ColumnDef::new(Appointments::Description).text().null())
                    .col(timestamp_with_time_zone(Appointments::StartTime).not_null())
                    .col(timestamp_with_time_zone(Appointments::EndTime).not_null())
                    .col(ColumnDef::new(Appointments::Location).text().null())
                    .col(string_len(Appointments::AppointmentType, 32).not_null())
                    .col(string_len(Appointments::Status, 32).not_null().default("scheduled"))
                    .col(ColumnDef::new(Appointments::LeadId).integer().null())
                    .col(ColumnDef::new(Appointments::ContactId).integer().null())
                    .col(ColumnDef::new(Appointments::PropertyId).integer().null())
                    .col(ColumnDef::new(Appointments::AssignedTo).string_len(64).null())
                    .col(timestamp_with_time_zone(Appointments::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Appointments::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_lead")
                            .from(Appointments::Table, Appointments::LeadId)
                            .to(Leads::Table, Leads::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_contact")
                            .from(Appointments::Table, Appointments::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_property")
                            .from(Appointments::Table, Appointments::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_assigned_to")
                            .from(Appointments::Table, Appointments::AssignedTo)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Appointments::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Appointments {
    Table,
    Id,
    Title,
    Description,
    StartTime,
    EndTime,
    Location,
    AppointmentType,
    Status,
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
