//! Create `documents` table.
//! Holds file metadata only; the bytes live wherever `file_path` points.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(pk_auto(Documents::Id))
                    .col(string(Documents::Title).not_null())
                    .col(ColumnDef::new(Documents::Description).text().null())
                    .col(string(Documents::FileName).not_null())
                    .col(string(Documents::FilePath).not_null())
                    .col(ColumnDef::new(Documents::FileSize).integer().null())
                    .col(ColumnDef::new(Documents::MimeType).string().null())
                    .col(ColumnDef::new(Documents::DocumentType).string().null())
                    .col(ColumnDef::new(Documents::LeadId).integer().null())
                    .col(ColumnDef::new(Documents::ContactId).integer().null())
                    .col(ColumnDef::new(Documents::PropertyId).integer().null())
                    .col(ColumnDef::new(Documents::UploadedBy).string_len(64).null())
                    .col(timestamp_with_time_zone(Documents::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Documents::UpdatedAt).not_null().default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_lead")
                            .from(Documents::Table, Documents::LeadId)
                            .to(Leads::Table, Leads::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_contact")
                            .from(Documents::Table, Documents::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_property")
                            .from(Documents::Table, Documents::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_uploaded_by")
                            .from(Documents::Table, Documents::UploadedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Documents::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Documents {
    Table,
    Id,
    Title,
    Description,
    FileName,
    FilePath,
    FileSize,
    MimeType,
    DocumentType,
    LeadId,
    ContactId,
    PropertyId,
    UploadedBy,
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
