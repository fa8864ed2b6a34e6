//! Create `activities` table: the append-only audit log.
//! Neither `entity_id` nor `user_id` is a foreign key: rows are never rewritten
//! and outlive the records and users they describe.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(pk_auto(Activities::Id))
                    .col(string(Activities::Title).not_null())
                    .col(ColumnDef::new(Activities::Description).text().null())
                    .col(string_len(Activities::ActivityType, 64).not_null())
                    .col(ColumnDef::new(Activities::EntityType).string_len(32).null())
                    .col(ColumnDef::new(Activities::EntityId).integer().null())
                    .col(ColumnDef::new(Activities::UserId).string_len(64).null())
                    .col(timestamp_with_time_zone(Activities::CreatedAt).not_null().default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Activities::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Activities {
    Table,
    Id,
    Title,
    Description,
    ActivityType,
    EntityType,
    EntityId,
    UserId,
    CreatedAt,
}
