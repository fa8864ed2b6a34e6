use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (index name, table, column) for every owner and status filter.
const INDEXES: &[(&str, &str, &str)] = &[
    ("idx_leads_assigned_to", "leads", "assigned_to"),
    ("idx_leads_status", "leads", "status"),
    ("idx_properties_listing_agent", "properties", "listing_agent"),
    ("idx_properties_status", "properties", "status"),
    ("idx_contacts_assigned_to", "contacts", "assigned_to"),
    ("idx_appointments_assigned_to", "appointments", "assigned_to"),
    ("idx_appointments_start_time", "appointments", "start_time"),
    ("idx_tasks_assigned_to", "tasks", "assigned_to"),
    ("idx_tasks_status", "tasks", "status"),
    ("idx_documents_uploaded_by", "documents", "uploaded_by"),
    ("idx_activities_user", "activities", "user_id"),
    ("idx_activities_created_at", "activities", "created_at"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(*name)
                        .table(Alias::new(*table))
                        .col(Alias::new(*column))
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
