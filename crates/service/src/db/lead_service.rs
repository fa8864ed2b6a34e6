use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QueryTrait, TransactionTrait};
use tracing::{info, instrument};

use models::{activity::{self, Audited}, lead, validate};
use crate::errors::ServiceError;

/// Create a lead and log it, atomically.
#[instrument(skip(db, input), fields(email = %input.email))]
pub async fn create_lead(db: &DatabaseConnection, input: lead::NewLead) -> Result<lead::Model, ServiceError> {
    let txn = db.begin().await?;
    let created = lead::insert(&txn, input).await?;
    activity::insert(&txn, created.creation_activity()).await?;
    txn.commit().await?;
    info!(lead_id = created.id, "lead_created");
    Ok(created)
}

/// Leads newest first, optionally only those assigned to `owner`.
pub async fn list_leads(db: &DatabaseConnection, owner: Option<&str>) -> Result<Vec<lead::Model>, ServiceError> {
    let leads = lead::Entity::find()
        .apply_if(owner, |q, o| q.filter(lead::Column::AssignedTo.eq(o)))
        .order_by_desc(lead::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(leads)
}

pub async fn leads_by_status(db: &DatabaseConnection, status: &str, owner: Option<&str>) -> Result<Vec<lead::Model>, ServiceError> {
    validate::one_of("status", status, lead::STATUSES)?;
    let leads = lead::Entity::find()
        .filter(lead::Column::Status.eq(status))
        .apply_if(owner, |q, o| q.filter(lead::Column::AssignedTo.eq(o)))
        .order_by_desc(lead::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(leads)
}

pub async fn get_lead(db: &DatabaseConnection, id: i32) -> Result<Option<lead::Model>, ServiceError> {
    Ok(lead::Entity::find_by_id(id).one(db).await?)
}

pub async fn update_lead(db: &DatabaseConnection, id: i32, changes: lead::LeadChanges) -> Result<lead::Model, ServiceError> {
    let mut am: lead::ActiveModel = lead::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("lead"))?
        .into();
    changes.apply(&mut am)?;
    Ok(am.update(db).await?)
}

/// Returns whether a row was removed.
pub async fn delete_lead(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = lead::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
