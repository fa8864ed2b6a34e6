use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QueryTrait, TransactionTrait};
use tracing::{info, instrument};

use models::{activity::{self, Audited}, property, validate};
use crate::errors::ServiceError;

/// Create a listing and log it, atomically.
#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_property(db: &DatabaseConnection, input: property::NewProperty) -> Result<property::Model, ServiceError> {
    let txn = db.begin().await?;
    let created = property::insert(&txn, input).await?;
    activity::insert(&txn, created.creation_activity()).await?;
    txn.commit().await?;
    info!(property_id = created.id, "property_created");
    Ok(created)
}

/// Listings newest first, optionally only those of one listing agent.
pub async fn list_properties(db: &DatabaseConnection, owner: Option<&str>) -> Result<Vec<property::Model>, ServiceError> {
    let rows = property::Entity::find()
        .apply_if(owner, |q, o| q.filter(property::Column::ListingAgent.eq(o)))
        .order_by_desc(property::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn properties_by_status(db: &DatabaseConnection, status: &str, owner: Option<&str>) -> Result<Vec<property::Model>, ServiceError> {
    validate::one_of("status", status, property::STATUSES)?;
    let rows = property::Entity::find()
        .filter(property::Column::Status.eq(status))
        .apply_if(owner, |q, o| q.filter(property::Column::ListingAgent.eq(o)))
        .order_by_desc(property::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_property(db: &DatabaseConnection, id: i32) -> Result<Option<property::Model>, ServiceError> {
    Ok(property::Entity::find_by_id(id).one(db).await?)
}

pub async fn update_property(db: &DatabaseConnection, id: i32, changes: property::PropertyChanges) -> Result<property::Model, ServiceError> {
    let mut am: property::ActiveModel = property::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("property"))?
        .into();
    changes.apply(&mut am)?;
    Ok(am.update(db).await?)
}

pub async fn delete_property(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = property::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
