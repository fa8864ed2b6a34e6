use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QueryTrait, TransactionTrait};
use tracing::{info, instrument};

use models::{activity::{self, Audited}, task, validate};
use crate::errors::ServiceError;

#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_task(db: &DatabaseConnection, input: task::NewTask) -> Result<task::Model, ServiceError> {
    let txn = db.begin().await?;
    let created = task::insert(&txn, input).await?;
    activity::insert(&txn, created.creation_activity()).await?;
    txn.commit().await?;
    info!(task_id = created.id, "task_created");
    Ok(created)
}

pub async fn list_tasks(db: &DatabaseConnection, owner: Option<&str>) -> Result<Vec<task::Model>, ServiceError> {
    let rows = task::Entity::find()
        .apply_if(owner, |q, o| q.filter(task::Column::AssignedTo.eq(o)))
        .order_by_desc(task::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn tasks_by_status(db: &DatabaseConnection, status: &str, owner: Option<&str>) -> Result<Vec<task::Model>, ServiceError> {
    validate::one_of("status", status, task::STATUSES)?;
    let rows = task::Entity::find()
        .filter(task::Column::Status.eq(status))
        .apply_if(owner, |q, o| q.filter(task::Column::AssignedTo.eq(o)))
        .order_by_desc(task::Column::CreatedAt)
        .all(db)
        .await?;
    Ok(rows)
}

pub async fn get_task(db: &DatabaseConnection, id: i32) -> Result<Option<task::Model>, ServiceError> {
    Ok(task::Entity::find_by_id(id).one(db).await?)
}

pub async fn update_task(db: &DatabaseConnection, id: i32, changes: task::TaskChanges) -> Result<task::Model, ServiceError> {
    let mut am: task::ActiveModel = task::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("task"))?
        .into();
    changes.apply(&mut am)?;
    Ok(am.update(db).await?)
}

pub async fn delete_task(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = task::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
