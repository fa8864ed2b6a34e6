use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait};
use tracing::instrument;

use models::activity;
use crate::{errors::ServiceError, pagination::{Page, Pagination}};

pub const DEFAULT_RECENT_LIMIT: u64 = 10;

fn scoped(owner: Option<&str>) -> sea_orm::Select<activity::Entity> {
    activity::Entity::find()
        .apply_if(owner, |q, o| q.filter(activity::Column::UserId.eq(o)))
        .order_by_desc(activity::Column::CreatedAt)
        .order_by_desc(activity::Column::Id)
}

/// Append an entry to the log.
#[instrument(skip(db, input), fields(activity_type = %input.activity_type))]
pub async fn record_activity(db: &DatabaseConnection, input: activity::NewActivity) -> Result<activity::Model, ServiceError> {
    Ok(activity::insert(db, input).await?)
}

/// All entries, newest first.
pub async fn list_activities(db: &DatabaseConnection, owner: Option<&str>) -> Result<Vec<activity::Model>, ServiceError> {
    Ok(scoped(owner).all(db).await?)
}

/// The `limit` newest entries.
pub async fn recent_activities(db: &DatabaseConnection, owner: Option<&str>, limit: u64) -> Result<Vec<activity::Model>, ServiceError> {
    let limit = if limit == 0 { DEFAULT_RECENT_LIMIT } else { limit.min(100) };
    Ok(scoped(owner).limit(limit).all(db).await?)
}

/// Paginated feed, newest first.
pub async fn list_activities_paginated(
    db: &DatabaseConnection,
    owner: Option<&str>,
    opts: Pagination,
) -> Result<Page<activity::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let paginator = scoped(owner).paginate(db, per_page);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page_idx).await?;
    Ok(Page {
        items,
        page: page_idx + 1,
        per_page,
        total: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}
