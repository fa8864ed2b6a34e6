//! Headline counts for the dashboard.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryTrait};
use serde::Serialize;
use tracing::instrument;

use models::{activity, appointment, lead, property, task};
use crate::{db::activity_service, errors::ServiceError};

pub const RECENT_ACTIVITY_COUNT: u64 = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_leads: u64,
    pub active_properties: u64,
    pub upcoming_appointments: u64,
    pub completed_tasks: u64,
    pub recent_activities: Vec<activity::Model>,
}

/// Counts are restricted to `owner`'s records when given.
#[instrument(skip(db))]
pub async fn stats(db: &DatabaseConnection, owner: Option<&str>) -> Result<DashboardStats, ServiceError> {
    let now: DateTimeWithTimeZone = Utc::now().into();

    let total_leads = lead::Entity::find()
        .apply_if(owner, |q, o| q.filter(lead::Column::AssignedTo.eq(o)))
        .count(db)
        .await?;

    let active_properties = property::Entity::find()
        .filter(property::Column::Status.eq("available"))
        .apply_if(owner, |q, o| q.filter(property::Column::ListingAgent.eq(o)))
        .count(db)
        .await?;

    let upcoming_appointments = appointment::Entity::find()
        .filter(appointment::Column::Status.eq("scheduled"))
        .filter(appointment::Column::StartTime.gt(now))
        .apply_if(owner, |q, o| q.filter(appointment::Column::AssignedTo.eq(o)))
        .count(db)
        .await?;

    let completed_tasks = task::Entity::find()
        .filter(task::Column::Status.eq("completed"))
        .apply_if(owner, |q, o| q.filter(task::Column::AssignedTo.eq(o)))
        .count(db)
        .await?;

    let recent_activities = activity_service::recent_activities(db, owner, RECENT_ACTIVITY_COUNT).await?;

    Ok(DashboardStats {
        total_leads,
        active_properties,
        upcoming_appointments,
        completed_tasks,
        recent_activities,
    })
}
