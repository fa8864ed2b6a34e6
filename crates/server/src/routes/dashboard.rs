use axum::{extract::State, Extension, Json};
use tracing::debug;

use service::db::dashboard_service::{self, DashboardStats};

use crate::errors::JsonApiError;
use crate::extract::ApiQuery;
use crate::routes::{auth::{CurrentUser, ServerState}, ListQuery};

#[utoipa::path(
    get, path = "/api/dashboard/stats", tag = "dashboard",
    params(ListQuery),
    responses((status = 200, description = "Headline counts and the latest activity"), (status = 401, description = "Unauthorized"))
)]
pub async fn stats(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<DashboardStats>, JsonApiError> {
    let stats = dashboard_service::stats(&state.db, q.owner(&user)).await?;
    debug!(leads = stats.total_leads, tasks_done = stats.completed_tasks, "dashboard stats");
    Ok(Json(stats))
}
