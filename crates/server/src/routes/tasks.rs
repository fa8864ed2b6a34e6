use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use models::task;
use service::db::task_service;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{auth::{CurrentUser, ServerState}, ListQuery};

#[utoipa::path(
    get, path = "/api/tasks", tag = "tasks",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<Vec<task::Model>>, JsonApiError> {
    let owner = q.owner(&user);
    let rows = if let Some(status) = q.status.as_deref() {
        task_service::tasks_by_status(&state.db, status, owner).await?
    } else {
        task_service::list_tasks(&state.db, owner).await?
    };
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/api/tasks", tag = "tasks",
    request_body = crate::openapi::TaskDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(mut input): ApiJson<task::NewTask>,
) -> Result<(StatusCode, Json<task::Model>), JsonApiError> {
    input.assigned_to.get_or_insert_with(|| user.id.clone());
    let created = task_service::create_task(&state.db, input).await?;
    info!(id = created.id, priority = %created.priority, "created task");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/tasks/{id}", tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<task::Model>, JsonApiError> {
    task_service::get_task(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("task"))
}

#[utoipa::path(
    put, path = "/api/tasks/{id}", tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = crate::openapi::TaskDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(changes): ApiJson<task::TaskChanges>,
) -> Result<Json<task::Model>, JsonApiError> {
    let updated = task_service::update_task(&state.db, id, changes).await?;
    info!(id, status = %updated.status, "updated task");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/tasks/{id}", tag = "tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    if task_service::delete_task(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("task"))
    }
}
