use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use models::lead;
use service::db::lead_service;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{auth::{CurrentUser, ServerState}, ListQuery};

#[utoipa::path(
    get, path = "/api/leads", tag = "leads",
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
) -> Result<Json<Vec<lead::Model>>, JsonApiError> {
    let owner = q.owner(&user);
    let rows = match q.status.as_deref() {
        Some(status) => lead_service::leads_by_status(&state.db, status, owner).await?,
        None => lead_service::list_leads(&state.db, owner).await?,
    };
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/api/leads", tag = "leads",
    request_body = crate::openapi::LeadDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(mut input): ApiJson<lead::NewLead>,
) -> Result<(StatusCode, Json<lead::Model>), JsonApiError> {
    input.assigned_to.get_or_insert_with(|| user.id.clone());
    let created = lead_service::create_lead(&state.db, input).await?;
    info!(id = created.id, user_id = %user.id, "created lead");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/leads/{id}", tag = "leads",
    params(("id" = i32, Path, description = "Lead ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<lead::Model>, JsonApiError> {
    lead_service::get_lead(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("lead"))
}

#[utoipa::path(
    put, path = "/api/leads/{id}", tag = "leads",
    params(("id" = i32, Path, description = "Lead ID")),
    request_body = crate::openapi::LeadDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(changes): ApiJson<lead::LeadChanges>,
) -> Result<Json<lead::Model>, JsonApiError> {
    let updated = lead_service::update_lead(&state.db, id, changes).await?;
    info!(id, "updated lead");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/leads/{id}", tag = "leads",
    params(("id" = i32, Path, description = "Lead ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    if lead_service::delete_lead(&state.db, id).await? {
        info!(id, "deleted lead");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("lead"))
    }
}
