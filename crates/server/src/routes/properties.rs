use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use models::property;
use service::db::property_service;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{auth::{CurrentUser, ServerState}, ListQuery};

#[utoipa::path(
    get, path = "/api/properties", tag = "properties",
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
) -> Result<Json<Vec<property::Model>>, JsonApiError> {
    let owner = q.owner(&user);
    let rows = match q.status.as_deref() {
        Some(status) => property_service::properties_by_status(&state.db, status, owner).await?,
        None => property_service::list_properties(&state.db, owner).await?,
    };
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/api/properties", tag = "properties",
    request_body = crate::openapi::PropertyDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(mut input): ApiJson<property::NewProperty>,
) -> Result<(StatusCode, Json<property::Model>), JsonApiError> {
    input.listing_agent.get_or_insert_with(|| user.id.clone());
    let created = property_service::create_property(&state.db, input).await?;
    info!(id = created.id, user_id = %user.id, "listed property");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/properties/{id}", tag = "properties",
    params(("id" = i32, Path, description = "Property ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<property::Model>, JsonApiError> {
    match property_service::get_property(&state.db, id).await? {
        Some(p) => Ok(Json(p)),
        None => Err(JsonApiError::not_found("property")),
    }
}

#[utoipa::path(
    put, path = "/api/properties/{id}", tag = "properties",
    params(("id" = i32, Path, description = "Property ID")),
    request_body = crate::openapi::PropertyDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(changes): ApiJson<property::PropertyChanges>,
) -> Result<Json<property::Model>, JsonApiError> {
    Ok(Json(property_service::update_property(&state.db, id, changes).await?))
}

#[utoipa::path(
    delete, path = "/api/properties/{id}", tag = "properties",
    params(("id" = i32, Path, description = "Property ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    if !property_service::delete_property(&state.db, id).await? {
        return Err(JsonApiError::not_found("property"));
    }
    info!(id, "deleted property");
    Ok(StatusCode::NO_CONTENT)
}
