use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use models::contact;
use service::db::contact_service;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{auth::{CurrentUser, ServerState}, ListQuery};

#[utoipa::path(
    get, path = "/api/contacts", tag = "contacts",
    params(ListQuery),
    responses((status = 200, description = "List OK"), (status = 401, description = "Unauthorized"))
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<Vec<contact::Model>>, JsonApiError> {
    Ok(Json(contact_service::list_contacts(&state.db, q.owner(&user)).await?))
}

#[utoipa::path(
    post, path = "/api/contacts", tag = "contacts",
    request_body = crate::openapi::ContactDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(mut input): ApiJson<contact::NewContact>,
) -> Result<(StatusCode, Json<contact::Model>), JsonApiError> {
    input.assigned_to.get_or_insert_with(|| user.id.clone());
    let created = contact_service::create_contact(&state.db, input).await?;
    info!(id = created.id, user_id = %user.id, "created contact");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/contacts/{id}", tag = "contacts",
    params(("id" = i32, Path, description = "Contact ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<contact::Model>, JsonApiError> {
    contact_service::get_contact(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("contact"))
}

#[utoipa::path(
    put, path = "/api/contacts/{id}", tag = "contacts",
    params(("id" = i32, Path, description = "Contact ID")),
    request_body = crate::openapi::ContactDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(changes): ApiJson<contact::ContactChanges>,
) -> Result<Json<contact::Model>, JsonApiError> {
    Ok(Json(contact_service::update_contact(&state.db, id, changes).await?))
}

#[utoipa::path(
    delete, path = "/api/contacts/{id}", tag = "contacts",
    params(("id" = i32, Path, description = "Contact ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    match contact_service::delete_contact(&state.db, id).await? {
        true => Ok(StatusCode::NO_CONTENT),
        false => Err(JsonApiError::not_found("contact")),
    }
}
