use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use models::document;
use service::db::document_service;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{auth::{CurrentUser, ServerState}, ListQuery};

/// Documents are metadata only; `filePath` points at storage managed elsewhere.
#[utoipa::path(
    get, path = "/api/documents", tag = "documents",
    params(ListQuery),
    responses((status = 200, description = "List OK"), (status = 401, description = "Unauthorized"))
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<Vec<document::Model>>, JsonApiError> {
    Ok(Json(document_service::list_documents(&state.db, q.owner(&user)).await?))
}

#[utoipa::path(
    post, path = "/api/documents", tag = "documents",
    request_body = crate::openapi::DocumentDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(mut input): ApiJson<document::NewDocument>,
) -> Result<(StatusCode, Json<document::Model>), JsonApiError> {
    input.uploaded_by.get_or_insert_with(|| user.id.clone());
    let created = document_service::create_document(&state.db, input).await?;
    info!(id = created.id, file = %created.file_name, "registered document");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/documents/{id}", tag = "documents",
    params(("id" = i32, Path, description = "Document ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<document::Model>, JsonApiError> {
    document_service::get_document(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("document"))
}

#[utoipa::path(
    put, path = "/api/documents/{id}", tag = "documents",
    params(("id" = i32, Path, description = "Document ID")),
    request_body = crate::openapi::DocumentDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(changes): ApiJson<document::DocumentChanges>,
) -> Result<Json<document::Model>, JsonApiError> {
    Ok(Json(document_service::update_document(&state.db, id, changes).await?))
}

#[utoipa::path(
    delete, path = "/api/documents/{id}", tag = "documents",
    params(("id" = i32, Path, description = "Document ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    if document_service::delete_document(&state.db, id).await? {
        info!(id, "deleted document");
        return Ok(StatusCode::NO_CONTENT);
    }
    Err(JsonApiError::not_found("document"))
}
