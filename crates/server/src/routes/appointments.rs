use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;

use models::appointment;
use service::db::appointment_service;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{auth::{CurrentUser, ServerState}, ListQuery};

#[utoipa::path(
    get, path = "/api/appointments", tag = "appointments",
    params(ListQuery),
    responses((status = 200, description = "List OK, latest start first"), (status = 401, description = "Unauthorized"))
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<Vec<appointment::Model>>, JsonApiError> {
    Ok(Json(appointment_service::list_appointments(&state.db, q.owner(&user)).await?))
}

#[utoipa::path(
    get, path = "/api/appointments/upcoming", tag = "appointments",
    params(ListQuery),
    responses((status = 200, description = "Scheduled appointments in the future, soonest first"))
)]
pub async fn upcoming(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiQuery(q): ApiQuery<ListQuery>,
) -> Result<Json<Vec<appointment::Model>>, JsonApiError> {
    Ok(Json(appointment_service::upcoming_appointments(&state.db, q.owner(&user)).await?))
}

#[utoipa::path(
    post, path = "/api/appointments", tag = "appointments",
    request_body = crate::openapi::AppointmentDoc,
    responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(mut input): ApiJson<appointment::NewAppointment>,
) -> Result<(StatusCode, Json<appointment::Model>), JsonApiError> {
    input.assigned_to.get_or_insert_with(|| user.id.clone());
    let created = appointment_service::create_appointment(&state.db, input).await?;
    info!(id = created.id, start = %created.start_time, "scheduled appointment");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/appointments/{id}", tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<appointment::Model>, JsonApiError> {
    appointment_service::get_appointment(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found("appointment"))
}

#[utoipa::path(
    put, path = "/api/appointments/{id}", tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    request_body = crate::openapi::AppointmentDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(changes): ApiJson<appointment::AppointmentChanges>,
) -> Result<Json<appointment::Model>, JsonApiError> {
    Ok(Json(appointment_service::update_appointment(&state.db, id, changes).await?))
}

#[utoipa::path(
    delete, path = "/api/appointments/{id}", tag = "appointments",
    params(("id" = i32, Path, description = "Appointment ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, JsonApiError> {
    if appointment_service::delete_appointment(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(JsonApiError::not_found("appointment"))
    }
}
