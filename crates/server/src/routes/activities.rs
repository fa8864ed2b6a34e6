use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use models::activity;
use service::db::activity_service;
use service::pagination::{Page, Pagination};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::routes::{auth::{CurrentUser, ServerState}, scope_owner};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// `all` to include every user's entries.
    pub scope: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    /// Defaults to 10, capped at 100.
    pub limit: Option<u64>,
    pub scope: Option<String>,
}

#[utoipa::path(
    get, path = "/api/activities", tag = "activities",
    params(FeedQuery),
    responses((status = 200, description = "Page of activity entries, newest first"))
)]
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiQuery(q): ApiQuery<FeedQuery>,
) -> Result<Json<Page<activity::Model>>, JsonApiError> {
    let defaults = Pagination::default();
    let opts = Pagination {
        page: q.page.unwrap_or(defaults.page),
        per_page: q.per_page.unwrap_or(defaults.per_page),
    };
    let owner = scope_owner(q.scope.as_deref(), &user);
    Ok(Json(activity_service::list_activities_paginated(&state.db, owner, opts).await?))
}

#[utoipa::path(
    get, path = "/api/activities/recent", tag = "activities",
    params(RecentQuery),
    responses((status = 200, description = "Most recent activity entries"))
)]
pub async fn recent(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiQuery(q): ApiQuery<RecentQuery>,
) -> Result<Json<Vec<activity::Model>>, JsonApiError> {
    let limit = q.limit.unwrap_or(activity_service::DEFAULT_RECENT_LIMIT);
    let owner = scope_owner(q.scope.as_deref(), &user);
    Ok(Json(activity_service::recent_activities(&state.db, owner, limit).await?))
}

#[utoipa::path(
    post, path = "/api/activities", tag = "activities",
    request_body = crate::openapi::ActivityDoc,
    responses((status = 201, description = "Recorded"), (status = 400, description = "Validation Error"))
)]
pub async fn record(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    ApiJson(mut input): ApiJson<activity::NewActivity>,
) -> Result<(StatusCode, Json<activity::Model>), JsonApiError> {
    input.user_id.get_or_insert_with(|| user.id.clone());
    let created = activity_service::record_activity(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
