use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod activities;
pub mod appointments;
pub mod auth;
pub mod contacts;
pub mod dashboard;
pub mod documents;
pub mod leads;
pub mod properties;
pub mod tasks;

use auth::{CurrentUser, ServerState};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Query string shared by the list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Only records in this status. Ignored by endpoints without a status column.
    pub status: Option<String>,
    /// `all` to list every user's records instead of the caller's.
    pub scope: Option<String>,
}

impl ListQuery {
    pub fn owner<'a>(&self, user: &'a CurrentUser) -> Option<&'a str> {
        scope_owner(self.scope.as_deref(), user)
    }
}

pub(crate) fn scope_owner<'a>(scope: Option<&str>, user: &'a CurrentUser) -> Option<&'a str> {
    match scope {
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        _ => Some(user.id.as_str()),
    }
}

/// Build the application router: public auth + health routes, session-guarded `/api` routes
/// and the Swagger UI.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout));

    let api = Router::new()
        .route("/api/auth/user", get(auth::me))
        .route("/api/auth/user/type", post(auth::set_user_type))
        .route("/api/leads", get(leads::list).post(leads::create))
        .route("/api/leads/:id", get(leads::get).put(leads::update).delete(leads::delete))
        .route("/api/properties", get(properties::list).post(properties::create))
        .route(
            "/api/properties/:id",
            get(properties::get).put(properties::update).delete(properties::delete),
        )
        .route("/api/contacts", get(contacts::list).post(contacts::create))
        .route("/api/contacts/:id", get(contacts::get).put(contacts::update).delete(contacts::delete))
        .route("/api/appointments", get(appointments::list).post(appointments::create))
        .route("/api/appointments/upcoming", get(appointments::upcoming))
        .route(
            "/api/appointments/:id",
            get(appointments::get).put(appointments::update).delete(appointments::delete),
        )
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route("/api/tasks/:id", get(tasks::get).put(tasks::update).delete(tasks::delete))
        .route("/api/documents", get(documents::list).post(documents::create))
        .route(
            "/api/documents/:id",
            get(documents::get).put(documents::update).delete(documents::delete),
        )
        .route("/api/activities", get(activities::list).post(activities::record))
        .route("/api/activities/recent", get(activities::recent))
        .route("/api/dashboard/stats", get(dashboard::stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_session));

    public
        .merge(api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
