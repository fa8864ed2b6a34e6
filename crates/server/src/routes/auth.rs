use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};

use models::user;
use service::auth::{
    domain::{AuthUser, LoginInput, RegisterInput},
    repo::seaorm::SeaOrmAuthRepository,
    service::{AuthConfig, AuthService},
    token,
};
use service::user_service;

use crate::errors::JsonApiError;
use crate::extract::ApiJson;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub cookie_secure: bool,
}

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
}

impl ServerState {
    fn auth_service(&self) -> AuthService<SeaOrmAuthRepository> {
        let repo = Arc::new(SeaOrmAuthRepository { db: self.db.clone() });
        AuthService::new(repo, AuthConfig::with_secret(self.auth.jwt_secret.clone(), self.auth.token_ttl_hours))
    }
}

/// The authenticated caller, injected by [`require_session`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutput {
    pub user: AuthUser,
    pub token: String,
}

/// Bearer header first; other `Authorization` schemes fall through to the cookie.
fn bearer_or_cookie(req: &Request) -> Option<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());
    if bearer.is_some() {
        return bearer;
    }
    let jar = CookieJar::from_headers(req.headers());
    jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|t| !t.is_empty())
}

/// Rejects requests without a valid session token and exposes the
/// caller as a [`CurrentUser`] extension.
pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    let path = req.uri().path().to_string();
    let Some(tok) = bearer_or_cookie(&req) else {
        warn!(path = %path, "missing bearer token and auth cookie");
        return Err(JsonApiError::unauthorized("missing session token"));
    };
    let claims = token::verify(&state.auth.jwt_secret, &tok).map_err(|e| {
        warn!(path = %path, err = %e, "token validation failed");
        JsonApiError::unauthorized("invalid or expired session token")
    })?;
    req.extensions_mut().insert(CurrentUser { id: claims.sub });
    Ok(next.run(req).await)
}

fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 201, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(State(state): State<ServerState>, ApiJson(input): ApiJson<RegisterInput>) -> Result<(StatusCode, Json<AuthUser>), JsonApiError> {
    let user = state.auth_service().register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(post, path = "/api/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized")))]
pub async fn login(State(state): State<ServerState>, jar: CookieJar, ApiJson(input): ApiJson<LoginInput>) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = state.auth_service().login(input).await?;
    let Some(token) = session.token else {
        return Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "token generation failed", None));
    };
    let jar = jar.add(session_cookie(token.clone(), state.auth.cookie_secure));
    Ok((jar, Json(LoginOutput { user: session.user, token })))
}

#[utoipa::path(post, path = "/api/logout", tag = "auth", responses((status = 204, description = "Logged Out")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/auth/user", tag = "auth", responses((status = 200, description = "Current user"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not Found")))]
pub async fn me(State(state): State<ServerState>, Extension(current): Extension<CurrentUser>) -> Result<Json<user::Model>, JsonApiError> {
    match user_service::get_user(&state.db, &current.id).await? {
        Some(u) => Ok(Json(u)),
        None => Err(JsonApiError::not_found("user")),
    }
}

#[utoipa::path(post, path = "/api/auth/user/type", tag = "auth", request_body = crate::openapi::UserTypeRequest, responses((status = 200, description = "Updated"), (status = 400, description = "Validation Error"), (status = 401, description = "Unauthorized")))]
pub async fn set_user_type(
    State(state): State<ServerState>,
    Extension(current): Extension<CurrentUser>,
    ApiJson(input): ApiJson<user::UserTypeChange>,
) -> Result<Json<user::Model>, JsonApiError> {
    let updated = user_service::set_user_type(&state.db, &current.id, input).await?;
    info!(user_id = %updated.id, user_type = %updated.user_type, "user type updated");
    Ok(Json(updated))
}
