//! Router tests that need no database: the session middleware answers
//! before any handler touches the connection.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::{self, auth};

const SECRET: &str = "router-test-secret-0123456789";

fn app() -> Router {
    let state = auth::ServerState {
        db: DatabaseConnection::default(),
        auth: auth::ServerAuthConfig { jwt_secret: SECRET.into(), token_ttl_hours: 1, cookie_secure: false },
    };
    routes::build_router(state, CorsLayer::very_permissive())
}

async fn json_body(resp: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = resp.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let resp = app().oneshot(Request::get("/health").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await?["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn missing_token_is_401_json() -> anyhow::Result<()> {
    let resp = app().oneshot(Request::get("/api/leads").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await?;
    assert_eq!(body["message"], "Unauthorized");
    assert!(body["detail"].as_str().unwrap_or_default().contains("missing"));
    Ok(())
}

#[tokio::test]
async fn forged_token_is_rejected() -> anyhow::Result<()> {
    let forged = service::auth::token::issue("some-other-secret-entirely", "u1", 1)?;
    let req = Request::get("/api/dashboard/stats")
        .header(header::AUTHORIZATION, format!("Bearer {forged}"))
        .body(Body::empty())?;
    let resp = app().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::get("/api/tasks")
        .header(header::COOKIE, "auth_token=not-a-jwt")
        .body(Body::empty())?;
    assert_eq!(app().oneshot(req).await?.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn valid_token_reaches_handler() -> anyhow::Result<()> {
    let token = service::auth::token::issue(SECRET, "agent-7", 1)?;

    // Path extraction fails inside the handler, so a 400 proves the guard let it through.
    let req = Request::get("/api/leads/not-a-number")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())?;
    let resp = app().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await?;
    assert_eq!(body["message"], "Validation Error");
    assert!(body["detail"].as_str().unwrap_or_default().contains("not-a-number"));

    let req = Request::get("/api/contacts/abc")
        .header(header::COOKIE, format!("auth_token={token}"))
        .body(Body::empty())?;
    assert_eq!(app().oneshot(req).await?.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn non_bearer_authorization_falls_back_to_cookie() -> anyhow::Result<()> {
    let token = service::auth::token::issue(SECRET, "agent-7", 1)?;
    let req = Request::get("/api/tasks/abc")
        .header(header::AUTHORIZATION, "Basic YWdlbnQ6c2VjcmV0")
        .header(header::COOKIE, format!("auth_token={token}"))
        .body(Body::empty())?;
    assert_eq!(app().oneshot(req).await?.status(), StatusCode::BAD_REQUEST);

    let req = Request::get("/api/tasks/abc")
        .header(header::AUTHORIZATION, "Basic YWdlbnQ6c2VjcmV0")
        .body(Body::empty())?;
    assert_eq!(app().oneshot(req).await?.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn missing_required_field_is_json_400() -> anyhow::Result<()> {
    let token = service::auth::token::issue(SECRET, "agent-7", 1)?;
    let req = Request::post("/api/leads")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"lastName":"Doe","email":"a@b.c"}"#))?;
    let resp = app().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"));
    let body = json_body(resp).await?;
    assert_eq!(body["message"], "Validation Error");
    assert!(body["detail"].as_str().unwrap_or_default().contains("firstName"));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_json_400() -> anyhow::Result<()> {
    let token = service::auth::token::issue(SECRET, "agent-7", 1)?;
    let req = Request::put("/api/appointments/3")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let resp = app().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await?["message"], "Validation Error");

    let req = Request::post("/api/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"email":"a@b.c"}"#))?;
    let resp = app().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await?["message"], "Validation Error");
    Ok(())
}

#[tokio::test]
async fn register_validates_before_touching_the_database() -> anyhow::Result<()> {
    let req = Request::post("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"email":"agent@example.com","password":"short"}"#))?;
    let resp = app().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie() -> anyhow::Result<()> {
    let resp = app().oneshot(Request::post("/api/logout").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let resp = app().oneshot(Request::get("/api-docs/openapi.json").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc = json_body(resp).await?;
    assert!(doc["paths"]["/api/leads/{id}"].is_object());
    Ok(())
}
