use std::{future::Future, net::SocketAddr};

use axum::http::{HeaderValue, Method};
use configs::{AppConfig, CorsConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth};

/// Permissive unless a single origin is configured, in which case credentials are allowed.
fn build_cors(cfg: &CorsConfig) -> Result<CorsLayer, StartupError> {
    let origin = cfg.origin.trim();
    if origin.is_empty() {
        return Ok(CorsLayer::very_permissive());
    }
    let value = HeaderValue::from_str(origin)
        .map_err(|e| StartupError::InvalidConfig(format!("cors.origin: {e}")))?;
    Ok(CorsLayer::new()
        .allow_origin(value)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION])
        .allow_credentials(true))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Connect, migrate and serve until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(format!("migration failed: {e}")))?;
        info!("schema migrations applied");
    } else {
        warn!("auto_migrate disabled; assuming schema is current");
    }

    let state = auth::ServerState {
        db,
        auth: auth::ServerAuthConfig {
            jwt_secret: cfg.auth.session_secret.clone(),
            token_ttl_hours: cfg.auth.token_ttl_hours,
            cookie_secure: cfg.auth.cookie_secure,
        },
    };
    let app = routes::build_router(state, build_cors(&cfg.cors)?);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(anyhow::Error::from)?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_rejects_unprintable_origin() {
        let cfg = CorsConfig { origin: "http://bad\norigin".into() };
        assert!(matches!(build_cors(&cfg), Err(StartupError::InvalidConfig(_))));
        assert!(build_cors(&CorsConfig::default()).is_ok());
        assert!(build_cors(&CorsConfig { origin: "http://localhost:5173".into() }).is_ok());
    }

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = 8080;
        assert_eq!(bind_addr(&cfg).unwrap().port(), 8080);
        cfg.server.host = "not a host".into();
        assert!(bind_addr(&cfg).is_err());
    }
}
