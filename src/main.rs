mod routes;
mod controllers;
mod services;
mod models;
mod api_docs;
mod shared_state;
mod config;
mod error;
mod logging;

use std::net::SocketAddr;
use anyhow::Context;
use axum::{Router, routing::get, response::Html};
use crate::routes::calculation_routes::api_routes;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;
use crate::api_docs::ApiDoc;
use crate::shared_state::AppState;
use crate::config::Config;

use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

const CONFIG_ENV: &str = "SOLARMAP_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.json";

fn build_app(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    let app = Router::new()
        .nest("/api", api_routes(state))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }));

    // The form/map front-end is external; serve it only when configured
    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&path).with_context(|| format!("loading configuration from {path}"))?;

    // 2. Logging
    logging::init(&config.logging)?;
    tracing::info!(config = %path, locale = ?config.locale, "configuration loaded");

    // 3. Router
    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_addr()))?;
    let app = build_app(AppState::new(config));

    // 4. Serve
    tracing::info!("API Server listening on http://{}", addr);
    tracing::info!("Scalar UI: http://{}/scalar", addr);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .context("HTTP server terminated")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_scalar_page_served() {
        let server = TestServer::new(build_app(AppState::new(Config::default()))).unwrap();
        let response = server.get("/scalar").await;
        response.assert_status_ok();
        assert!(response.text().to_lowercase().contains("<html"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404_without_static_dir() {
        let server = TestServer::new(build_app(AppState::new(Config::default()))).unwrap();
        server.get("/index.html").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_static_dir_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<p>form</p>").unwrap();

        let mut config = Config::default();
        config.server.static_dir = Some(dir.path().display().to_string());

        let server = TestServer::new(build_app(AppState::new(config))).unwrap();
        let response = server.get("/index.html").await;
        response.assert_status_ok();
        response.assert_text("<p>form</p>");
    }
}
