//! The manage service the click handlers talk to.
//!
//! Layout:
//! - `/service/healthcheck`
//! - `/service/manage/other/{hello,wait,json,path}`
//! - everything outside `/service` is served from the static directory

pub mod error;
mod static_files;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{any, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use error::AppError;

/// Shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    wait_delay: Duration,
    static_dir: Arc<PathBuf>,
}

impl From<&ServerConfig> for AppState {
    fn from(config: &ServerConfig) -> Self {
        Self {
            wait_delay: config.wait_delay,
            static_dir: Arc::new(config.static_dir.clone()),
        }
    }
}

/// Build the full application router.
pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .nest("/service", service_router())
        .fallback(static_files::serve)
        .with_state(AppState::from(config))
        .layer(TraceLayer::new_for_http())
}

fn service_router() -> Router<AppState> {
    Router::new()
        .route("/healthcheck", any(healthcheck))
        .nest("/manage/other", other_router())
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
}

fn other_router() -> Router<AppState> {
    Router::new()
        .route("/hello", any(hello))
        .route("/wait", any(wait))
        .route("/json", post(json_echo))
        .route("/path", any(path_echo))
        .route("/path/{*rest}", any(path_echo))
        .method_not_allowed_fallback(not_found)
}

#[derive(Serialize)]
struct Message {
    message: &'static str,
}

#[derive(Serialize)]
struct PathEcho {
    #[serde(rename = "fullPath")]
    full_path: String,
}

async fn healthcheck() -> impl IntoResponse {
    (StatusCode::OK, "Success")
}

async fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello,World!",
    })
}

async fn wait(State(state): State<AppState>) -> Json<Message> {
    tokio::time::sleep(state.wait_delay).await;
    Json(Message {
        message: "wait now!",
    })
}

/// Echo a JSON body. A missing `Content-Type` is accepted; one that is
/// present must be JSON.
async fn json_echo(headers: HeaderMap, body: Bytes) -> Result<Json<Value>, AppError> {
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        let is_json = content_type.to_str().is_ok_and(is_json_media_type);
        if !is_json {
            return Err(AppError::UnsupportedMediaType);
        }
    }
    let value: Value = serde_json::from_slice(&body)?;
    Ok(Json(value))
}

/// `application/json` or any `application/*+json`, parameters ignored.
fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

async fn path_echo(OriginalUri(uri): OriginalUri) -> Json<PathEcho> {
    Json(PathEcho {
        full_path: uri.path().to_string(),
    })
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Bind `config.addr` and serve until Ctrl+C.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    run(listener, config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, config: &ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("listener has no local address")?;
    tracing::info!(
        %addr,
        static_dir = %config.static_dir.display(),
        wait_delay_ms = config.wait_delay.as_millis() as u64,
        "serving"
    );

    axum::serve(listener, router(config))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server stopped with an error")?;

    tracing::info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_media_types() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("application/json; charset=utf-8"));
        assert!(is_json_media_type("Application/JSON"));
        assert!(is_json_media_type("application/problem+json"));
    }

    #[test]
    fn other_media_types() {
        assert!(!is_json_media_type("text/plain"));
        assert!(!is_json_media_type("text/json"));
        assert!(!is_json_media_type("application/xml"));
        assert!(!is_json_media_type(""));
    }
}
