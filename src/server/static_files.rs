//! Static hosting for everything outside `/service`.

use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use super::AppState;
use super::error::AppError;

/// Serve `path` from the static directory.
///
/// A directory requested without a trailing slash is redirected to the
/// slash form so relative links in its `index.html` resolve.
pub async fn serve(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path().to_string();

    if needs_slash(&state.static_dir, &path).await {
        return match HeaderValue::from_str(&format!("{path}/")) {
            Ok(location) => {
                (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
            }
            Err(e) => {
                tracing::error!(error = %e, %path, "cannot build redirect");
                AppError::Internal.into_response()
            }
        };
    }

    match ServeDir::new(state.static_dir.as_path()).oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

async fn needs_slash(root: &Path, path: &str) -> bool {
    if path.ends_with('/') || path.split('/').any(|segment| segment == "..") {
        return false;
    }
    tokio::fs::metadata(root.join(path.trim_start_matches('/')))
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}
