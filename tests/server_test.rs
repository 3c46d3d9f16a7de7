use std::fs;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

use beacon::config::ServerConfig;
use beacon::server::router;

/// Router over a temp static dir with `index.html` and `docs/index.html`.
fn app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("index.html"), "<h1>root</h1>").unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("docs").join("index.html"), "<h1>docs</h1>").unwrap();

    let config = ServerConfig {
        static_dir: dir.path().to_path_buf(),
        wait_delay: Duration::from_millis(10),
        ..ServerConfig::default()
    };
    (router(&config), dir)
}

async fn send(app: Router, req: Request<Body>) -> Response {
    app.oneshot(req).await.unwrap()
}

async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json_body(resp: Response) -> Value {
    serde_json::from_str(&text(resp).await).unwrap()
}

// ── /service ──────────────────────────────────────────────────────

#[tokio::test]
async fn healthcheck_says_success() {
    let (app, _dir) = app();
    let resp = get(app, "/service/healthcheck").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(text(resp).await, "Success");
}

#[tokio::test]
async fn hello_returns_message() {
    let (app, _dir) = app();
    let resp = get(app, "/service/manage/other/hello").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({"message": "Hello,World!"}));
}

#[tokio::test]
async fn hello_accepts_any_method() {
    let (app, _dir) = app();
    let req = Request::post("/service/manage/other/hello")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(app, req).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn wait_answers_after_delay() {
    let (app, _dir) = app();
    let started = std::time::Instant::now();
    let resp = get(app, "/service/manage/other/wait").await;
    assert!(started.elapsed() >= Duration::from_millis(10));
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({"message": "wait now!"}));
}

#[tokio::test]
async fn json_is_echoed() {
    let (app, _dir) = app();
    let req = Request::post("/service/manage/other/json")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"a":1,"b":[true,null]}"#))
        .unwrap();
    let resp = send(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({"a": 1, "b": [true, null]}));
}

#[tokio::test]
async fn json_without_content_type_is_echoed() {
    let (app, _dir) = app();
    let req = Request::post("/service/manage/other/json")
        .body(Body::from(r#"{"a":1}"#))
        .unwrap();
    let resp = send(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({"a": 1}));
}

#[tokio::test]
async fn json_with_charset_parameter_is_echoed() {
    let (app, _dir) = app();
    let req = Request::post("/service/manage/other/json")
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
        .body(Body::from("[1,2]"))
        .unwrap();
    let resp = send(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!([1, 2]));
}

#[tokio::test]
async fn json_with_text_content_type_is_415() {
    let (app, _dir) = app();
    let req = Request::post("/service/manage/other/json")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"a":1}"#))
        .unwrap();
    let resp = send(app, req).await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(text(resp).await, "Unsupported media type");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (app, _dir) = app();
    let req = Request::post("/service/manage/other/json")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = send(app, req).await;
    if cfg!(debug_assertions) {
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(!text(resp).await.is_empty());
    } else {
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn json_with_wrong_method_is_empty_404() {
    let (app, _dir) = app();
    let resp = get(app, "/service/manage/other/json").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(text(resp).await.is_empty());
}

#[tokio::test]
async fn path_echoes_full_request_path() {
    let (app, _dir) = app();
    let resp = get(app.clone(), "/service/manage/other/path/a/b").await;
    assert_eq!(
        json_body(resp).await,
        json!({"fullPath": "/service/manage/other/path/a/b"})
    );

    let resp = get(app, "/service/manage/other/path").await;
    assert_eq!(
        json_body(resp).await,
        json!({"fullPath": "/service/manage/other/path"})
    );
}

#[tokio::test]
async fn unknown_service_routes_are_empty_404() {
    let (app, _dir) = app();
    for uri in ["/service/nope", "/service/manage/other/nope", "/service"] {
        let resp = get(app.clone(), uri).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        assert!(text(resp).await.is_empty(), "{uri}");
    }
}

// ── static ────────────────────────────────────────────────────────

#[tokio::test]
async fn root_serves_index() {
    let (app, _dir) = app();
    let resp = get(app, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(text(resp).await, "<h1>root</h1>");
}

#[tokio::test]
async fn directory_without_slash_redirects() {
    let (app, _dir) = app();
    let resp = get(app, "/docs").await;
    assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(resp.headers()[header::LOCATION], "/docs/");
}

#[tokio::test]
async fn directory_with_slash_serves_index() {
    let (app, _dir) = app();
    let resp = get(app, "/docs/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(text(resp).await, "<h1>docs</h1>");
}

#[tokio::test]
async fn missing_static_file_is_404() {
    let (app, _dir) = app();
    let resp = get(app, "/nope.js").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
