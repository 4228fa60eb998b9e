#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use buildmeta_core::Metadata;
use buildmeta_server::{build_router, config, metadata_router, AppState};

fn sample() -> Metadata {
    Metadata::new(
        "1.2.3",
        "2024-05-01T12:00:00Z",
        "abc123",
        "example.org",
        "meta.example.org",
    )
}

fn app() -> Router {
    metadata_router(&sample()).expect("router")
}

async fn send(app: Router, method: Method, uri: &str) -> Response {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(req).await.unwrap()
}

async fn body_string(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn header_str<'a>(resp: &'a Response, name: header::HeaderName) -> &'a str {
    resp.headers()
        .get(name)
        .expect("header present")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn get_returns_ok_with_cache_defeating_headers() {
    let resp = send(app(), Method::GET, "/metadata").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_str(&resp, header::CONTENT_TYPE), "application/json; charset=utf-8");
    assert_eq!(header_str(&resp, header::CACHE_CONTROL), "no-cache, no-store, must-revalidate");
    assert_eq!(header_str(&resp, header::PRAGMA), "no-cache");
    assert_eq!(header_str(&resp, header::EXPIRES), "0");
}

#[tokio::test]
async fn get_body_is_indented_json_with_injected_values() {
    let body = body_string(send(app(), Method::GET, "/metadata").await).await;

    assert!(body.contains("\"Version\": \"1.2.3\""));
    assert!(body.contains("\"CommitSHA\": \"abc123\""));
    assert!(body.contains("\n    \"Domain\": \"example.org\""));
    assert!(body.ends_with("}\n"));

    let v: Value = serde_json::from_str(&body).unwrap();
    let obj = v.as_object().unwrap();
    assert_eq!(obj.len(), 5);
    assert_eq!(obj["Version"], "1.2.3");
    assert_eq!(obj["BuildTime"], "2024-05-01T12:00:00Z");
    assert_eq!(obj["CommitSHA"], "abc123");
    assert_eq!(obj["Domain"], "example.org");
    assert_eq!(obj["CanonicalName"], "meta.example.org");
}

#[tokio::test]
async fn repeated_gets_are_identical() {
    let app = app();
    let first = body_string(send(app.clone(), Method::GET, "/metadata").await).await;
    for _ in 0..5 {
        let resp = send(app.clone(), Method::GET, "/metadata").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, first);
    }
}

#[tokio::test]
async fn non_get_methods_are_rejected() {
    let methods = [
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::OPTIONS,
    ];

    for method in methods {
        let resp = send(app(), method.clone(), "/metadata").await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "method {method}");
        assert_eq!(header_str(&resp, header::CONTENT_TYPE), "text/plain; charset=utf-8");
        assert_eq!(header_str(&resp, header::X_CONTENT_TYPE_OPTIONS), "nosniff");
        assert!(resp.headers().get(header::CACHE_CONTROL).is_none());

        let body = body_string(resp).await;
        assert!(body.contains("method not allowed"), "method {method}");
    }
}

#[tokio::test]
async fn head_is_rejected() {
    // HEAD responses carry no body, so only the status is observable
    let resp = send(app(), Method::HEAD, "/metadata").await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(header_str(&resp, header::X_CONTENT_TYPE_OPTIONS), "nosniff");
}

#[tokio::test]
async fn post_body_is_exact_error_line() {
    let body = body_string(send(app(), Method::POST, "/metadata").await).await;
    assert_eq!(body, "method not allowed\n");
}

#[tokio::test]
async fn other_paths_are_not_found() {
    let resp = send(app(), Method::GET, "/version").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn configured_path_and_overrides_are_served() {
    let cfg = config::load_from_str(
        r#"
version: 1
server:
  path: "/internal/build"
metadata:
  domain: "override.example"
"#,
    )
    .unwrap();
    let state = AppState::with_metadata(cfg, sample()).unwrap();
    let app = build_router(state);

    let resp = send(app.clone(), Method::GET, "/internal/build").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["Domain"], "override.example");
    assert_eq!(v["Version"], "1.2.3");

    let resp = send(app, Method::GET, "/metadata").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn default_state_serves_build_values() {
    let state = AppState::new(config::ServerConfig::default()).unwrap();
    assert_eq!(state.metadata(), &Metadata::from_build());

    let resp = send(build_router(state), Method::GET, "/metadata").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v: Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(v["Version"], buildmeta_core::BUILD.version);
    assert_eq!(v["CommitSHA"], buildmeta_core::BUILD.commit_sha);
}

#[tokio::test]
async fn concurrent_gets_all_succeed() {
    let app = app();
    let mut handles = Vec::new();
    for _ in 0..32 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let resp = send(app, Method::GET, "/metadata").await;
            (resp.status(), body_string(resp).await)
        }));
    }

    let expected = sample().to_pretty_json().unwrap();
    for h in handles {
        let (status, body) = h.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }
}
