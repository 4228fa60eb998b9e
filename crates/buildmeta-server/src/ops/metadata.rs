use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;

/// Default mount point of [`metadata_endpoint`].
pub const METADATA_HANDLER_PATH: &str = "/metadata";

const METHOD_NOT_ALLOWED_BODY: &str = "method not allowed\n";

/// Serve the pre-rendered metadata document. GET only.
///
/// Mounted with `any` so that other methods get a plain-text 405 from here
/// instead of the router's empty one.
pub async fn metadata_endpoint(method: Method, State(state): State<AppState>) -> Response {
    if method != Method::GET {
        tracing::debug!(%method, "metadata: method not allowed");
        return method_not_allowed();
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        state.body(),
    )
        .into_response()
}

fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        METHOD_NOT_ALLOWED_BODY,
    )
        .into_response()
}
