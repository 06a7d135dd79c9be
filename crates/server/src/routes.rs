//! HTTP surface of the college finder.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use anyhow::Context;
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::emitter::StreamEmitter;
use crate::error::ApiError;
use crate::orchestrator::CollegeFinder;

pub const FINDER_PATH: &str = "/api/college-finder";
pub const HEALTH_PATH: &str = "/health";

const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[derive(Clone)]
pub struct AppState {
    pub finder: CollegeFinder,
    pub emitter: StreamEmitter,
}

#[derive(Debug, Deserialize)]
struct FinderRequest {
    query: Option<String>,
}

pub fn make_app(state: AppState) -> Router {
    Router::new()
        .route(FINDER_PATH, post(find_colleges).options(preflight))
        .route(HEALTH_PATH, get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Validate the request, then stream the answer.
///
/// The body is parsed by hand so that a malformed body maps to 500 rather
/// than axum's own 4xx rejections.
async fn find_colleges(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    let request: FinderRequest =
        serde_json::from_slice(&body).context("Malformed college finder request")?;

    let query = request
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or(ApiError::QueryRequired)?;
    debug!(query_len = query.len(), "Accepted college finder request");

    let finder = state.finder.clone();
    let stream = state
        .emitter
        .spawn(async move { finder.answer(&query).await });

    Ok((
        [(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_CONTENT_TYPE))],
        Body::from_stream(stream),
    )
        .into_response())
}

async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "colleges": state.finder.catalog().len(),
        "llm": state.finder.llm_available(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::{PacingConfig, APOLOGY};
    use crate::fallback;
    use crate::responder::ResponseGenerator;
    use axum::body::to_bytes;
    use axum::http::{Method, Request};
    use catalog::Catalog;
    use pipeline::MatchPolicy;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let finder = CollegeFinder::new(
            Arc::new(Catalog::builtin().unwrap()),
            MatchPolicy::All,
            ResponseGenerator::fallback_only(),
        );
        make_app(AppState {
            finder,
            emitter: StreamEmitter::new(PacingConfig::disabled()),
        })
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(FINDER_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_and_blank_queries_are_rejected() {
        for body in [r#"{}"#, r#"{"query":null}"#, r#"{"query":""}"#, r#"{"query":"   "}"#] {
            let response = app().oneshot(post_json(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(body_text(response).await, r#"{"error":"Query is required"}"#);
        }
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_internal_errors() {
        for body in ["not json", r#"{"query":42}"#, "null"] {
            let response = app().oneshot(post_json(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "body: {body}");
            assert_eq!(body_text(response).await, r#"{"error":"Internal server error"}"#);
        }
    }

    #[tokio::test]
    async fn test_query_streams_fallback_answer() {
        let query = "engineering colleges in Delhi";
        let response = app()
            .oneshot(post_json(&format!(r#"{{"query":"{query}"}}"#)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], TEXT_CONTENT_TYPE);

        let text = body_text(response).await;
        assert_ne!(text, APOLOGY);
        let catalog = Catalog::builtin().unwrap();
        let matches = pipeline::filter(&catalog, &query::SearchTerms::extract(query));
        assert_eq!(text, fallback::render(query, &matches));
    }

    #[tokio::test]
    async fn test_preflight_headers() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri(FINDER_PATH)
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri(HEALTH_PATH)
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let value: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["colleges"], 12);
        assert_eq!(value["llm"], false);
    }
}
