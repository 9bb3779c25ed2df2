use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::rate_limit::RateLimiter;
use super::service::{ResultService, ResultServiceError};
use super::store::ResultStore;
use crate::badge::embed::{profile_url, EmbedSnippets};
use crate::badge::BadgeOptions;
use crate::profile::ScoringError;

const BADGE_CACHE_CONTROL: &str = "public, max-age=86400, immutable";

/// Shared handler state: the service plus the public origin used in links.
pub struct ResultRoutes<S, L> {
    pub service: Arc<ResultService<S, L>>,
    pub public_base_url: Arc<str>,
}

impl<S, L> Clone for ResultRoutes<S, L> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            public_base_url: Arc::clone(&self.public_base_url),
        }
    }
}

/// Router builder exposing result creation, result views, and badges.
pub fn result_router<S, L>(service: Arc<ResultService<S, L>>, public_base_url: &str) -> Router
where
    S: ResultStore + 'static,
    L: RateLimiter + 'static,
{
    let state = ResultRoutes {
        service,
        public_base_url: Arc::from(public_base_url.trim_end_matches('/')),
    };

    Router::new()
        .route("/api/v1/results", post(submit_handler::<S, L>))
        .route("/api/v1/results/:result_id", get(result_handler::<S, L>))
        .route("/api/v1/badges/:result_id", get(badge_handler::<S, L>))
        .route(
            "/api/v1/badges/:result_id/embed",
            get(embed_handler::<S, L>),
        )
        .with_state(state)
}

/// Client identity for rate limiting: first `x-forwarded-for` hop, then `x-real-ip`.
pub fn client_key(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let real_ip = headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let ip = forwarded.or(real_ip).unwrap_or("unknown");
    format!("create-test:{ip}")
}

pub(crate) async fn submit_handler<S, L>(
    State(routes): State<ResultRoutes<S, L>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    S: ResultStore + 'static,
    L: RateLimiter + 'static,
{
    match routes.service.submit_body(&client_key(&headers), &body) {
        Ok(stored) => (StatusCode::CREATED, Json(json!({ "id": stored.id }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn result_handler<S, L>(
    State(routes): State<ResultRoutes<S, L>>,
    Path(result_id): Path<String>,
) -> Response
where
    S: ResultStore + 'static,
    L: RateLimiter + 'static,
{
    match routes.service.result_view(&result_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BadgeQuery {
    title: Option<String>,
    subtitle: Option<String>,
}

pub(crate) async fn badge_handler<S, L>(
    State(routes): State<ResultRoutes<S, L>>,
    Path(result_id): Path<String>,
    Query(query): Query<BadgeQuery>,
) -> Response
where
    S: ResultStore + 'static,
    L: RateLimiter + 'static,
{
    let result_id = result_id
        .strip_suffix(".svg")
        .unwrap_or(&result_id)
        .to_string();
    let options = BadgeOptions {
        profile_url: profile_url(&routes.public_base_url, &result_id),
        title: query.title,
        subtitle: query.subtitle,
    };

    match routes.service.badge(&result_id, &options) {
        Ok(markup) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime::IMAGE_SVG.to_string()),
                (header::CACHE_CONTROL, BADGE_CACHE_CONTROL.to_string()),
            ],
            markup,
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn embed_handler<S, L>(
    State(routes): State<ResultRoutes<S, L>>,
    Path(result_id): Path<String>,
) -> Response
where
    S: ResultStore + 'static,
    L: RateLimiter + 'static,
{
    match routes.service.fetch(&result_id) {
        Ok(_) => {
            let snippets = EmbedSnippets::new(&routes.public_base_url, &result_id);
            (StatusCode::OK, Json(snippets)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) fn error_status(error: &ResultServiceError) -> StatusCode {
    match error {
        ResultServiceError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        ResultServiceError::Submission(_) => StatusCode::BAD_REQUEST,
        ResultServiceError::Scoring(ScoringError::Validation(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ResultServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ResultServiceError::Scoring(ScoringError::Configuration(_))
        | ResultServiceError::Store(_)
        | ResultServiceError::Corrupt { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: ResultServiceError) -> Response {
    let status = error_status(&error);
    let payload = Json(json!({ "error": error.to_string() }));

    match error {
        ResultServiceError::RateLimited { retry_after } => {
            let retry_after = retry_after.as_secs().max(1).to_string();
            (status, [(header::RETRY_AFTER, retry_after)], payload).into_response()
        }
        _ => (status, payload).into_response(),
    }
}
