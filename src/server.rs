//! HTTP adapter for the localization engine.
//!
//! The routes here are debug/admin surfaces: they localize whatever JSON
//! they are given. Real CRUD handlers use [`ResolvedLanguage`] and
//! [`Localizer`] directly on records they have already fetched.

use crate::entity::{localize_entity, EntityKind};
use crate::envelope::ApiResponse;
use crate::error::LocalizeError;
use crate::i18n::{resolver, DisplayMode, Language, LocalizationMetrics, MetricsReport};
use crate::transform::{LocalizeOptions, Localizer};
use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::{header::CONTENT_LANGUAGE, request::Parts, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub options: Arc<LocalizeOptions>,
}

impl AppState {
    pub fn new(options: LocalizeOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/localize", post(localize_value))
        .route("/localize/:entity", post(localize_entity_value))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Display language resolved from the request's query string and headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLanguage(pub Language);

#[async_trait]
impl<S> FromRequestParts<S> for ResolvedLanguage
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A malformed query string carries no language signal.
        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(map)| map)
            .unwrap_or_default();

        Ok(ResolvedLanguage(resolver::resolve(&query, &parts.headers)))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ModeParams {
    pub mode: Option<String>,
}

impl ModeParams {
    /// Requested mode, or the configured default when absent or unrecognised.
    fn resolve(&self, default: DisplayMode) -> DisplayMode {
        self.mode
            .as_deref()
            .and_then(|mode| mode.parse().ok())
            .unwrap_or(default)
    }
}

/// Localized envelope with `Content-Language` set.
pub struct Localized(pub ApiResponse<serde_json::Value>);

impl IntoResponse for Localized {
    fn into_response(self) -> Response {
        let language = self.0.language;
        let mut response = Json(self.0).into_response();
        response
            .headers_mut()
            .insert(CONTENT_LANGUAGE, HeaderValue::from_static(language.code()));
        response
    }
}

/// A failed localization, reported in the language the request resolved to.
#[derive(Debug)]
pub struct LocalizeFailure {
    pub error: LocalizeError,
    pub language: Language,
}

impl LocalizeFailure {
    pub fn new(error: LocalizeError, language: Language) -> Self {
        Self { error, language }
    }
}

impl IntoResponse for LocalizeFailure {
    fn into_response(self) -> Response {
        let (status, message) = match &self.error {
            LocalizeError::UnknownEntity(_) => (StatusCode::NOT_FOUND, self.error.to_string()),
            LocalizeError::CycleDetected { .. } | LocalizeError::DepthExceeded { .. } => {
                error!("Localization failed: {}", self.error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        let body: ApiResponse<serde_json::Value> = ApiResponse::failure(message, self.language);
        let mut response = (status, Json(body)).into_response();
        response.headers_mut().insert(
            CONTENT_LANGUAGE,
            HeaderValue::from_static(self.language.code()),
        );
        response
    }
}

/// Localize an arbitrary JSON body by suffix discovery.
async fn localize_value(
    State(state): State<AppState>,
    ResolvedLanguage(language): ResolvedLanguage,
    Query(params): Query<ModeParams>,
    Json(body): Json<serde_json::Value>,
) -> Result<Localized, LocalizeFailure> {
    let mode = params.resolve(state.options.mode);
    let localizer = Localizer::new(state.options.as_ref().clone().with_mode(mode));
    let data = localizer
        .localize(&body, language)
        .map_err(|error| LocalizeFailure::new(error, language))?;
    Ok(Localized(ApiResponse::ok(data, language)))
}

/// Localize a record (or array of records) with a known entity's field table.
async fn localize_entity_value(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    ResolvedLanguage(language): ResolvedLanguage,
    Query(params): Query<ModeParams>,
    Json(body): Json<serde_json::Value>,
) -> Result<Localized, LocalizeFailure> {
    let fail = |error| LocalizeFailure::new(error, language);
    let kind: EntityKind = entity.parse().map_err(fail)?;
    let mode = params.resolve(state.options.mode);
    let options = state.options.as_ref().clone().with_mode(mode);
    let data = localize_entity(&body, kind, language, &options).map_err(fail)?;
    Ok(Localized(ApiResponse::ok(data, language)))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn metrics() -> Json<MetricsReport> {
    Json(LocalizationMetrics::global().report())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::ACCEPT_LANGUAGE, Request};
    use serde_json::json;

    async fn resolve(uri: &str, accept_language: Option<&str>) -> Language {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = accept_language {
            builder = builder.header(ACCEPT_LANGUAGE, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        let ResolvedLanguage(language) = ResolvedLanguage::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        language
    }

    fn state() -> AppState {
        AppState::new(LocalizeOptions::default())
    }

    // ==================== Extractor Tests ====================

    #[tokio::test]
    async fn test_extractor_query() {
        assert_eq!(resolve("/localize?lang=ne", None).await, Language::Ne);
        assert_eq!(resolve("/localize?language=nepali", None).await, Language::Ne);
    }

    #[tokio::test]
    async fn test_extractor_header() {
        assert_eq!(resolve("/localize", Some("en-US,ne;q=0.5")).await, Language::Ne);
    }

    #[tokio::test]
    async fn test_extractor_default() {
        assert_eq!(resolve("/localize", None).await, Language::En);
        assert_eq!(resolve("/localize?", Some("en-GB")).await, Language::En);
    }

    // ==================== Mode Tests ====================

    #[test]
    fn test_mode_params() {
        let params = ModeParams {
            mode: Some("combined".to_string()),
        };
        assert_eq!(params.resolve(DisplayMode::Single), DisplayMode::Combined);

        let params = ModeParams {
            mode: Some("nonsense".to_string()),
        };
        assert_eq!(params.resolve(DisplayMode::Combined), DisplayMode::Combined);
        assert_eq!(ModeParams::default().resolve(DisplayMode::Single), DisplayMode::Single);
    }

    // ==================== Handler Tests ====================

    #[tokio::test]
    async fn test_localize_handler() {
        let result = localize_value(
            State(state()),
            ResolvedLanguage(Language::Ne),
            Query(ModeParams {
                mode: Some("combined".to_string()),
            }),
            Json(json!({"title": "Budget", "titleNepali": "बजेट"})),
        )
        .await;

        let Ok(Localized(response)) = result else {
            panic!("localize should succeed");
        };
        assert!(response.success);
        assert_eq!(response.language, Language::Ne);
        assert_eq!(response.data, Some(json!({"title": "बजेट (Budget)"})));
    }

    #[tokio::test]
    async fn test_localize_entity_handler_unknown_kind() {
        let result = localize_entity_value(
            State(state()),
            Path("voters".to_string()),
            ResolvedLanguage(Language::En),
            Query(ModeParams::default()),
            Json(json!({})),
        )
        .await;

        let Err(failure) = result else {
            panic!("unknown entity should fail");
        };
        assert_eq!(failure.language, Language::En);
        assert_eq!(failure.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failure_envelope_uses_request_language() {
        let result = localize_entity_value(
            State(state()),
            Path("voters".to_string()),
            ResolvedLanguage(Language::Ne),
            Query(ModeParams::default()),
            Json(json!({})),
        )
        .await;

        let Err(failure) = result else {
            panic!("unknown entity should fail");
        };
        let response = failure.into_response();
        assert_eq!(response.headers().get(CONTENT_LANGUAGE).unwrap(), "ne");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["language"], json!("ne"));
    }

    #[tokio::test]
    async fn test_localize_entity_handler() {
        let result = localize_entity_value(
            State(state()),
            Path("provinces".to_string()),
            ResolvedLanguage(Language::Ne),
            Query(ModeParams::default()),
            Json(json!([{"name": "Koshi", "nameNepali": "कोशी"}])),
        )
        .await;

        let Ok(Localized(response)) = result else {
            panic!("entity localize should succeed");
        };
        assert_eq!(response.data, Some(json!([{"name": "कोशी"}])));
    }

    // ==================== Response Tests ====================

    #[test]
    fn test_localized_sets_content_language() {
        let response = Localized(ApiResponse::ok(json!(1), Language::Ne)).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CONTENT_LANGUAGE).unwrap(), "ne");
    }

    #[test]
    fn test_cycle_maps_to_500() {
        let failure = LocalizeFailure::new(
            LocalizeError::CycleDetected {
                path: "/a".to_string(),
            },
            Language::Ne,
        );
        assert_eq!(
            failure.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
