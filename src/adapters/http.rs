//! HTTP surface: `GET /`, `POST /`, `OPTIONS /`, plus `/stats` and `/health`.
//!
//! Every error body has the shape `{"error": "..."}`. Status codes follow the
//! error kind unless legacy mode asks for the old always-200 behavior.

use crate::core::service::OrderService;
use crate::core::{Criteria, NewOrder, SheetHost};
use crate::domain::model::{ErrorBody, Health};
use crate::utils::error::SheetError;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub struct AppState<H: SheetHost> {
    service: Arc<OrderService<H>>,
    legacy_status: bool,
}

impl<H: SheetHost> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            legacy_status: self.legacy_status,
        }
    }
}

impl<H: SheetHost> AppState<H> {
    pub fn new(service: OrderService<H>, legacy_status: bool) -> Self {
        Self {
            service: Arc::new(service),
            legacy_status,
        }
    }

    fn error(&self, error: SheetError) -> ApiError {
        ApiError {
            error,
            legacy_status: self.legacy_status,
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    error: SheetError,
    legacy_status: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.legacy_status {
            StatusCode::OK
        } else {
            StatusCode::from_u16(self.error.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        };

        match self.error.status_code() {
            500 => tracing::error!("❌ Request failed: {}", self.error),
            _ => tracing::warn!("⚠️ Request rejected: {}", self.error),
        }

        let body = ErrorBody {
            error: self.error.user_friendly_message(),
        };
        (status, Json(body)).into_response()
    }
}

fn criteria_from(query: Result<Query<Criteria>, QueryRejection>) -> Result<Criteria, SheetError> {
    query
        .map(|Query(criteria)| criteria)
        .map_err(|e| SheetError::validation(format!("Invalid query: {}", e.body_text())))
}

async fn list_records<H: SheetHost + 'static>(
    State(state): State<AppState<H>>,
    query: Result<Query<Criteria>, QueryRejection>,
) -> Response {
    let result = match criteria_from(query) {
        Ok(criteria) => state.service.list(&criteria).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(records) => Json(records).into_response(),
        Err(e) => state.error(e).into_response(),
    }
}

/// The body is parsed as JSON whatever its content type; browser clients
/// often post `text/plain` to skip the preflight.
async fn create_record<H: SheetHost + 'static>(
    State(state): State<AppState<H>>,
    body: Bytes,
) -> Response {
    let input: NewOrder = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => {
            tracing::debug!("Unparseable create body: {}", e);
            return state
                .error(SheetError::validation("Invalid JSON body"))
                .into_response();
        }
    };

    match state.service.create(input).await {
        Ok(created) => Json(created).into_response(),
        Err(e) => state.error(e).into_response(),
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn statistics<H: SheetHost + 'static>(
    State(state): State<AppState<H>>,
    query: Result<Query<Criteria>, QueryRejection>,
) -> Response {
    let result = match criteria_from(query) {
        Ok(criteria) => state.service.statistics(&criteria).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => state.error(e).into_response(),
    }
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Builds the application router around an already-constructed service.
pub fn create_router<H: SheetHost + 'static>(state: AppState<H>) -> Router {
    Router::new()
        .route(
            "/",
            get(list_records::<H>)
                .post(create_record::<H>)
                .options(preflight),
        )
        .route("/stats", get(statistics::<H>))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryHost;
    use crate::core::store::RowStore;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    fn router(legacy_status: bool) -> Router {
        let service = OrderService::new(RowStore::new(MemoryHost::new(), "graph"));
        create_router(AppState::new(service, legacy_status))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_handler_directly() {
        let Json(health) = health().await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_missing_store_is_404() {
        let response = router(false)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Sheet 'graph' not found"})
        );
    }

    #[tokio::test]
    async fn test_legacy_mode_keeps_200() {
        let response = router(true)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await.get("error").is_some());
    }

    #[tokio::test]
    async fn test_bad_query_is_400() {
        let response = router(false)
            .oneshot(
                Request::builder()
                    .uri("/stats?startDate=yesterday")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid query"));
    }

    #[tokio::test]
    async fn test_not_found_route() {
        let response = router(false)
            .oneshot(
                Request::builder()
                    .uri("/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
