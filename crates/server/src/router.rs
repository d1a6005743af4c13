use crate::{api, docs::ApiDoc, middleware::request_logger, services::Services};
use axum::{
    error_handling::HandleErrorLayer,
    http::{HeaderName, Method, StatusCode},
    middleware as axum_middleware,
    response::IntoResponse,
    routing::get,
    BoxError, Extension, Json, Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::{buffer::BufferLayer, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

pub struct AppRouter;

impl AppRouter {
    pub fn new(services: Services) -> Router {
        let http_timeout = services.config.http_timeout_secs;

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
                HeaderName::from_static("x-api-key"),
                HeaderName::from_static("x-admin-secret"),
                HeaderName::from_static("x-affiliate-code"),
                HeaderName::from_static("stripe-signature"),
            ]);

        Router::new()
            .nest("/api/v1", api::app())
            .route("/api-docs/openapi.json", get(Self::openapi_json))
            .layer(axum_middleware::from_fn(request_logger))
            .layer(cors)
            .layer(
                ServiceBuilder::new()
                    .layer(Extension(services))
                    .layer(TraceLayer::new_for_http())
                    .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                        Self::handle_timeout_error(err, http_timeout)
                    }))
                    .timeout(Duration::from_secs(http_timeout))
                    .layer(BufferLayer::new(1024)),
            )
            .fallback(Self::handle_404)
    }

    async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
        Json(ApiDoc::openapi())
    }

    async fn handle_404() -> impl IntoResponse {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "success": false,
                "error": "The requested resource does not exist on this server!"
            })),
        )
    }

    fn handle_timeout_error(err: BoxError, timeout_secs: u64) -> (StatusCode, Json<Value>) {
        if err.is::<tower::timeout::error::Elapsed>() {
            (
                StatusCode::REQUEST_TIMEOUT,
                Json(json!({
                    "success": false,
                    "error": format!("Request took longer than the configured {} second timeout", timeout_secs)
                })),
            )
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": format!("Unhandled internal error: {}", err)
                })),
            )
        }
    }
}
