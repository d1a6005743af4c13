#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use database::Database;
use serde_json::Value;
use server::{router::AppRouter, services::Services};
use std::sync::Arc;
use tower::ServiceExt;
use utils::AppConfig;

pub const ADMIN_SECRET: &str = "test_admin_secret";

pub fn test_app() -> Router {
    test_app_with(AppConfig::new_for_test())
}

pub fn test_app_with(config: AppConfig) -> Router {
    let services = Services::new(Database::new(), Arc::new(config));
    AppRouter::new(services)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request_with_header(method: &str, uri: &str, body: Value, header: (&str, &str)) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header(header.0, header.1)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).unwrap()
}

/// 发送请求并返回状态码和 JSON 响应体
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}
