use crate::{
    dtos::webhook_dto::WebhookAck,
    services::{webhook::WebhookOutcome, Services},
};
use axum::{body::Bytes, http::HeaderMap, routing::post, Extension, Json, Router};
use utils::AppResult;

pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// 支付平台事件回调
///
/// 签名基于原始请求体计算，因此这里不做 JSON 提取
#[utoipa::path(
    post,
    path = "/api/v1/webhook",
    tag = "webhook",
    request_body(content = String, description = "支付平台事件 JSON 原文"),
    params(
        ("stripe-signature" = String, Header, description = "t=<时间戳>,v1=<签名>")
    ),
    responses(
        (status = 200, description = "事件已接收", body = WebhookAck),
        (status = 400, description = "签名缺失或无效")
    )
)]
pub async fn receive_webhook(
    Extension(services): Extension<Services>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    let mode = match services.webhook.receive(signature, &body).await? {
        WebhookOutcome::Development => Some("development".to_string()),
        WebhookOutcome::Processed => None,
    };

    Ok(Json(WebhookAck { received: true, mode }))
}

pub struct WebhookController;
impl WebhookController {
    pub fn app() -> Router {
        Router::new().route("/", post(receive_webhook))
    }
}
