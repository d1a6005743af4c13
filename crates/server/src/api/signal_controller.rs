use crate::{
    dtos::signal_dto::{SignalQuery, SignalsResponse, SubscribeSignalsDto, SubscribeSignalsResponse, Tier},
    extractors::validation_extractor::ValidationExtractor,
    services::Services,
};
use axum::{
    extract::Query,
    http::HeaderMap,
    routing::{get, post},
    Extension, Json, Router,
};
use utils::AppResult;

pub const API_KEY_HEADER: &str = "x-api-key";

fn api_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok())
}

/// 获取交易信号
///
/// 返回的股票数量和字段取决于 API key 对应的等级
#[utoipa::path(
    get,
    path = "/api/v1/signals",
    tag = "signals",
    params(
        SignalQuery,
        ("x-api-key" = Option<String>, Header, description = "API key，前缀决定等级")
    ),
    responses(
        (status = 200, description = "信号列表", body = SignalsResponse)
    )
)]
pub async fn get_signals(
    Extension(services): Extension<Services>,
    headers: HeaderMap,
    Query(query): Query<SignalQuery>,
) -> AppResult<Json<SignalsResponse>> {
    let tier = Tier::from_api_key(api_key(&headers));
    let response = services
        .signal
        .list(tier, query.symbol.as_deref(), query.signal_type.as_deref())
        .await?;

    Ok(Json(response))
}

/// 订阅信号提醒
#[utoipa::path(
    post,
    path = "/api/v1/signals/subscribe",
    tag = "signals",
    request_body = SubscribeSignalsDto,
    params(
        ("x-api-key" = String, Header, description = "API key")
    ),
    responses(
        (status = 200, description = "订阅已创建", body = SubscribeSignalsResponse),
        (status = 401, description = "缺少 API key")
    )
)]
pub async fn subscribe_signals(
    Extension(services): Extension<Services>,
    headers: HeaderMap,
    ValidationExtractor(req): ValidationExtractor<SubscribeSignalsDto>,
) -> AppResult<Json<SubscribeSignalsResponse>> {
    let subscription = services
        .signal
        .subscribe(api_key(&headers), req.symbols, req.webhook_url, req.telegram_chat_id)
        .await?;

    Ok(Json(SubscribeSignalsResponse {
        success: true,
        message: "Subscription created".to_string(),
        subscription: subscription.into(),
    }))
}

pub struct SignalController;
impl SignalController {
    pub fn app() -> Router {
        Router::new()
            .route("/", get(get_signals))
            .route("/subscribe", post(subscribe_signals))
    }
}
