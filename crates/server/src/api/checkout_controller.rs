use crate::{
    dtos::checkout_dto::{CheckoutSessionQuery, CheckoutSessionResponse, CreateCheckoutDto, CreateCheckoutResponse},
    extractors::validation_extractor::ValidationExtractor,
    services::{
        checkout::{success_url, CHECKOUT_MODE},
        Services,
    },
};
use axum::{extract::Query, routing::post, Extension, Json, Router};
use utils::AppResult;

/// 创建结账会话
#[utoipa::path(
    post,
    path = "/api/v1/checkout",
    tag = "checkout",
    request_body = CreateCheckoutDto,
    responses(
        (status = 200, description = "会话已创建", body = CreateCheckoutResponse),
        (status = 400, description = "套餐或计费周期无效")
    )
)]
pub async fn create_checkout(
    Extension(services): Extension<Services>,
    ValidationExtractor(req): ValidationExtractor<CreateCheckoutDto>,
) -> AppResult<Json<CreateCheckoutResponse>> {
    let session = services
        .checkout
        .create_session(
            req.plan_id.as_deref(),
            req.billing_period.as_deref(),
            req.email.as_deref(),
            req.affiliate_code.as_deref(),
        )
        .await?;

    Ok(Json(CreateCheckoutResponse {
        success: true,
        mode: CHECKOUT_MODE.to_string(),
        message: "Payment gateway not configured, returning a mock session".to_string(),
        checkout_url: success_url(&session.id),
        session_id: session.id,
    }))
}

/// 查询结账会话
#[utoipa::path(
    get,
    path = "/api/v1/checkout",
    tag = "checkout",
    params(CheckoutSessionQuery),
    responses(
        (status = 200, description = "会话详情", body = CheckoutSessionResponse),
        (status = 400, description = "缺少 session_id"),
        (status = 404, description = "会话不存在")
    )
)]
pub async fn get_checkout(
    Extension(services): Extension<Services>,
    Query(query): Query<CheckoutSessionQuery>,
) -> AppResult<Json<CheckoutSessionResponse>> {
    let session = services.checkout.get_session(query.session_id.as_deref()).await?;

    Ok(Json(CheckoutSessionResponse {
        success: true,
        mode: CHECKOUT_MODE.to_string(),
        session,
    }))
}

pub struct CheckoutController;
impl CheckoutController {
    pub fn app() -> Router {
        Router::new().route("/", post(create_checkout).get(get_checkout))
    }
}
