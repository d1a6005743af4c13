use crate::{
    dtos::plan_dto::{PlansResponse, StartSubscriptionDto, StartSubscriptionResponse},
    extractors::validation_extractor::ValidationExtractor,
    services::Services,
};
use axum::{routing::get, Extension, Json, Router};
use utils::AppResult;

/// 套餐列表
#[utoipa::path(
    get,
    path = "/api/v1/subscriptions",
    tag = "subscriptions",
    responses(
        (status = 200, description = "全部套餐", body = PlansResponse)
    )
)]
pub async fn list_plans(Extension(services): Extension<Services>) -> Json<PlansResponse> {
    Json(PlansResponse {
        success: true,
        plans: services.plan.plans(),
    })
}

/// 选择套餐，返回结账页地址
#[utoipa::path(
    post,
    path = "/api/v1/subscriptions",
    tag = "subscriptions",
    request_body = StartSubscriptionDto,
    responses(
        (status = 200, description = "已生成结账地址", body = StartSubscriptionResponse),
        (status = 400, description = "套餐不存在")
    )
)]
pub async fn start_subscription(
    Extension(services): Extension<Services>,
    ValidationExtractor(req): ValidationExtractor<StartSubscriptionDto>,
) -> AppResult<Json<StartSubscriptionResponse>> {
    let (plan, checkout_url) = services
        .plan
        .start_subscription(req.plan_id.as_deref(), req.email.as_deref())?;

    Ok(Json(StartSubscriptionResponse {
        success: true,
        message: "Checkout session created".to_string(),
        plan,
        checkout_url,
    }))
}

pub struct SubscriptionController;
impl SubscriptionController {
    pub fn app() -> Router {
        Router::new().route("/", get(list_plans).post(start_subscription))
    }
}
