pub mod affiliate_controller;
pub mod beta_controller;
pub mod checkout_controller;
pub mod signal_controller;
pub mod subscription_controller;
pub mod waitlist_controller;
pub mod webhook_controller;

use axum::routing::{get, Router};

/// 系统健康检查
///
/// 返回服务器运行状态
#[utoipa::path(
    get,
    path = "/api/v1/",
    responses(
        (status = 200, description = "服务器运行正常", body = String)
    ),
    tag = "系统状态"
)]
pub async fn health() -> &'static str {
    "Server is running! 🚀"
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/affiliate", affiliate_controller::AffiliateController::app())
        .nest("/beta", beta_controller::BetaController::app())
        .nest("/waitlist", waitlist_controller::WaitlistController::app())
        .nest("/subscriptions", subscription_controller::SubscriptionController::app())
        .nest("/checkout", checkout_controller::CheckoutController::app())
        .nest("/webhook", webhook_controller::WebhookController::app())
        .nest("/signals", signal_controller::SignalController::app())
}
