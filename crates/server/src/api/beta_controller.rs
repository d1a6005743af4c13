use crate::{
    dtos::beta_dto::{BetaPublicStats, BetaSignupDto, BetaSignupResponse},
    extractors::{admin_extractor::MaybeAdmin, validation_extractor::ValidationExtractor},
    services::{
        beta::{BetaProfile, BetaSignupOutcome},
        Services,
    },
};
use axum::{
    response::{IntoResponse, Response},
    routing::post,
    Extension, Json, Router,
};
use utils::AppResult;

/// 内测报名
#[utoipa::path(
    post,
    path = "/api/v1/beta",
    tag = "beta",
    request_body = BetaSignupDto,
    responses(
        (status = 200, description = "报名成功或已报名", body = BetaSignupResponse),
        (status = 400, description = "邮箱格式错误或名额已满")
    )
)]
pub async fn signup_beta(
    Extension(services): Extension<Services>,
    ValidationExtractor(req): ValidationExtractor<BetaSignupDto>,
) -> AppResult<Json<BetaSignupResponse>> {
    let profile = BetaProfile {
        name: req.name,
        trading_experience: req.trading_experience,
        telegram_username: req.telegram_username,
        referral_source: req.referral_source,
    };

    let response = match services.beta.signup(req.email.as_deref(), profile).await? {
        BetaSignupOutcome::AlreadyRegistered { status } => BetaSignupResponse {
            success: true,
            message: "Already registered for beta".to_string(),
            status,
            position: None,
            total_slots: None,
            remaining_slots: None,
        },
        BetaSignupOutcome::Registered {
            status,
            position,
            total_slots,
            remaining_slots,
        } => BetaSignupResponse {
            success: true,
            message: "Welcome to the beta!".to_string(),
            status,
            position: Some(position),
            total_slots: Some(total_slots),
            remaining_slots: Some(remaining_slots),
        },
    };

    Ok(Json(response))
}

/// 内测名额统计
///
/// 携带正确的 `x-admin-secret` 时返回完整名单
#[utoipa::path(
    get,
    path = "/api/v1/beta",
    tag = "beta",
    params(
        ("x-admin-secret" = Option<String>, Header, description = "管理员密钥（可选）")
    ),
    responses(
        (status = 200, description = "公开统计；管理员请求返回 BetaAdminStats", body = BetaPublicStats),
        (status = 401, description = "管理员密钥错误")
    )
)]
pub async fn get_beta_stats(Extension(services): Extension<Services>, admin: MaybeAdmin) -> AppResult<Response> {
    let response = match admin {
        MaybeAdmin::Admin => Json(services.beta.admin_stats().await?).into_response(),
        MaybeAdmin::Public => Json(services.beta.public_stats().await?).into_response(),
    };

    Ok(response)
}

pub struct BetaController;
impl BetaController {
    pub fn app() -> Router {
        Router::new().route("/", post(signup_beta).get(get_beta_stats))
    }
}
