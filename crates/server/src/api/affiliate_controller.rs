use crate::{
    dtos::affiliate_dto::{
        AffiliateLookupResponse, AffiliateView, RecordReferralDto, RecordReferralResponse, RegisterAffiliateDto,
        RegisterAffiliateResponse,
    },
    extractors::{admin_extractor::AdminGuard, validation_extractor::ValidationExtractor},
    services::{affiliate::commission_rate_percent, Services},
};
use axum::{http::HeaderMap, routing::post, Extension, Json, Router};
use utils::{AppError, AppResult};

pub const AFFILIATE_CODE_HEADER: &str = "x-affiliate-code";

/// 注册推广账户
///
/// 同一邮箱重复注册返回已有推广码
#[utoipa::path(
    post,
    path = "/api/v1/affiliate",
    tag = "affiliate",
    request_body = RegisterAffiliateDto,
    responses(
        (status = 200, description = "注册成功或已注册", body = RegisterAffiliateResponse),
        (status = 400, description = "邮箱格式错误")
    )
)]
pub async fn register_affiliate(
    Extension(services): Extension<Services>,
    ValidationExtractor(req): ValidationExtractor<RegisterAffiliateDto>,
) -> AppResult<Json<RegisterAffiliateResponse>> {
    let outcome = services
        .affiliate
        .register(req.email.as_deref(), req.paypal_email.as_deref())
        .await?;
    let code = outcome.affiliate.code;

    let (message, commission_rate) = if outcome.created {
        (
            "Affiliate account created",
            Some(commission_rate_percent(outcome.affiliate.commission_rate)),
        )
    } else {
        ("Already registered", None)
    };

    Ok(Json(RegisterAffiliateResponse {
        success: true,
        message: message.to_string(),
        referral_link: format!("{}?ref={}", services.config.public_url, code),
        dashboard_url: format!("/affiliate/dashboard?code={}", code),
        commission_rate,
        code,
    }))
}

/// 查询推广账户及推荐记录
#[utoipa::path(
    get,
    path = "/api/v1/affiliate",
    tag = "affiliate",
    params(
        ("x-affiliate-code" = String, Header, description = "推广码")
    ),
    responses(
        (status = 200, description = "推广账户详情", body = AffiliateLookupResponse),
        (status = 401, description = "缺少推广码"),
        (status = 404, description = "推广码不存在")
    )
)]
pub async fn get_affiliate(
    Extension(services): Extension<Services>,
    headers: HeaderMap,
) -> AppResult<Json<AffiliateLookupResponse>> {
    let code = headers
        .get(AFFILIATE_CODE_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(AppError::AffiliateCodeRequired)?;

    let overview = services.affiliate.lookup(code).await?;
    let affiliate = overview.affiliate;

    Ok(Json(AffiliateLookupResponse {
        success: true,
        affiliate: AffiliateView {
            commission_rate: commission_rate_percent(affiliate.commission_rate),
            email: affiliate.email,
            code: affiliate.code,
            total_earnings: affiliate.total_earnings,
            pending_payout: affiliate.pending_payout,
            referral_count: affiliate.referral_count,
        },
        referrals: overview.referrals,
    }))
}

/// 记录推荐（管理员）
#[utoipa::path(
    put,
    path = "/api/v1/affiliate",
    tag = "affiliate",
    request_body = RecordReferralDto,
    params(
        ("x-admin-secret" = String, Header, description = "管理员密钥")
    ),
    responses(
        (status = 200, description = "推荐已记录", body = RecordReferralResponse),
        (status = 400, description = "金额无效"),
        (status = 401, description = "管理员密钥错误"),
        (status = 404, description = "推广码不存在")
    )
)]
pub async fn record_referral(
    Extension(services): Extension<Services>,
    _admin: AdminGuard,
    ValidationExtractor(req): ValidationExtractor<RecordReferralDto>,
) -> AppResult<Json<RecordReferralResponse>> {
    let commission = services
        .affiliate
        .record_referral(&req.affiliate_code, &req.customer_email, &req.plan, req.amount)
        .await?;

    Ok(Json(RecordReferralResponse {
        success: true,
        message: "Referral recorded".to_string(),
        commission,
    }))
}

pub struct AffiliateController;
impl AffiliateController {
    pub fn app() -> Router {
        Router::new().route(
            "/",
            post(register_affiliate).get(get_affiliate).put(record_referral),
        )
    }
}
