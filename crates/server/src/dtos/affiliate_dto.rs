use database::{affiliate::model::Referral, serde_helpers::decimal_as_number};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 注册推广账户请求
#[derive(Clone, Serialize, Deserialize, Debug, Validate, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAffiliateDto {
    /// 邮箱缺失或格式错误时返回 400
    pub email: Option<String>,
    /// PayPal 收款邮箱
    pub paypal_email: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAffiliateResponse {
    pub success: bool,
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_rate: Option<String>,
    pub referral_link: String,
    pub dashboard_url: String,
}

/// 推广账户对外视图
#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateView {
    pub email: String,
    pub code: String,
    /// 百分比形式，如 "20%"
    pub commission_rate: String,
    #[serde(with = "decimal_as_number")]
    #[schema(value_type = f64)]
    pub total_earnings: Decimal,
    #[serde(with = "decimal_as_number")]
    #[schema(value_type = f64)]
    pub pending_payout: Decimal,
    pub referral_count: u64,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct AffiliateLookupResponse {
    pub success: bool,
    pub affiliate: AffiliateView,
    pub referrals: Vec<Referral>,
}

/// 记录推荐请求（仅内部/管理员调用）
#[derive(Clone, Serialize, Deserialize, Debug, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordReferralDto {
    #[validate(length(min = 1))]
    pub affiliate_code: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub plan: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct RecordReferralResponse {
    pub success: bool,
    pub message: String,
    #[serde(with = "decimal_as_number")]
    #[schema(value_type = f64)]
    pub commission: Decimal,
}
