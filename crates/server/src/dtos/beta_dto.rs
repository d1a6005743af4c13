use database::beta::model::{BetaStatus, BetaUser};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 内测报名请求
#[derive(Clone, Serialize, Deserialize, Debug, Validate, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BetaSignupDto {
    pub email: Option<String>,
    #[validate(length(max = 100))]
    pub name: Option<String>,
    pub trading_experience: Option<String>,
    #[validate(length(max = 64))]
    pub telegram_username: Option<String>,
    pub referral_source: Option<String>,
}

/// 内测报名响应
#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BetaSignupResponse {
    pub success: bool,
    pub message: String,
    pub status: BetaStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_slots: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_slots: Option<usize>,
}

/// 公开的名额统计
#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BetaPublicStats {
    pub success: bool,
    pub total_slots: usize,
    pub remaining_slots: usize,
    pub percent_full: u32,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct BetaStatusBreakdown {
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
}

/// 固定渠道分类统计
#[derive(Clone, Serialize, Deserialize, Debug, Default, ToSchema)]
pub struct BetaSourceBreakdown {
    pub google: usize,
    pub facebook: usize,
    pub youtube: usize,
    pub friend: usize,
    pub telegram: usize,
    pub other: usize,
}

/// 管理员视图：完整名单与分类统计
#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BetaAdminStats {
    pub success: bool,
    pub total_users: usize,
    pub max_users: usize,
    pub users: Vec<BetaUser>,
    pub breakdown: BetaStatusBreakdown,
    pub sources: BetaSourceBreakdown,
}
