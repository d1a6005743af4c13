use chrono::prelude::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 内测申请审核状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BetaStatus {
    Pending,
    Approved,
    Rejected,
}

/// 内测用户模型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BetaUser {
    /// 唯一键
    pub email: String,
    pub name: String,
    /// beginner / intermediate / advanced / expert
    pub trading_experience: String,
    pub telegram_username: String,
    /// 渠道来源，未填写时为 direct
    pub referral_source: String,
    pub status: BetaStatus,
    pub created_at: DateTime<Utc>,
}
