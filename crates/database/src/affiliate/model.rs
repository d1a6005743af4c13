use chrono::prelude::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::serde_helpers::decimal_as_number;

/// 推广账户模型
///
/// 以 `code` 为主键存储，`email` 同样唯一
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateAccount {
    /// 创建时生成，永不复用
    pub id: String,
    /// 注册邮箱（区分大小写）
    pub email: String,
    /// 对外公开的推广码，如 VN30_AB12CD
    pub code: String,
    /// 佣金收款邮箱（PayPal）
    pub payout_email: Option<String>,
    /// 佣金比例，0.20 即 20%
    #[serde(with = "decimal_as_number")]
    #[schema(value_type = f64)]
    pub commission_rate: Decimal,
    /// 累计佣金
    #[serde(with = "decimal_as_number")]
    #[schema(value_type = f64)]
    pub total_earnings: Decimal,
    /// 待结算佣金
    #[serde(with = "decimal_as_number")]
    #[schema(value_type = f64)]
    pub pending_payout: Decimal,
    /// 成功推荐次数
    pub referral_count: u64,
    pub created_at: DateTime<Utc>,
}

/// 推荐记录状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    Pending,
    Paid,
}

/// 推荐记录，只追加不修改（除 status 外）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub affiliate_code: String,
    pub customer_email: String,
    pub plan: String,
    /// 订单原始金额
    #[serde(with = "decimal_as_number")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    /// 记录时按当时佣金比例计算，之后不再重算
    #[serde(with = "decimal_as_number")]
    #[schema(value_type = f64)]
    pub commission: Decimal,
    pub status: ReferralStatus,
    pub created_at: DateTime<Utc>,
}
