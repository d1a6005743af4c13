use chrono::prelude::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

impl BillingPeriod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "monthly" => Some(BillingPeriod::Monthly),
            "yearly" => Some(BillingPeriod::Yearly),
            _ => None,
        }
    }
}

/// 结账会话（开发模式下的模拟会话）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CheckoutSession {
    pub id: String,
    pub status: String,
    pub plan_id: String,
    pub billing_period: BillingPeriod,
    pub customer_email: Option<String>,
    /// 推广码，结账完成后用于记录推荐
    pub affiliate_code: Option<String>,
    /// 以分为单位
    pub amount_total: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}
