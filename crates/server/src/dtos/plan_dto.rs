use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 套餐用量限制，-1 表示不限
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub stocks: i64,
    pub api_calls: i64,
    pub alerts_per_day: i64,
}

/// 订阅套餐
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    /// 美元/月
    pub price: u32,
    /// 美元/年
    pub yearly_price: u32,
    pub price_id: String,
    pub features: Vec<String>,
    pub limits: PlanLimits,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct PlansResponse {
    pub success: bool,
    pub plans: Vec<Plan>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Validate, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartSubscriptionDto {
    pub plan_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartSubscriptionResponse {
    pub success: bool,
    pub message: String,
    pub plan: Plan,
    pub checkout_url: String,
}
