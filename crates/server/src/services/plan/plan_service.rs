use crate::dtos::plan_dto::{Plan, PlanLimits};
use database::checkout::model::BillingPeriod;
use lazy_static::lazy_static;
use tracing::info;
use utils::{AppError, AppResult};

lazy_static! {
    static ref PLANS: Vec<Plan> = vec![
        Plan {
            id: "starter".to_string(),
            name: "Starter".to_string(),
            price: 29,
            yearly_price: 290,
            price_id: "price_starter_monthly".to_string(),
            features: to_strings(&["5 stocks monitoring", "Daily signals", "Email alerts", "Basic dashboard"]),
            limits: PlanLimits { stocks: 5, api_calls: 100, alerts_per_day: 10 },
        },
        Plan {
            id: "pro".to_string(),
            name: "Pro".to_string(),
            price: 99,
            yearly_price: 990,
            price_id: "price_pro_monthly".to_string(),
            features: to_strings(&[
                "All 30 VN30 stocks",
                "Real-time signals",
                "Telegram alerts",
                "AI price prediction",
                "Advanced dashboard",
            ]),
            limits: PlanLimits { stocks: 30, api_calls: 10000, alerts_per_day: 100 },
        },
        Plan {
            id: "enterprise".to_string(),
            name: "Enterprise".to_string(),
            price: 499,
            yearly_price: 4990,
            price_id: "price_enterprise_monthly".to_string(),
            features: to_strings(&[
                "Everything in Pro",
                "API access",
                "Custom alerts",
                "Priority support",
                "White-label option",
            ]),
            limits: PlanLimits { stocks: 30, api_calls: -1, alerts_per_day: -1 },
        },
    ];
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 套餐目录（静态数据）
#[derive(Clone, Debug, Default)]
pub struct PlanService;

impl PlanService {
    pub fn new() -> Self {
        Self
    }

    pub fn plans(&self) -> Vec<Plan> {
        PLANS.clone()
    }

    pub fn get(&self, plan_id: &str) -> AppResult<Plan> {
        PLANS.iter().find(|p| p.id == plan_id).cloned().ok_or(AppError::InvalidPlan)
    }

    /// 美元整数价格
    pub fn price(&self, plan_id: &str, period: BillingPeriod) -> AppResult<u32> {
        let plan = self.get(plan_id)?;

        Ok(match period {
            BillingPeriod::Monthly => plan.price,
            BillingPeriod::Yearly => plan.yearly_price,
        })
    }

    /// 返回套餐信息和站内结账页地址
    pub fn start_subscription(&self, plan_id: Option<&str>, email: Option<&str>) -> AppResult<(Plan, String)> {
        let plan = self.get(plan_id.unwrap_or_default())?;
        info!("🧾 Subscription requested: plan={} email={}", plan.id, email.unwrap_or("N/A"));

        let checkout_url = format!("/checkout?plan={}", plan.id);
        Ok((plan, checkout_url))
    }
}
