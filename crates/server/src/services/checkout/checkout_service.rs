use crate::services::plan::PlanService;
use async_trait::async_trait;
use chrono::Utc;
use database::checkout::{
    model::{BillingPeriod, CheckoutSession},
    repository::DynCheckoutRepository,
};
use std::sync::Arc;
use tracing::info;
use utils::{AppError, AppResult};

/// 没有接入真实支付网关，所有会话都以开发模式创建
pub const CHECKOUT_MODE: &str = "development";

pub type DynCheckoutService = Arc<dyn CheckoutServiceTrait + Send + Sync>;

#[async_trait]
pub trait CheckoutServiceTrait {
    async fn create_session(
        &self,
        plan_id: Option<&str>,
        billing_period: Option<&str>,
        email: Option<&str>,
        affiliate_code: Option<&str>,
    ) -> AppResult<CheckoutSession>;

    async fn get_session(&self, session_id: Option<&str>) -> AppResult<CheckoutSession>;
}

pub struct CheckoutService {
    repository: DynCheckoutRepository,
    plans: PlanService,
}

impl CheckoutService {
    pub fn new(repository: DynCheckoutRepository, plans: PlanService) -> Self {
        Self { repository, plans }
    }

    fn new_session_id() -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        format!("mock_{}_{}", Utc::now().timestamp_millis(), &suffix[..8])
    }
}

/// 站内的结账成功页
pub fn success_url(session_id: &str) -> String {
    format!("/checkout/success?session_id={}", session_id)
}

#[async_trait]
impl CheckoutServiceTrait for CheckoutService {
    async fn create_session(
        &self,
        plan_id: Option<&str>,
        billing_period: Option<&str>,
        email: Option<&str>,
        affiliate_code: Option<&str>,
    ) -> AppResult<CheckoutSession> {
        let plan = self.plans.get(plan_id.unwrap_or_default())?;
        let period = BillingPeriod::parse(billing_period.unwrap_or("monthly")).ok_or(AppError::InvalidPlan)?;
        let price = self.plans.price(&plan.id, period)?;

        let session = CheckoutSession {
            id: Self::new_session_id(),
            status: "complete".to_string(),
            plan_id: plan.id.clone(),
            billing_period: period,
            customer_email: email.filter(|e| !e.is_empty()).map(str::to_string),
            affiliate_code: affiliate_code.filter(|c| !c.is_empty()).map(str::to_string),
            amount_total: i64::from(price) * 100,
            currency: "usd".to_string(),
            created_at: Utc::now(),
        };

        self.repository.put_checkout_session(session.clone()).await?;

        info!(
            "[Checkout] Session created: {} for {} - Plan: {} ({:?})",
            session.id,
            session.customer_email.as_deref().unwrap_or("N/A"),
            session.plan_id,
            period
        );

        Ok(session)
    }

    async fn get_session(&self, session_id: Option<&str>) -> AppResult<CheckoutSession> {
        let session_id = session_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::BadRequest("Session ID required".to_string()))?;

        self.repository
            .find_checkout_session(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::Database;

    fn create_test_service() -> CheckoutService {
        CheckoutService::new(Arc::new(Database::new()), PlanService::new())
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let service = create_test_service();

        let session = service
            .create_session(Some("pro"), None, Some("a@x.com"), Some("VN30_AAAAAA"))
            .await
            .unwrap();

        assert!(session.id.starts_with("mock_"));
        assert_eq!(session.amount_total, 9900);
        assert_eq!(session.billing_period, BillingPeriod::Monthly);
        assert_eq!(session.affiliate_code.as_deref(), Some("VN30_AAAAAA"));

        let fetched = service.get_session(Some(&session.id)).await.unwrap();
        assert_eq!(fetched, session);
        assert_eq!(success_url(&session.id), format!("/checkout/success?session_id={}", session.id));
    }

    #[tokio::test]
    async fn test_yearly_price_and_empty_affiliate() {
        let service = create_test_service();

        let session = service
            .create_session(Some("starter"), Some("yearly"), None, Some(""))
            .await
            .unwrap();

        assert_eq!(session.amount_total, 29000);
        assert!(session.affiliate_code.is_none());
    }

    #[tokio::test]
    async fn test_invalid_plan_or_period() {
        let service = create_test_service();

        assert!(matches!(
            service.create_session(Some("gold"), None, None, None).await,
            Err(AppError::InvalidPlan)
        ));
        assert!(matches!(
            service.create_session(Some("pro"), Some("weekly"), None, None).await,
            Err(AppError::InvalidPlan)
        ));
    }

    #[tokio::test]
    async fn test_get_session_errors() {
        let service = create_test_service();

        assert!(matches!(service.get_session(None).await, Err(AppError::BadRequest(_))));
        assert!(matches!(service.get_session(Some("mock_1")).await, Err(AppError::NotFound(_))));
    }
}
