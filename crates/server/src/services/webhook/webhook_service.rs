use crate::services::{
    affiliate::DynAffiliateService,
    webhook::signature::{verify_signature, DEFAULT_TOLERANCE_SECS},
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use utils::{AppError, AppResult};

pub type DynWebhookService = Arc<dyn WebhookServiceTrait + Send + Sync>;

/// 支付平台推送的事件，只解析用到的字段
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    pub object: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// 未配置签名密钥，直接确认，不做任何处理
    Development,
    Processed,
}

#[async_trait]
pub trait WebhookServiceTrait {
    /// 校验签名并分发事件
    async fn receive(&self, signature: Option<&str>, payload: &[u8]) -> AppResult<WebhookOutcome>;
}

pub struct WebhookService {
    affiliate: DynAffiliateService,
    secret: Option<String>,
    tolerance_secs: i64,
}

impl WebhookService {
    pub fn new(affiliate: DynAffiliateService, secret: Option<String>) -> Self {
        Self {
            affiliate,
            secret: secret.filter(|s| !s.is_empty()),
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    fn str_field<'a>(object: &'a Value, pointer: &str) -> &'a str {
        object.pointer(pointer).and_then(Value::as_str).unwrap_or_default()
    }

    async fn handle_checkout_completed(&self, object: &Value) -> AppResult<()> {
        let session_id = Self::str_field(object, "/id");
        let email = Self::str_field(object, "/customer_email");
        let plan_id = Self::str_field(object, "/metadata/planId");
        let affiliate_code = Self::str_field(object, "/metadata/affiliateCode");

        info!("🛒 Checkout completed: {} ({} - {})", session_id, email, plan_id);

        if affiliate_code.is_empty() {
            return Ok(());
        }

        // amount_total 以分为单位
        let cents = object.pointer("/amount_total").and_then(Value::as_i64).unwrap_or(0);
        let amount = Decimal::new(cents, 2);

        match self.affiliate.record_referral(affiliate_code, email, plan_id, amount).await {
            Ok(commission) => {
                info!("🤝 Affiliate referral {} recorded, commission {}", affiliate_code, commission);
                Ok(())
            }
            // 推广码无效不应导致支付平台重试
            Err(AppError::NotFound(_)) | Err(AppError::InvalidAmount(_)) => {
                warn!("⚠️ Skipped affiliate referral for {}", affiliate_code);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn dispatch(&self, event: &WebhookEvent) -> AppResult<()> {
        let object = &event.data.object;
        info!("📨 Received webhook event {}: {}", event.id, event.event_type);

        match event.event_type.as_str() {
            "checkout.session.completed" => self.handle_checkout_completed(object).await?,
            "customer.subscription.created" | "customer.subscription.updated" | "customer.subscription.deleted" => {
                info!(
                    "📄 Subscription {} {} (status: {})",
                    Self::str_field(object, "/id"),
                    event.event_type.trim_start_matches("customer.subscription."),
                    Self::str_field(object, "/status"),
                );
            }
            "invoice.payment_succeeded" => {
                let paid = object.pointer("/amount_paid").and_then(Value::as_i64).unwrap_or(0);
                info!(
                    "💰 Customer {} paid {}",
                    Self::str_field(object, "/customer"),
                    Decimal::new(paid, 2)
                );
            }
            "invoice.payment_failed" => {
                warn!("❌ Payment failed for customer {}", Self::str_field(object, "/customer"));
            }
            other => info!("🤷 Unhandled webhook event type: {}", other),
        }

        Ok(())
    }
}

#[async_trait]
impl WebhookServiceTrait for WebhookService {
    async fn receive(&self, signature: Option<&str>, payload: &[u8]) -> AppResult<WebhookOutcome> {
        let Some(secret) = self.secret.as_deref() else {
            info!("🧪 Webhook secret not configured, acknowledging without processing");
            return Ok(WebhookOutcome::Development);
        };

        let signature = signature
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::BadRequest("Missing signature".to_string()))?;

        if let Err(e) = verify_signature(secret, signature, payload, Utc::now().timestamp(), self.tolerance_secs) {
            warn!("🔐 Webhook signature verification failed: {}", e);
            return Err(AppError::BadRequest("Invalid signature".to_string()));
        }

        let event: WebhookEvent = serde_json::from_slice(payload)
            .map_err(|e| AppError::BadRequest(format!("Invalid webhook payload: {}", e)))?;

        self.dispatch(&event).await?;
        Ok(WebhookOutcome::Processed)
    }
}
