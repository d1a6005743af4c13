use chrono::{DateTime, Utc};
use database::signal::model::SignalSubscription;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// 订阅等级，由 `x-api-key` 前缀决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Free,
    Starter,
    Pro,
    Enterprise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::StrongBuy => "STRONG_BUY",
            SignalKind::Buy => "BUY",
            SignalKind::Neutral => "NEUTRAL",
            SignalKind::Sell => "SELL",
            SignalKind::StrongSell => "STRONG_SELL",
        }
    }
}

/// 按等级裁剪后的信号，未授权的字段不输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignalView {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_price: Option<f64>,
    pub signal: SignalKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<f64>,
    /// 置信度 0~1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SignalQuery {
    /// 股票代码，不区分大小写
    pub symbol: Option<String>,
    /// 信号类型，如 BUY / SELL
    #[serde(rename = "type")]
    pub signal_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignalsMeta {
    pub timestamp: DateTime<Utc>,
    pub stock_limit: usize,
    /// 免费用户返回升级页面，付费用户为 null
    pub upgrade_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignalsResponse {
    pub success: bool,
    pub tier: Tier,
    pub count: usize,
    pub signals: Vec<SignalView>,
    pub meta: SignalsMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeSignalsDto {
    pub symbols: Option<Vec<String>>,
    #[validate(url)]
    pub webhook_url: Option<String>,
    pub telegram_chat_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignalSubscriptionView {
    pub symbols: Vec<String>,
    pub webhook_url: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl From<SignalSubscription> for SignalSubscriptionView {
    fn from(subscription: SignalSubscription) -> Self {
        Self {
            symbols: subscription.symbols,
            webhook_url: subscription.webhook_url,
            telegram_chat_id: subscription.telegram_chat_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubscribeSignalsResponse {
    pub success: bool,
    pub message: String,
    pub subscription: SignalSubscriptionView,
}
