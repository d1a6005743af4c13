use chrono::prelude::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 信号提醒订阅
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignalSubscription {
    pub api_key: String,
    /// 关注的股票代码，["ALL"] 表示全部
    pub symbols: Vec<String>,
    pub webhook_url: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
