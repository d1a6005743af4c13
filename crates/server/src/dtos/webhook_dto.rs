use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct WebhookAck {
    pub received: bool,
    /// 未配置签名密钥时为 "development"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}
