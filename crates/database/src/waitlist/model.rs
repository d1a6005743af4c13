use chrono::prelude::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 落地页等候名单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WaitlistEntry {
    pub email: String,
    pub timestamp: DateTime<Utc>,
    /// 来源页面，默认 landing
    pub source: String,
}
