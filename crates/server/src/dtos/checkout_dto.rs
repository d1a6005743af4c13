use database::checkout::model::CheckoutSession;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// 创建结账会话请求
#[derive(Clone, Serialize, Deserialize, Debug, Validate, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutDto {
    pub plan_id: Option<String>,
    /// monthly（默认）或 yearly
    pub billing_period: Option<String>,
    pub email: Option<String>,
    #[validate(length(max = 32))]
    pub affiliate_code: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutResponse {
    pub success: bool,
    pub mode: String,
    pub message: String,
    pub checkout_url: String,
    pub session_id: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckoutSessionQuery {
    pub session_id: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct CheckoutSessionResponse {
    pub success: bool,
    pub mode: String,
    pub session: CheckoutSession,
}
