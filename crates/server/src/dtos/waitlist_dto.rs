use database::waitlist::model::WaitlistEntry;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Clone, Serialize, Deserialize, Debug, Validate, Default, ToSchema)]
pub struct JoinWaitlistDto {
    pub email: Option<String>,
    #[validate(length(max = 64))]
    pub source: Option<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitlistResponse {
    pub success: bool,
    pub message: String,
    pub is_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct WaitlistResponse {
    pub success: bool,
    pub count: usize,
    pub emails: Vec<WaitlistEntry>,
}
