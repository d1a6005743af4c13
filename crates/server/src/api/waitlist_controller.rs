use crate::{
    dtos::waitlist_dto::{JoinWaitlistDto, JoinWaitlistResponse, WaitlistResponse},
    extractors::{admin_extractor::AdminGuard, validation_extractor::ValidationExtractor},
    services::Services,
};
use axum::{routing::post, Extension, Json, Router};
use utils::AppResult;

/// 加入等候名单
#[utoipa::path(
    post,
    path = "/api/v1/waitlist",
    tag = "waitlist",
    request_body = JoinWaitlistDto,
    responses(
        (status = 200, description = "加入成功或已在名单中", body = JoinWaitlistResponse),
        (status = 400, description = "邮箱格式错误")
    )
)]
pub async fn join_waitlist(
    Extension(services): Extension<Services>,
    ValidationExtractor(req): ValidationExtractor<JoinWaitlistDto>,
) -> AppResult<Json<JoinWaitlistResponse>> {
    let outcome = services
        .waitlist
        .join(req.email.as_deref(), req.source.as_deref())
        .await?;

    let message = if outcome.is_new {
        "Successfully added to waitlist"
    } else {
        "Email already registered"
    };

    Ok(Json(JoinWaitlistResponse {
        success: true,
        message: message.to_string(),
        is_new: outcome.is_new,
        position: outcome.position,
    }))
}

/// 查看等候名单（管理员）
#[utoipa::path(
    get,
    path = "/api/v1/waitlist",
    tag = "waitlist",
    params(
        ("Authorization" = String, Header, description = "Bearer <管理员密钥>")
    ),
    responses(
        (status = 200, description = "完整名单", body = WaitlistResponse),
        (status = 401, description = "管理员密钥错误")
    )
)]
pub async fn list_waitlist(
    Extension(services): Extension<Services>,
    _admin: AdminGuard,
) -> AppResult<Json<WaitlistResponse>> {
    let emails = services.waitlist.list().await?;

    Ok(Json(WaitlistResponse {
        success: true,
        count: emails.len(),
        emails,
    }))
}

pub struct WaitlistController;
impl WaitlistController {
    pub fn app() -> Router {
        Router::new().route("/", post(join_waitlist).get(list_waitlist))
    }
}
