//! 管理员凭证校验
//!
//! 凭证可放在 `x-admin-secret` 头，或 `Authorization: Bearer <secret>`。
//! 未配置 `ADMIN_SECRET` 时任何凭证都不被接受。

use crate::services::Services;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;
use utils::AppError;

pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// 从请求头中取出管理员凭证，`x-admin-secret` 优先
fn presented_secret(headers: &HeaderMap) -> Option<&str> {
    if let Some(secret) = headers.get(ADMIN_SECRET_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(secret);
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn services_from(parts: &Parts) -> Result<&Services, AppError> {
    parts
        .extensions
        .get::<Services>()
        .ok_or_else(|| AppError::InternalServerErrorWithContext("Services extension missing".to_string()))
}

fn is_admin(services: &Services, presented: &str) -> bool {
    match services.config.admin_secret.as_deref() {
        Some(expected) if !expected.is_empty() => expected == presented,
        _ => false,
    }
}

/// 必须携带正确的管理员凭证，否则 401
#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

#[async_trait]
impl<S> FromRequestParts<S> for AdminGuard
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let services = services_from(parts)?;

        match presented_secret(&parts.headers) {
            Some(secret) if is_admin(services, secret) => Ok(AdminGuard),
            _ => {
                warn!("🔒 Rejected admin request: {} {}", parts.method, parts.uri.path());
                Err(AppError::Unauthorized)
            }
        }
    }
}

/// 可选的管理员身份：只看 `x-admin-secret`，未携带时为 `Public`，携带了但错误时 401
///
/// 公开接口上的 `Authorization` 头可能属于别的系统，这里不予理会
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaybeAdmin {
    Public,
    Admin,
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let services = services_from(parts)?;

        let presented = parts.headers.get(ADMIN_SECRET_HEADER).and_then(|v| v.to_str().ok());

        match presented {
            None => Ok(MaybeAdmin::Public),
            Some(secret) if is_admin(services, secret) => Ok(MaybeAdmin::Admin),
            Some(_) => {
                warn!("🔒 Rejected admin credential: {} {}", parts.method, parts.uri.path());
                Err(AppError::Unauthorized)
            }
        }
    }
}
