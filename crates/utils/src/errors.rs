use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Valid email required")]
    InvalidEmail,

    #[error("{0}")]
    InvalidAmount(String),

    #[error("Invalid plan ID")]
    InvalidPlan,

    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Affiliate code required")]
    AffiliateCodeRequired,

    #[error("API key required")]
    ApiKeyRequired,

    #[error("{0}")]
    NotFound(String),

    /// 内测名额已满，不排队
    #[error("Beta is currently full")]
    BetaFull,

    #[error(transparent)]
    ValidationError(#[from] validator::ValidationErrors),

    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    #[error("{0}")]
    InternalServerErrorWithContext(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidEmail
            | AppError::InvalidAmount(_)
            | AppError::InvalidPlan
            | AppError::BadRequest(_)
            | AppError::BetaFull
            | AppError::ValidationError(_)
            | AppError::JsonRejection(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::AffiliateCodeRequired | AppError::ApiKeyRequired => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerErrorWithContext(_) | AppError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::BetaFull => json!({ "success": false, "error": self.to_string(), "waitlist": true }),
            AppError::ValidationError(e) => {
                json!({ "success": false, "error": format!("Invalid request: {}", e).replace('\n', ", ") })
            }
            AppError::InternalServerErrorWithContext(_) | AppError::Anyhow(_) => {
                error!("❌ 内部错误: {:?}", self);
                json!({ "success": false, "error": "Internal server error" })
            }
            _ => json!({ "success": false, "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
