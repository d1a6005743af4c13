use lazy_static::lazy_static;
use regex::Regex;

use crate::{AppError, AppResult};

lazy_static! {
    /// local-part@domain.tld，不允许空白和多余的 @
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// 缺失或格式错误的邮箱统一映射为 InvalidEmail
pub fn require_email(email: Option<&str>) -> AppResult<&str> {
    match email {
        Some(email) if is_valid_email(email) => Ok(email),
        _ => Err(AppError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("trader.one+vn30@mail.example.vn"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("a@@x.com"));
    }

    #[test]
    fn test_require_email() {
        assert_eq!(require_email(Some("a@x.com")).unwrap(), "a@x.com");
        assert!(matches!(require_email(None), Err(AppError::InvalidEmail)));
        assert!(matches!(require_email(Some("bad")), Err(AppError::InvalidEmail)));
    }
}
