use async_trait::async_trait;
use chrono::Utc;
use database::waitlist::{model::WaitlistEntry, repository::DynWaitlistRepository};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use utils::{require_email, AppResult};

pub type DynWaitlistService = Arc<dyn WaitlistServiceTrait + Send + Sync>;

/// 加入结果：`position` 只在首次加入时有值
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub is_new: bool,
    pub position: Option<usize>,
}

#[async_trait]
pub trait WaitlistServiceTrait {
    async fn join(&self, email: Option<&str>, source: Option<&str>) -> AppResult<JoinOutcome>;

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>>;
}

pub struct WaitlistService {
    repository: DynWaitlistRepository,
    gate: Mutex<()>,
}

impl WaitlistService {
    pub fn new(repository: DynWaitlistRepository) -> Self {
        Self {
            repository,
            gate: Mutex::new(()),
        }
    }
}

#[async_trait]
impl WaitlistServiceTrait for WaitlistService {
    async fn join(&self, email: Option<&str>, source: Option<&str>) -> AppResult<JoinOutcome> {
        let email = require_email(email)?;

        let _guard = self.gate.lock().await;

        if self.repository.find_waitlist_entry(email).await?.is_some() {
            return Ok(JoinOutcome {
                is_new: false,
                position: None,
            });
        }

        let entry = WaitlistEntry {
            email: email.to_string(),
            timestamp: Utc::now(),
            source: source.filter(|s| !s.is_empty()).unwrap_or("landing").to_string(),
        };
        let position = self.repository.append_waitlist_entry(entry).await?;

        info!("📧 New waitlist signup: {}", email);

        Ok(JoinOutcome {
            is_new: true,
            position: Some(position),
        })
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        self.repository.list_waitlist().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::Database;
    use utils::AppError;

    #[tokio::test]
    async fn test_join_and_duplicate() {
        let service = WaitlistService::new(Arc::new(Database::new()));

        let first = service.join(Some("a@x.com"), None).await.unwrap();
        let second = service.join(Some("b@x.com"), Some("pricing")).await.unwrap();
        let again = service.join(Some("a@x.com"), Some("pricing")).await.unwrap();

        assert_eq!(first, JoinOutcome { is_new: true, position: Some(1) });
        assert_eq!(second.position, Some(2));
        assert_eq!(again, JoinOutcome { is_new: false, position: None });

        let entries = service.list().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source, "landing");
        assert_eq!(entries[1].source, "pricing");
    }

    #[tokio::test]
    async fn test_join_rejects_invalid_email() {
        let service = WaitlistService::new(Arc::new(Database::new()));

        let result = service.join(Some("@x.com"), None).await;
        assert!(matches!(result, Err(AppError::InvalidEmail)));
        assert!(service.list().await.unwrap().is_empty());
    }
}
