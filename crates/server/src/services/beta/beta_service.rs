use crate::dtos::beta_dto::{BetaAdminStats, BetaPublicStats, BetaSourceBreakdown, BetaStatusBreakdown};
use async_trait::async_trait;
use chrono::Utc;
use database::beta::{
    model::{BetaStatus, BetaUser},
    repository::DynBetaRepository,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use utils::{require_email, AppError, AppResult};

pub type DynBetaService = Arc<dyn BetaServiceTrait + Send + Sync>;

/// 报名表中除邮箱以外的字段，均可为空
#[derive(Debug, Clone, Default)]
pub struct BetaProfile {
    pub name: Option<String>,
    pub trading_experience: Option<String>,
    pub telegram_username: Option<String>,
    pub referral_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BetaSignupOutcome {
    /// 邮箱已报名，返回原状态
    AlreadyRegistered { status: BetaStatus },
    Registered {
        status: BetaStatus,
        position: usize,
        total_slots: usize,
        remaining_slots: usize,
    },
}

#[async_trait]
pub trait BetaServiceTrait {
    async fn signup(&self, email: Option<&str>, profile: BetaProfile) -> AppResult<BetaSignupOutcome>;

    async fn public_stats(&self) -> AppResult<BetaPublicStats>;

    async fn admin_stats(&self) -> AppResult<BetaAdminStats>;
}

pub struct BetaService {
    repository: DynBetaRepository,
    capacity: usize,
    gate: RwLock<()>,
}

impl BetaService {
    pub fn new(repository: DynBetaRepository, capacity: usize) -> Self {
        Self {
            repository,
            capacity,
            gate: RwLock::new(()),
        }
    }

    fn non_empty(value: Option<String>, default: &str) -> String {
        value.filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string())
    }
}

#[async_trait]
impl BetaServiceTrait for BetaService {
    async fn signup(&self, email: Option<&str>, profile: BetaProfile) -> AppResult<BetaSignupOutcome> {
        let email = require_email(email)?;

        let _guard = self.gate.write().await;

        if let Some(existing) = self.repository.find_beta_user(email).await? {
            return Ok(BetaSignupOutcome::AlreadyRegistered { status: existing.status });
        }

        // 名额已满直接拒绝，不排队
        if self.repository.count_beta_users().await? >= self.capacity {
            info!("🚫 Beta is full, rejected: {}", email);
            return Err(AppError::BetaFull);
        }

        let user = BetaUser {
            email: email.to_string(),
            name: Self::non_empty(profile.name, ""),
            trading_experience: Self::non_empty(profile.trading_experience, "beginner"),
            telegram_username: Self::non_empty(profile.telegram_username, ""),
            referral_source: Self::non_empty(profile.referral_source, "direct"),
            // 内测期间自动通过
            status: BetaStatus::Approved,
            created_at: Utc::now(),
        };

        let position = self.repository.insert_beta_user(user).await?;
        info!("🎉 New beta user: {} ({}/{})", email, position, self.capacity);

        Ok(BetaSignupOutcome::Registered {
            status: BetaStatus::Approved,
            position,
            total_slots: self.capacity,
            remaining_slots: self.capacity.saturating_sub(position),
        })
    }

    async fn public_stats(&self) -> AppResult<BetaPublicStats> {
        let _guard = self.gate.read().await;
        let count = self.repository.count_beta_users().await?;

        let percent_full = if self.capacity == 0 {
            100
        } else {
            ((count as f64 / self.capacity as f64) * 100.0).round() as u32
        };

        Ok(BetaPublicStats {
            success: true,
            total_slots: self.capacity,
            remaining_slots: self.capacity.saturating_sub(count),
            percent_full,
        })
    }

    async fn admin_stats(&self) -> AppResult<BetaAdminStats> {
        let _guard = self.gate.read().await;
        let users = self.repository.list_beta_users().await?;

        let count_status = |status: BetaStatus| users.iter().filter(|u| u.status == status).count();
        let count_source = |source: &str| users.iter().filter(|u| u.referral_source == source).count();

        let breakdown = BetaStatusBreakdown {
            approved: count_status(BetaStatus::Approved),
            pending: count_status(BetaStatus::Pending),
            rejected: count_status(BetaStatus::Rejected),
        };
        let sources = BetaSourceBreakdown {
            google: count_source("google"),
            facebook: count_source("facebook"),
            youtube: count_source("youtube"),
            friend: count_source("friend"),
            telegram: count_source("telegram"),
            other: count_source("other"),
        };

        Ok(BetaAdminStats {
            success: true,
            total_users: users.len(),
            max_users: self.capacity,
            users,
            breakdown,
            sources,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::Database;

    fn create_test_service(capacity: usize) -> BetaService {
        BetaService::new(Arc::new(Database::new()), capacity)
    }

    fn profile(source: &str) -> BetaProfile {
        BetaProfile {
            referral_source: Some(source.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_signup_reports_position() {
        let service = create_test_service(100);

        let first = service.signup(Some("a@x.com"), BetaProfile::default()).await.unwrap();
        let second = service.signup(Some("b@x.com"), BetaProfile::default()).await.unwrap();

        assert_eq!(
            first,
            BetaSignupOutcome::Registered {
                status: BetaStatus::Approved,
                position: 1,
                total_slots: 100,
                remaining_slots: 99,
            }
        );
        assert!(matches!(
            second,
            BetaSignupOutcome::Registered { position: 2, remaining_slots: 98, .. }
        ));
    }

    #[tokio::test]
    async fn test_signup_fills_defaults() {
        let service = create_test_service(10);
        service.signup(Some("a@x.com"), BetaProfile::default()).await.unwrap();

        let stats = service.admin_stats().await.unwrap();
        let user = &stats.users[0];
        assert_eq!(user.trading_experience, "beginner");
        assert_eq!(user.referral_source, "direct");
        assert_eq!(user.name, "");
        assert_eq!(user.status, BetaStatus::Approved);
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_email() {
        let service = create_test_service(10);

        let result = service.signup(Some("nope"), BetaProfile::default()).await;
        assert!(matches!(result, Err(AppError::InvalidEmail)));
        assert_eq!(service.public_stats().await.unwrap().remaining_slots, 10);
    }

    #[tokio::test]
    async fn test_capacity_is_enforced_and_resubmits_are_idempotent() {
        let capacity = 5;
        let service = create_test_service(capacity);

        for i in 0..capacity {
            service
                .signup(Some(&format!("user{}@x.com", i)), BetaProfile::default())
                .await
                .unwrap();
        }

        let overflow = service.signup(Some("late@x.com"), BetaProfile::default()).await;
        assert!(matches!(overflow, Err(AppError::BetaFull)));

        for i in 0..capacity {
            let again = service
                .signup(Some(&format!("user{}@x.com", i)), BetaProfile::default())
                .await
                .unwrap();
            assert_eq!(
                again,
                BetaSignupOutcome::AlreadyRegistered {
                    status: BetaStatus::Approved
                }
            );
        }

        let stats = service.public_stats().await.unwrap();
        assert_eq!(stats.remaining_slots, 0);
        assert_eq!(stats.percent_full, 100);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_signups_never_exceed_capacity() {
        let capacity = 10;
        let extra = 7;
        let service = Arc::new(create_test_service(capacity));

        let handles: Vec<_> = (0..capacity + extra)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .signup(Some(&format!("racer{}@x.com", i)), BetaProfile::default())
                        .await
                })
            })
            .collect();

        let mut registered = 0;
        let mut full = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(BetaSignupOutcome::Registered { .. }) => registered += 1,
                Err(AppError::BetaFull) => full += 1,
                other => panic!("unexpected outcome: {:?}", other),
            }
        }

        assert_eq!(registered, capacity);
        assert_eq!(full, extra);
        assert_eq!(service.admin_stats().await.unwrap().total_users, capacity);
    }

    #[tokio::test]
    async fn test_public_stats_rounds_percent() {
        let service = create_test_service(3);
        service.signup(Some("a@x.com"), BetaProfile::default()).await.unwrap();

        let stats = service.public_stats().await.unwrap();
        assert_eq!(stats.total_slots, 3);
        assert_eq!(stats.remaining_slots, 2);
        assert_eq!(stats.percent_full, 33);
    }

    #[tokio::test]
    async fn test_admin_stats_breakdown() {
        let service = create_test_service(10);
        for (email, source) in [
            ("a@x.com", "google"),
            ("b@x.com", "google"),
            ("c@x.com", "telegram"),
            ("d@x.com", "friend"),
            ("e@x.com", ""),
        ] {
            service.signup(Some(email), profile(source)).await.unwrap();
        }

        let stats = service.admin_stats().await.unwrap();
        assert_eq!(stats.total_users, 5);
        assert_eq!(stats.max_users, 10);
        assert_eq!(stats.breakdown.approved, 5);
        assert_eq!(stats.breakdown.pending, 0);
        assert_eq!(stats.sources.google, 2);
        assert_eq!(stats.sources.telegram, 1);
        assert_eq!(stats.sources.friend, 1);
        // direct 不在固定分类中
        assert_eq!(stats.sources.other, 0);
    }
}
