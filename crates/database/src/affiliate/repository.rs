use crate::{
    affiliate::model::{AffiliateAccount, Referral},
    Database,
};
use async_trait::async_trait;
use std::sync::Arc;
use utils::AppResult;

pub type DynAffiliateRepository = Arc<dyn AffiliateRepositoryTrait + Send + Sync>;

// 主要用于Service中，表示提供了该Trait功能
#[async_trait]
pub trait AffiliateRepositoryTrait {
    // 按推广码查询账户
    async fn find_affiliate_by_code(&self, code: &str) -> AppResult<Option<AffiliateAccount>>;

    // 按注册邮箱查询账户
    async fn find_affiliate_by_email(&self, email: &str) -> AppResult<Option<AffiliateAccount>>;

    // 写入账户(以code为键，已存在则覆盖)
    async fn put_affiliate(&self, affiliate: AffiliateAccount) -> AppResult<()>;

    // 同时写入推荐记录与更新后的账户，二者要么都可见要么都不可见
    async fn apply_referral(&self, affiliate: AffiliateAccount, referral: Referral) -> AppResult<()>;

    // 某个推广码下的全部推荐记录(按写入顺序)
    async fn list_referrals_by_code(&self, code: &str) -> AppResult<Vec<Referral>>;
}

#[async_trait]
impl AffiliateRepositoryTrait for Database {
    async fn find_affiliate_by_code(&self, code: &str) -> AppResult<Option<AffiliateAccount>> {
        let affiliates = self.affiliates.read().await;

        Ok(affiliates.get(code).cloned())
    }

    async fn find_affiliate_by_email(&self, email: &str) -> AppResult<Option<AffiliateAccount>> {
        let affiliates = self.affiliates.read().await;

        Ok(affiliates.values().find(|a| a.email == email).cloned())
    }

    async fn put_affiliate(&self, affiliate: AffiliateAccount) -> AppResult<()> {
        let mut affiliates = self.affiliates.write().await;
        affiliates.insert(affiliate.code.clone(), affiliate);

        Ok(())
    }

    async fn apply_referral(&self, affiliate: AffiliateAccount, referral: Referral) -> AppResult<()> {
        // 固定加锁顺序: affiliates -> referrals
        let mut affiliates = self.affiliates.write().await;
        let mut referrals = self.referrals.write().await;

        affiliates.insert(affiliate.code.clone(), affiliate);
        referrals.push(referral);

        Ok(())
    }

    async fn list_referrals_by_code(&self, code: &str) -> AppResult<Vec<Referral>> {
        let referrals = self.referrals.read().await;

        Ok(referrals.iter().filter(|r| r.affiliate_code == code).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affiliate::model::ReferralStatus;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn account(code: &str, email: &str) -> AffiliateAccount {
        AffiliateAccount {
            id: format!("id-{}", code),
            email: email.to_string(),
            code: code.to_string(),
            payout_email: None,
            commission_rate: dec!(0.20),
            total_earnings: dec!(0),
            pending_payout: dec!(0),
            referral_count: 0,
            created_at: Utc::now(),
        }
    }

    fn referral(code: &str, customer: &str) -> Referral {
        Referral {
            affiliate_code: code.to_string(),
            customer_email: customer.to_string(),
            plan: "pro".to_string(),
            amount: dec!(99),
            commission: dec!(19.8),
            status: ReferralStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_put_and_find_affiliate() {
        let db = Database::new();
        db.put_affiliate(account("VN30_AAAAAA", "a@x.com")).await.unwrap();

        let by_code = db.find_affiliate_by_code("VN30_AAAAAA").await.unwrap();
        assert_eq!(by_code.map(|a| a.email), Some("a@x.com".to_string()));

        let by_email = db.find_affiliate_by_email("a@x.com").await.unwrap();
        assert_eq!(by_email.map(|a| a.code), Some("VN30_AAAAAA".to_string()));

        // 邮箱区分大小写
        assert!(db.find_affiliate_by_email("A@x.com").await.unwrap().is_none());
        assert!(db.find_affiliate_by_code("VN30_ZZZZZZ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_apply_referral_keeps_insertion_order() {
        let db = Database::new();
        let mut affiliate = account("VN30_AAAAAA", "a@x.com");
        db.put_affiliate(affiliate.clone()).await.unwrap();

        for customer in ["b@y.com", "c@y.com"] {
            affiliate.referral_count += 1;
            db.apply_referral(affiliate.clone(), referral("VN30_AAAAAA", customer))
                .await
                .unwrap();
        }
        db.apply_referral(account("VN30_BBBBBB", "o@x.com"), referral("VN30_BBBBBB", "d@y.com"))
            .await
            .unwrap();

        let referrals = db.list_referrals_by_code("VN30_AAAAAA").await.unwrap();
        let customers: Vec<&str> = referrals.iter().map(|r| r.customer_email.as_str()).collect();
        assert_eq!(customers, vec!["b@y.com", "c@y.com"]);

        let stored = db.find_affiliate_by_code("VN30_AAAAAA").await.unwrap().unwrap();
        assert_eq!(stored.referral_count, 2);
        assert_eq!(db.affiliates.read().await.len(), 2);
    }
}
