use async_trait::async_trait;
use chrono::Utc;
use database::affiliate::{
    model::{AffiliateAccount, Referral, ReferralStatus},
    repository::DynAffiliateRepository,
};
use rand::Rng;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use utils::{require_email, AppError, AppResult};

/// 推广码前缀
pub const CODE_PREFIX: &str = "VN30_";
const CODE_SUFFIX_LEN: usize = 6;
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// 生成推广码的最大重试次数
const MAX_CODE_ATTEMPTS: usize = 16;

/// 默认佣金比例 20%
pub const DEFAULT_COMMISSION_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

pub type DynAffiliateService = Arc<dyn AffiliateServiceTrait + Send + Sync>;
pub type CodeGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// 注册结果，`created = false` 表示邮箱已注册过，返回的是原账户
#[derive(Debug, Clone)]
pub struct RegisterOutcome {
    pub affiliate: AffiliateAccount,
    pub created: bool,
}

/// 推广账户概览：账户本身 + 按写入顺序排列的推荐记录
#[derive(Debug, Clone)]
pub struct AffiliateOverview {
    pub affiliate: AffiliateAccount,
    pub referrals: Vec<Referral>,
}

#[async_trait]
pub trait AffiliateServiceTrait {
    async fn register(&self, email: Option<&str>, payout_email: Option<&str>) -> AppResult<RegisterOutcome>;

    async fn lookup(&self, code: &str) -> AppResult<AffiliateOverview>;

    /// 记录一次推荐并返回佣金
    ///
    /// 调用方负责鉴权（管理员密钥或已验签的支付回调），这里不再检查凭证
    async fn record_referral(&self, code: &str, customer_email: &str, plan: &str, amount: Decimal)
        -> AppResult<Decimal>;
}

pub struct AffiliateService {
    repository: DynAffiliateRepository,
    // 所有写操作串行化，读操作不会看到写了一半的状态
    gate: RwLock<()>,
    generate_code: CodeGenerator,
}

impl AffiliateService {
    pub fn new(repository: DynAffiliateRepository) -> Self {
        Self::with_code_generator(repository, Arc::new(generate_code))
    }

    pub fn with_code_generator(repository: DynAffiliateRepository, generate_code: CodeGenerator) -> Self {
        Self {
            repository,
            gate: RwLock::new(()),
            generate_code,
        }
    }

    /// 在写锁内调用：生成一个尚未被占用的推广码
    async fn unique_code(&self) -> AppResult<String> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = (self.generate_code)();
            if self.repository.find_affiliate_by_code(&code).await?.is_none() {
                return Ok(code);
            }
            warn!("⚠️ 推广码冲突: {} (第{}次尝试)", code, attempt);
        }

        Err(AppError::InternalServerErrorWithContext(format!(
            "无法在{}次尝试内生成唯一推广码",
            MAX_CODE_ATTEMPTS
        )))
    }
}

/// `VN30_` + 6 位大写字母数字
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CODE_SUFFIX_LEN)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect();

    format!("{}{}", CODE_PREFIX, suffix)
}

/// 0.20 -> "20%"
pub fn commission_rate_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[async_trait]
impl AffiliateServiceTrait for AffiliateService {
    async fn register(&self, email: Option<&str>, payout_email: Option<&str>) -> AppResult<RegisterOutcome> {
        let email = require_email(email)?;

        let _guard = self.gate.write().await;

        if let Some(existing) = self.repository.find_affiliate_by_email(email).await? {
            info!("🔁 推广账户已存在: {} - Code: {}", email, existing.code);
            return Ok(RegisterOutcome {
                affiliate: existing,
                created: false,
            });
        }

        let code = self.unique_code().await?;
        let affiliate = AffiliateAccount {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            code,
            payout_email: payout_email.filter(|p| !p.is_empty()).map(str::to_string),
            commission_rate: DEFAULT_COMMISSION_RATE,
            total_earnings: Decimal::ZERO,
            pending_payout: Decimal::ZERO,
            referral_count: 0,
            created_at: Utc::now(),
        };

        self.repository.put_affiliate(affiliate.clone()).await?;

        info!(
            "🤝 New affiliate registered: {} - Code: {} - PayPal: {}",
            affiliate.email,
            affiliate.code,
            affiliate.payout_email.as_deref().unwrap_or("N/A")
        );

        Ok(RegisterOutcome {
            affiliate,
            created: true,
        })
    }

    async fn lookup(&self, code: &str) -> AppResult<AffiliateOverview> {
        let _guard = self.gate.read().await;

        let affiliate = self
            .repository
            .find_affiliate_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound("Affiliate not found".to_string()))?;
        let referrals = self.repository.list_referrals_by_code(code).await?;

        Ok(AffiliateOverview { affiliate, referrals })
    }

    async fn record_referral(
        &self,
        code: &str,
        customer_email: &str,
        plan: &str,
        amount: Decimal,
    ) -> AppResult<Decimal> {
        if amount < Decimal::ZERO {
            return Err(AppError::InvalidAmount("Amount must not be negative".to_string()));
        }

        let _guard = self.gate.write().await;

        let mut affiliate = self
            .repository
            .find_affiliate_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound("Affiliate not found".to_string()))?;

        // 先算出所有新值，溢出时账户和记录都保持不变
        let overflow = || AppError::InvalidAmount("Amount is too large".to_string());
        let commission = amount.checked_mul(affiliate.commission_rate).ok_or_else(overflow)?;
        let total_earnings = affiliate.total_earnings.checked_add(commission).ok_or_else(overflow)?;
        let pending_payout = affiliate.pending_payout.checked_add(commission).ok_or_else(overflow)?;

        let referral = Referral {
            affiliate_code: affiliate.code.clone(),
            customer_email: customer_email.to_string(),
            plan: plan.to_string(),
            amount,
            commission,
            status: ReferralStatus::Pending,
            created_at: Utc::now(),
        };

        affiliate.referral_count += 1;
        affiliate.total_earnings = total_earnings;
        affiliate.pending_payout = pending_payout;

        self.repository.apply_referral(affiliate, referral).await?;

        info!("💰 Referral recorded: {} earned ${:.2}", code, commission);

        Ok(commission)
    }
}
