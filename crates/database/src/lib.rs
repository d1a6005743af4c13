////////////////////////////////////////////////////////////////////////
//
// 1. 每个Domain(Entity)单独一个文件夹
// 2. 每个Domain由两部分组成:
//    - model: 定义Schema
//    - repository: Trait形式的存储抽象 + 基于内存集合的实现
//
// 数据只在进程生命周期内有效，重启即清空
//
//////////////////////////////////////////////////////////////////////

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::info;

pub mod affiliate;
pub mod beta;
pub mod checkout;
pub mod serde_helpers;
pub mod signal;
pub mod waitlist;

/// 进程内集合，读写分离加锁
pub type Collection<T> = Arc<RwLock<T>>;

#[derive(Clone, Debug, Default)]
pub struct Database {
    /// 以推广码为键
    pub affiliates: Collection<HashMap<String, affiliate::model::AffiliateAccount>>,
    pub referrals: Collection<Vec<affiliate::model::Referral>>,
    pub beta_users: Collection<Vec<beta::model::BetaUser>>,
    pub waitlist: Collection<Vec<waitlist::model::WaitlistEntry>>,
    /// 以会话ID为键
    pub checkout_sessions: Collection<HashMap<String, checkout::model::CheckoutSession>>,
    pub signal_subscriptions: Collection<Vec<signal::model::SignalSubscription>>,
}

impl Database {
    pub fn new() -> Self {
        info!("🧱 in-memory database initialized.");

        Self::default()
    }
}
