use super::generator::{self, Analysis};
use crate::dtos::signal_dto::{SignalView, SignalsMeta, SignalsResponse, Tier};
use async_trait::async_trait;
use chrono::Utc;
use database::signal::{model::SignalSubscription, repository::DynSignalSubscriptionRepository};
use std::sync::Arc;
use tracing::info;
use utils::{AppError, AppResult};

pub type DynSignalService = Arc<dyn SignalServiceTrait + Send + Sync>;

const UPGRADE_URL: &str = "/pricing";

impl Tier {
    /// 根据 API key 前缀判断等级，缺失或无法识别都视为免费
    pub fn from_api_key(api_key: Option<&str>) -> Self {
        match api_key {
            Some(key) if key.starts_with("enterprise_") => Tier::Enterprise,
            Some(key) if key.starts_with("pro_") => Tier::Pro,
            Some(key) if key.starts_with("starter_") => Tier::Starter,
            _ => Tier::Free,
        }
    }

    pub fn stock_limit(&self) -> usize {
        match self {
            Tier::Free => 3,
            Tier::Starter => 5,
            Tier::Pro | Tier::Enterprise => 30,
        }
    }
}

/// 样例股票的收盘价走势参数
struct SampleStock {
    symbol: &'static str,
    base: f64,
    /// 每日线性漂移
    trend: f64,
    /// 周期波动幅度
    swing: f64,
}

const SAMPLE_DAYS: usize = 60;

// 行情数据源尚未接入，先用确定性的样例收盘价序列
const SAMPLE_STOCKS: &[SampleStock] = &[
    SampleStock { symbol: "HPG", base: 28000.0, trend: -0.003, swing: 0.02 },
    SampleStock { symbol: "FPT", base: 92000.0, trend: 0.0015, swing: 0.015 },
    SampleStock { symbol: "VIC", base: 41000.0, trend: 0.004, swing: 0.01 },
];

impl SampleStock {
    /// 收盘价按 50 VND 取整
    fn closes(&self) -> Vec<f64> {
        (0..SAMPLE_DAYS)
            .map(|day| {
                let t = day as f64;
                let price = self.base * (1.0 + self.trend * t + self.swing * (t * 0.7).sin());
                (price / 50.0).round() * 50.0
            })
            .collect()
    }
}

/// 完整的信号数据
#[derive(Debug, Clone)]
struct Signal {
    symbol: String,
    analysis: Analysis,
}

impl Signal {
    fn from_closes(symbol: &str, closes: &[f64]) -> Self {
        Self { symbol: symbol.to_string(), analysis: generator::analyze(closes) }
    }

    fn project(&self, tier: Tier) -> SignalView {
        let starter = tier != Tier::Free;
        let full = matches!(tier, Tier::Pro | Tier::Enterprise);
        let a = &self.analysis;

        SignalView {
            symbol: self.symbol.clone(),
            price: starter.then_some(a.price),
            predicted_price: full.then_some(a.predicted_price),
            signal: a.signal,
            score: starter.then_some(a.score),
            rsi: starter.then_some(a.rsi),
            macd: full.then_some(a.macd),
            confidence: full.then_some(a.confidence),
            timestamp: Utc::now(),
            reasons: full.then(|| a.reasons.clone()),
        }
    }
}

#[async_trait]
pub trait SignalServiceTrait {
    async fn list(&self, tier: Tier, symbol: Option<&str>, signal_type: Option<&str>) -> AppResult<SignalsResponse>;

    async fn subscribe(
        &self,
        api_key: Option<&str>,
        symbols: Option<Vec<String>>,
        webhook_url: Option<String>,
        telegram_chat_id: Option<String>,
    ) -> AppResult<SignalSubscription>;
}

pub struct SignalService {
    repository: DynSignalSubscriptionRepository,
    signals: Vec<Signal>,
}

impl SignalService {
    pub fn new(repository: DynSignalSubscriptionRepository) -> Self {
        let signals: Vec<Signal> = SAMPLE_STOCKS
            .iter()
            .map(|stock| Signal::from_closes(stock.symbol, &stock.closes()))
            .collect();
        info!("📈 Generated {} signals from sample closes", signals.len());

        Self { repository, signals }
    }
}

#[async_trait]
impl SignalServiceTrait for SignalService {
    async fn list(&self, tier: Tier, symbol: Option<&str>, signal_type: Option<&str>) -> AppResult<SignalsResponse> {
        let symbol = symbol.filter(|s| !s.is_empty()).map(str::to_uppercase);
        let signal_type = signal_type.filter(|s| !s.is_empty()).map(str::to_uppercase);
        let stock_limit = tier.stock_limit();

        let signals: Vec<SignalView> = self
            .signals
            .iter()
            .filter(|s| symbol.as_deref().map_or(true, |sym| s.symbol == sym))
            .filter(|s| signal_type.as_deref().map_or(true, |t| s.analysis.signal.as_str().contains(t)))
            .take(stock_limit)
            .map(|s| s.project(tier))
            .collect();

        Ok(SignalsResponse {
            success: true,
            tier,
            count: signals.len(),
            signals,
            meta: SignalsMeta {
                timestamp: Utc::now(),
                stock_limit,
                upgrade_url: (tier == Tier::Free).then(|| UPGRADE_URL.to_string()),
            },
        })
    }

    async fn subscribe(
        &self,
        api_key: Option<&str>,
        symbols: Option<Vec<String>>,
        webhook_url: Option<String>,
        telegram_chat_id: Option<String>,
    ) -> AppResult<SignalSubscription> {
        let api_key = api_key.filter(|k| !k.is_empty()).ok_or(AppError::ApiKeyRequired)?;

        let subscription = SignalSubscription {
            api_key: api_key.to_string(),
            symbols: symbols.filter(|s| !s.is_empty()).unwrap_or_else(|| vec!["ALL".to_string()]),
            webhook_url,
            telegram_chat_id,
            created_at: Utc::now(),
        };

        self.repository.append_signal_subscription(subscription.clone()).await?;
        info!("🔔 Signal subscription created for {:?}", subscription.symbols);

        Ok(subscription)
    }
}
