pub mod affiliate;
pub mod beta;
pub mod checkout;
pub mod plan;
pub mod signal;
pub mod waitlist;
pub mod webhook;

use affiliate::{AffiliateService, DynAffiliateService};
use beta::{BetaService, DynBetaService};
use checkout::{CheckoutService, DynCheckoutService};
use database::Database;
use plan::PlanService;
use signal::{DynSignalService, SignalService};
use std::sync::Arc;
use tracing::{info, warn};
use utils::AppConfig;
use waitlist::{DynWaitlistService, WaitlistService};
use webhook::{DynWebhookService, WebhookService};

#[derive(Clone)]
pub struct Services {
    pub affiliate: DynAffiliateService,
    pub beta: DynBetaService,
    pub waitlist: DynWaitlistService,
    pub plan: PlanService,
    pub checkout: DynCheckoutService,
    pub signal: DynSignalService,
    pub webhook: DynWebhookService,
    pub config: Arc<AppConfig>,
}

impl Services {
    pub fn new(db: Database, config: Arc<AppConfig>) -> Self {
        let database = Arc::new(db);
        let plan = PlanService::new();

        let affiliate = Arc::new(AffiliateService::new(database.clone())) as DynAffiliateService;
        let beta = Arc::new(BetaService::new(database.clone(), config.max_beta_users)) as DynBetaService;
        let waitlist = Arc::new(WaitlistService::new(database.clone())) as DynWaitlistService;
        let checkout = Arc::new(CheckoutService::new(database.clone(), plan.clone())) as DynCheckoutService;
        let signal = Arc::new(SignalService::new(database.clone())) as DynSignalService;
        let webhook =
            Arc::new(WebhookService::new(affiliate.clone(), config.stripe_webhook_secret.clone())) as DynWebhookService;

        if config.admin_secret.is_none() {
            warn!("⚠️ ADMIN_SECRET not set, admin endpoints will reject every request");
        }
        if config.is_production() && config.stripe_webhook_secret.is_none() {
            warn!("⚠️ STRIPE_WEBHOOK_SECRET not set, webhook events will be acknowledged but ignored");
        }
        info!("🧠 initializing services... (beta capacity: {})", config.max_beta_users);

        Self {
            affiliate,
            beta,
            waitlist,
            plan,
            checkout,
            signal,
            webhook,
            config,
        }
    }
}
