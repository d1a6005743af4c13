use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "VN30 Quantum API",
        description = "VN30 Quantum 推广、内测、订阅与交易信号接口文档",
        version = "1.0.0",
        contact(
            name = "API Support",
            email = "support@vn30quantum.com"
        )
    ),
    paths(
        // System health check
        crate::api::health,
        // Affiliate endpoints
        crate::api::affiliate_controller::register_affiliate,
        crate::api::affiliate_controller::get_affiliate,
        crate::api::affiliate_controller::record_referral,
        // Beta endpoints
        crate::api::beta_controller::signup_beta,
        crate::api::beta_controller::get_beta_stats,
        // Waitlist endpoints
        crate::api::waitlist_controller::join_waitlist,
        crate::api::waitlist_controller::list_waitlist,
        // Subscription & checkout endpoints
        crate::api::subscription_controller::list_plans,
        crate::api::subscription_controller::start_subscription,
        crate::api::checkout_controller::create_checkout,
        crate::api::checkout_controller::get_checkout,
        crate::api::webhook_controller::receive_webhook,
        // Signal endpoints
        crate::api::signal_controller::get_signals,
        crate::api::signal_controller::subscribe_signals,
    ),
    components(
        schemas(
            // Database models
            database::affiliate::model::AffiliateAccount,
            database::affiliate::model::Referral,
            database::affiliate::model::ReferralStatus,
            database::beta::model::BetaUser,
            database::beta::model::BetaStatus,
            database::waitlist::model::WaitlistEntry,
            database::checkout::model::CheckoutSession,
            database::checkout::model::BillingPeriod,
            // Affiliate DTOs
            crate::dtos::affiliate_dto::RegisterAffiliateDto,
            crate::dtos::affiliate_dto::RegisterAffiliateResponse,
            crate::dtos::affiliate_dto::AffiliateView,
            crate::dtos::affiliate_dto::AffiliateLookupResponse,
            crate::dtos::affiliate_dto::RecordReferralDto,
            crate::dtos::affiliate_dto::RecordReferralResponse,
            // Beta DTOs
            crate::dtos::beta_dto::BetaSignupDto,
            crate::dtos::beta_dto::BetaSignupResponse,
            crate::dtos::beta_dto::BetaPublicStats,
            crate::dtos::beta_dto::BetaAdminStats,
            crate::dtos::beta_dto::BetaStatusBreakdown,
            crate::dtos::beta_dto::BetaSourceBreakdown,
            // Waitlist DTOs
            crate::dtos::waitlist_dto::JoinWaitlistDto,
            crate::dtos::waitlist_dto::JoinWaitlistResponse,
            crate::dtos::waitlist_dto::WaitlistResponse,
            // Plan & checkout DTOs
            crate::dtos::plan_dto::Plan,
            crate::dtos::plan_dto::PlanLimits,
            crate::dtos::plan_dto::PlansResponse,
            crate::dtos::plan_dto::StartSubscriptionDto,
            crate::dtos::plan_dto::StartSubscriptionResponse,
            crate::dtos::checkout_dto::CreateCheckoutDto,
            crate::dtos::checkout_dto::CreateCheckoutResponse,
            crate::dtos::checkout_dto::CheckoutSessionResponse,
            crate::dtos::webhook_dto::WebhookAck,
            // Signal DTOs
            crate::dtos::signal_dto::Tier,
            crate::dtos::signal_dto::SignalKind,
            crate::dtos::signal_dto::SignalView,
            crate::dtos::signal_dto::SignalsMeta,
            crate::dtos::signal_dto::SignalsResponse,
            crate::dtos::signal_dto::SubscribeSignalsDto,
            crate::dtos::signal_dto::SignalSubscriptionView,
            crate::dtos::signal_dto::SubscribeSignalsResponse,
        )
    ),
    tags(
        (name = "系统状态", description = "服务健康检查"),
        (name = "affiliate", description = "推广账户与佣金"),
        (name = "beta", description = "内测报名"),
        (name = "waitlist", description = "等候名单"),
        (name = "subscriptions", description = "订阅套餐"),
        (name = "checkout", description = "结账会话"),
        (name = "webhook", description = "支付平台回调"),
        (name = "signals", description = "交易信号"),
    )
)]
pub struct ApiDoc;
