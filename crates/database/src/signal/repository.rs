use crate::{signal::model::SignalSubscription, Database};
use async_trait::async_trait;
use std::sync::Arc;
use utils::AppResult;

pub type DynSignalSubscriptionRepository = Arc<dyn SignalSubscriptionRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait SignalSubscriptionRepositoryTrait {
    async fn append_signal_subscription(&self, subscription: SignalSubscription) -> AppResult<()>;

    async fn list_signal_subscriptions(&self, api_key: &str) -> AppResult<Vec<SignalSubscription>>;
}

#[async_trait]
impl SignalSubscriptionRepositoryTrait for Database {
    async fn append_signal_subscription(&self, subscription: SignalSubscription) -> AppResult<()> {
        self.signal_subscriptions.write().await.push(subscription);

        Ok(())
    }

    async fn list_signal_subscriptions(&self, api_key: &str) -> AppResult<Vec<SignalSubscription>> {
        let subscriptions = self.signal_subscriptions.read().await;

        Ok(subscriptions.iter().filter(|s| s.api_key == api_key).cloned().collect())
    }
}
