use crate::{checkout::model::CheckoutSession, Database};
use async_trait::async_trait;
use std::sync::Arc;
use utils::AppResult;

pub type DynCheckoutRepository = Arc<dyn CheckoutRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CheckoutRepositoryTrait {
    async fn put_checkout_session(&self, session: CheckoutSession) -> AppResult<()>;

    async fn find_checkout_session(&self, session_id: &str) -> AppResult<Option<CheckoutSession>>;
}

#[async_trait]
impl CheckoutRepositoryTrait for Database {
    async fn put_checkout_session(&self, session: CheckoutSession) -> AppResult<()> {
        let mut sessions = self.checkout_sessions.write().await;
        sessions.insert(session.id.clone(), session);

        Ok(())
    }

    async fn find_checkout_session(&self, session_id: &str) -> AppResult<Option<CheckoutSession>> {
        Ok(self.checkout_sessions.read().await.get(session_id).cloned())
    }
}
