use crate::{beta::model::BetaUser, Database};
use async_trait::async_trait;
use std::sync::Arc;
use utils::AppResult;

pub type DynBetaRepository = Arc<dyn BetaRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BetaRepositoryTrait {
    async fn find_beta_user(&self, email: &str) -> AppResult<Option<BetaUser>>;

    // 追加一条内测记录，返回追加后的总数
    async fn insert_beta_user(&self, user: BetaUser) -> AppResult<usize>;

    async fn count_beta_users(&self) -> AppResult<usize>;

    async fn list_beta_users(&self) -> AppResult<Vec<BetaUser>>;
}

#[async_trait]
impl BetaRepositoryTrait for Database {
    async fn find_beta_user(&self, email: &str) -> AppResult<Option<BetaUser>> {
        let users = self.beta_users.read().await;

        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_beta_user(&self, user: BetaUser) -> AppResult<usize> {
        let mut users = self.beta_users.write().await;
        users.push(user);

        Ok(users.len())
    }

    async fn count_beta_users(&self) -> AppResult<usize> {
        Ok(self.beta_users.read().await.len())
    }

    async fn list_beta_users(&self) -> AppResult<Vec<BetaUser>> {
        Ok(self.beta_users.read().await.clone())
    }
}
