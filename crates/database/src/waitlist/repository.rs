use crate::{waitlist::model::WaitlistEntry, Database};
use async_trait::async_trait;
use std::sync::Arc;
use utils::AppResult;

pub type DynWaitlistRepository = Arc<dyn WaitlistRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait WaitlistRepositoryTrait {
    async fn find_waitlist_entry(&self, email: &str) -> AppResult<Option<WaitlistEntry>>;

    // 返回写入后的排队位置(从1开始)
    async fn append_waitlist_entry(&self, entry: WaitlistEntry) -> AppResult<usize>;

    async fn list_waitlist(&self) -> AppResult<Vec<WaitlistEntry>>;
}

#[async_trait]
impl WaitlistRepositoryTrait for Database {
    async fn find_waitlist_entry(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        let waitlist = self.waitlist.read().await;

        Ok(waitlist.iter().find(|w| w.email == email).cloned())
    }

    async fn append_waitlist_entry(&self, entry: WaitlistEntry) -> AppResult<usize> {
        let mut waitlist = self.waitlist.write().await;
        waitlist.push(entry);

        Ok(waitlist.len())
    }

    async fn list_waitlist(&self) -> AppResult<Vec<WaitlistEntry>> {
        Ok(self.waitlist.read().await.clone())
    }
}
