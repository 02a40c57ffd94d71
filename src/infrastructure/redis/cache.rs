//! Shared Redis cache
//!
//! Currently holds one derived value: the last-login timestamp written by
//! the `user.logged_in` subscriber, kept for 7 days.

use async_trait::async_trait;
use chrono::Utc;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisResult};
use tokio::sync::OnceCell;
use tracing::debug;
use uuid::Uuid;

use crate::notifications::ports::{LastLoginStore, NotifyError};

const LAST_LOGIN_TTL_SECS: u64 = 7 * 24 * 3600;

pub struct RedisCache {
    client: Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisCache {
    pub fn new(url: &str) -> RedisResult<Self> {
        let client = Client::open(url)?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }

    async fn manager(&self) -> RedisResult<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(conn.clone())
    }

    fn last_login_key(user_id: Uuid) -> String {
        format!("user:last_login:{}", user_id)
    }
}

#[async_trait]
impl LastLoginStore for RedisCache {
    async fn record_login(&self, user_id: Uuid) -> Result<(), NotifyError> {
        let mut conn = self
            .manager()
            .await
            .map_err(|e| NotifyError::Cache(e.to_string()))?;

        let key = Self::last_login_key(user_id);
        let value = Utc::now().timestamp_millis().to_string();
        let _: () = conn
            .set_ex(&key, value, LAST_LOGIN_TTL_SECS)
            .await
            .map_err(|e| NotifyError::Cache(e.to_string()))?;

        debug!(%user_id, "Recorded last login");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_layout_is_stable() {
        let id = Uuid::nil();
        assert_eq!(
            RedisCache::last_login_key(id),
            "user:last_login:00000000-0000-0000-0000-000000000000"
        );
    }

    // Integration test requires Redis running on localhost:6379.
    #[tokio::test]
    #[ignore]
    async fn records_last_login() {
        let cache = RedisCache::new("redis://localhost:6379").expect("redis client");
        cache.record_login(Uuid::new_v4()).await.expect("record");
    }
}
