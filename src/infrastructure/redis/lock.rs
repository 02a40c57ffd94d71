//! Redis advisory slot lock
//!
//! Acquire is a conditional `SET key token NX PX ttl`; release is an
//! atomic compare-and-delete Lua script so a holder whose lock already
//! expired cannot delete a key re-acquired by someone else.
//!
//! The lock is best-effort: connectivity errors are logged as warnings and
//! count as failed attempts. Callers receive `LockOutcome::Unavailable`
//! rather than an error and continue in degraded mode.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, RedisResult, Script};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::application::ports::{LockOptions, LockOutcome, LockToken, SlotLock};

/// Deletes the key only while the caller's token still owns it.
const RELEASE_SCRIPT: &str = r#"
if redis.call("get", KEYS[1]) == ARGV[1] then
  return redis.call("del", KEYS[1])
else
  return 0
end
"#;

pub struct RedisSlotLock {
    client: Client,
    conn: OnceCell<ConnectionManager>,
    release_script: Script,
}

impl RedisSlotLock {
    /// Build a lock service against the given Redis URL. The connection is
    /// established lazily on first use and re-established automatically by
    /// the connection manager afterwards.
    pub fn new(url: &str) -> RedisResult<Self> {
        let client = Client::open(url)?;
        info!(url, "Redis slot lock configured");
        Ok(Self {
            client,
            conn: OnceCell::new(),
            release_script: Script::new(RELEASE_SCRIPT),
        })
    }

    async fn manager(&self) -> RedisResult<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(conn.clone())
    }

    async fn try_set(&self, key: &str, token: &LockToken, ttl: Duration) -> RedisResult<bool> {
        let mut conn = self.manager().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(token.as_str())
            .arg("NX")
            .arg("PX")
            .arg(ttl.as_millis() as u64)
            .query_async(&mut conn)
            .await?;
        Ok(reply.as_deref() == Some("OK"))
    }
}

#[async_trait]
impl SlotLock for RedisSlotLock {
    async fn acquire(&self, key: &str, ttl: Duration, options: LockOptions) -> LockOutcome {
        let token = LockToken::generate();

        let mut attempts = 0u32;
        loop {
            match self.try_set(key, &token, ttl).await {
                Ok(true) => {
                    debug!(key, attempts, "Slot lock acquired");
                    return LockOutcome::Locked(token);
                }
                Ok(false) => {}
                Err(err) => {
                    warn!(key, error = %err, "Slot lock acquire attempt failed");
                }
            }

            attempts += 1;
            if attempts > options.retry_count {
                break;
            }
            tokio::time::sleep(options.retry_delay).await;
        }

        debug!(key, attempts, "Slot lock unavailable");
        LockOutcome::Unavailable
    }

    async fn release(&self, key: &str, token: &LockToken) -> bool {
        let mut conn = match self.manager().await {
            Ok(conn) => conn,
            Err(err) => {
                warn!(key, error = %err, "Slot lock release failed");
                return false;
            }
        };

        let deleted: RedisResult<i64> = self
            .release_script
            .key(key)
            .arg(token.as_str())
            .invoke_async(&mut conn)
            .await;

        match deleted {
            Ok(n) => n == 1,
            Err(err) => {
                warn!(key, error = %err, "Slot lock release failed");
                false
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    // Integration tests require Redis running on localhost:6379.
    // Run with: cargo test -- --ignored

    fn test_key() -> String {
        format!("lock:test:{}", Uuid::new_v4())
    }

    fn lock() -> RedisSlotLock {
        RedisSlotLock::new("redis://localhost:6379").expect("redis client")
    }

    fn no_retry() -> LockOptions {
        LockOptions {
            retry_count: 0,
            retry_delay: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn acquire_release_roundtrip() {
        let lock = lock();
        let key = test_key();

        let outcome = lock
            .acquire(&key, Duration::from_secs(5), no_retry())
            .await;
        let LockOutcome::Locked(token) = outcome else {
            panic!("expected lock acquisition");
        };

        assert!(lock.release(&key, &token).await);

        // Released key is immediately lockable again with a fresh token
        let second = lock
            .acquire(&key, Duration::from_secs(5), no_retry())
            .await;
        let LockOutcome::Locked(second_token) = second else {
            panic!("expected re-acquisition");
        };
        assert_ne!(token, second_token);
        lock.release(&key, &second_token).await;
    }

    #[tokio::test]
    #[ignore]
    async fn wrong_token_does_not_release() {
        let lock = lock();
        let key = test_key();

        let LockOutcome::Locked(token) = lock
            .acquire(&key, Duration::from_secs(5), no_retry())
            .await
        else {
            panic!("expected lock acquisition");
        };

        // A stranger's token must not free the holder's key
        assert!(!lock.release(&key, &LockToken::generate()).await);

        // The real holder still owns the key: a third party cannot acquire
        let third = lock
            .acquire(&key, Duration::from_secs(5), no_retry())
            .await;
        assert_eq!(third, LockOutcome::Unavailable);

        assert!(lock.release(&key, &token).await);
    }

    #[tokio::test]
    #[ignore]
    async fn lock_expires_after_ttl() {
        let lock = lock();
        let key = test_key();

        let LockOutcome::Locked(_token) = lock
            .acquire(&key, Duration::from_millis(100), no_retry())
            .await
        else {
            panic!("expected lock acquisition");
        };

        tokio::time::sleep(Duration::from_millis(250)).await;

        let reacquired = lock
            .acquire(&key, Duration::from_secs(5), no_retry())
            .await;
        let LockOutcome::Locked(token) = reacquired else {
            panic!("expected acquisition after expiry");
        };
        lock.release(&key, &token).await;
    }

    #[tokio::test]
    #[ignore]
    async fn contended_acquire_retries_then_gives_up() {
        let lock = lock();
        let key = test_key();

        let LockOutcome::Locked(token) = lock
            .acquire(&key, Duration::from_secs(5), no_retry())
            .await
        else {
            panic!("expected lock acquisition");
        };

        let contender = lock
            .acquire(
                &key,
                Duration::from_secs(5),
                LockOptions {
                    retry_count: 2,
                    retry_delay: Duration::from_millis(20),
                },
            )
            .await;
        assert_eq!(contender, LockOutcome::Unavailable);

        lock.release(&key, &token).await;
    }
}
