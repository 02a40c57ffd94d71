//! Outbound ports — interfaces the booking flow calls into
//!
//! [`SlotLock`] is the architectural contract that decouples the booking
//! coordinator from the concrete lock backend. The production
//! implementation lives in
//! [`RedisSlotLock`](crate::infrastructure::redis::RedisSlotLock).
//!
//! The lock is advisory: it serializes racing booking attempts for the
//! same advocate/slot-start long enough for the availability check plus
//! write to be effectively atomic. A backend outage degrades the flow to
//! the availability check alone; it never fails a booking request.

use std::time::Duration;

use async_trait::async_trait;
use rand::RngCore;

/// Default lock lifetime; a crashed holder frees the slot after this.
pub const DEFAULT_LOCK_TTL: Duration = Duration::from_millis(5000);

/// Retry behavior for lock acquisition.
#[derive(Debug, Clone)]
pub struct LockOptions {
    /// Additional attempts after the first one
    pub retry_count: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            retry_count: 5,
            retry_delay: Duration::from_millis(150),
        }
    }
}

/// Opaque ownership proof for an acquired lock key.
///
/// Release presents this token back to the backend, which deletes the key
/// only if the stored value still matches — a holder whose lock expired
/// and was re-acquired by someone else cannot release the new holder's key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockToken(String);

impl LockToken {
    /// 128 random bits, hex encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Result of a lock acquisition attempt.
///
/// `Unavailable` is an expected outcome, not an error: callers must
/// consciously branch into degraded-mode operation instead of trusting a
/// nullable token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockOutcome {
    /// Lock held; release with the token when the critical section ends
    Locked(LockToken),
    /// All attempts exhausted or backend unreachable
    Unavailable,
}

impl LockOutcome {
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked(_))
    }
}

/// Advisory mutual-exclusion lock keyed by an opaque string.
#[async_trait]
pub trait SlotLock: Send + Sync {
    /// Try to take ownership of `key` for `ttl`. Connectivity errors are
    /// logged and count as failed attempts; this never returns an error.
    async fn acquire(&self, key: &str, ttl: Duration, options: LockOptions) -> LockOutcome;

    /// Atomically release `key` if `token` still owns it. Returns false
    /// when the token no longer matches or the backend is unreachable.
    async fn release(&self, key: &str, token: &LockToken) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_hex() {
        let a = LockToken::generate();
        let b = LockToken::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn default_options_match_lock_contract() {
        let opts = LockOptions::default();
        assert_eq!(opts.retry_count, 5);
        assert_eq!(opts.retry_delay, Duration::from_millis(150));
        assert_eq!(DEFAULT_LOCK_TTL, Duration::from_millis(5000));
    }
}
