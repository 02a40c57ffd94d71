pub mod outbound;

pub use outbound::{LockOptions, LockOutcome, LockToken, SlotLock, DEFAULT_LOCK_TTL};
