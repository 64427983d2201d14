//! Expiration Policy Module
//!
//! Computes absolute expiry times and decides whether an entry is still live.
//!
//! A zero TTL means the entry never expires. It is the only way to ask for a
//! permanent entry, so it is never read as "already expired".

use std::time::{Duration, Instant};

// == TTL Status ==
/// Remaining lifetime of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlStatus {
    /// Key is not in the cache, or was expired and has just been purged
    Missing,
    /// Key is present and never expires
    Never,
    /// Key is present and expires after this duration
    Remaining(Duration),
}

// == Expiration Policy ==
/// Resolves per-entry TTLs against the cache-wide default.
#[derive(Debug, Clone, Copy)]
pub struct ExpirationPolicy {
    default_ttl: Duration,
}

impl ExpirationPolicy {
    // == Constructor ==
    /// Creates a policy with the given default TTL (zero = never expires).
    pub fn new(default_ttl: Duration) -> Self {
        Self { default_ttl }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Compute Expiry ==
    /// Returns the absolute expiry for an entry written at `now`.
    ///
    /// An explicit `ttl` overrides the default. Returns None when the
    /// resolved TTL is zero or the deadline is not representable.
    pub fn compute_expiry(&self, now: Instant, ttl: Option<Duration>) -> Option<Instant> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        if ttl.is_zero() {
            return None;
        }
        now.checked_add(ttl)
    }

    // == Is Expired ==
    /// Checks if an entry with this expiry is expired at `now`.
    ///
    /// Boundary condition: expired once `now >= expires_at`, so an entry is
    /// gone the instant its TTL has fully elapsed.
    pub fn is_expired(expires_at: Option<Instant>, now: Instant) -> bool {
        match expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Remaining ==
    /// Time left before expiry. Callers purge expired entries first.
    pub fn remaining(expires_at: Option<Instant>, now: Instant) -> TtlStatus {
        match expires_at {
            Some(deadline) => TtlStatus::Remaining(deadline.saturating_duration_since(now)),
            None => TtlStatus::Never,
        }
    }
}

// == Utility Functions ==
/// Converts signed seconds from external input into a TTL.
///
/// Zero and negative values both mean "never expires".
pub fn ttl_from_secs(secs: i64) -> Duration {
    if secs <= 0 {
        Duration::ZERO
    } else {
        Duration::from_secs(secs as u64)
    }
}
