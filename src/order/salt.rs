//! Order salts.
//!
//! The exchange keys fill state by order hash, so two orders with identical
//! fields must not share a salt. A nanosecond wall-clock timestamp, bumped
//! past the previous value when the clock has not advanced, is enough.

use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::U256;
use time::OffsetDateTime;

/// Source of strictly increasing salts.
#[derive(Debug, Default)]
pub struct SaltSource {
    last: AtomicU64,
}

impl SaltSource {
    pub const fn new() -> Self {
        Self { last: AtomicU64::new(0) }
    }

    /// Process-wide source
    pub fn global() -> &'static SaltSource {
        static GLOBAL: SaltSource = SaltSource::new();
        &GLOBAL
    }

    /// Next salt, derived from the current time in nanoseconds.
    pub fn next(&self) -> U256 {
        self.next_after(now_nanos())
    }

    /// Next salt given a clock reading; never repeats or goes backwards.
    pub fn next_after(&self, clock_nanos: u64) -> U256 {
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = clock_nanos.max(prev.saturating_add(1));
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return U256::from(candidate),
                Err(actual) => prev = actual,
            }
        }
    }
}

fn now_nanos() -> u64 {
    u64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos()).unwrap_or(0)
}

/// Current Unix time in seconds
pub fn unix_now() -> u64 {
    u64::try_from(OffsetDateTime::now_utc().unix_timestamp()).unwrap_or(0)
}
