//! ObjectId-style identifier minting for storage adapters.
//!
//! Layout of the 12 bytes, all big-endian:
//! 4 bytes of Unix seconds, 5 bytes fixed per process, 3 bytes of a
//! wrapping counter seeded randomly. Identifiers minted by one generator are
//! unique until the counter wraps within a single second.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::domain::TripPlanId;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Mints [`TripPlanId`] values for newly inserted records.
#[derive(Debug)]
pub struct ObjectIdGenerator {
    process: [u8; 5],
    counter: AtomicU32,
}

impl ObjectIdGenerator {
    /// Generator with a random process component and counter seed.
    #[must_use]
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self::with_seed(rng.r#gen(), rng.r#gen::<u32>())
    }

    /// Deterministic generator for tests.
    #[must_use]
    pub const fn with_seed(process: [u8; 5], counter: u32) -> Self {
        Self {
            process,
            counter: AtomicU32::new(counter & COUNTER_MASK),
        }
    }

    /// Next identifier, timestamped with `at`.
    ///
    /// Instants outside the 32-bit seconds range are clamped.
    pub fn next_id(&self, at: DateTime<Utc>) -> TripPlanId {
        let seconds = u32::try_from(at.timestamp().max(0)).unwrap_or(u32::MAX);
        let count = self.counter.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;
        let s = seconds.to_be_bytes();
        let p = self.process;
        let c = count.to_be_bytes();
        TripPlanId::from_bytes([
            s[0], s[1], s[2], s[3], p[0], p[1], p[2], p[3], p[4], c[1], c[2], c[3],
        ])
    }
}

impl Default for ObjectIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
