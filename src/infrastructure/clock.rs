//! Clock implementations
//!
//! `SystemClock` for production, `ManualClock` for tests that need to move
//! time forward without sleeping.

use crate::domain::ports::Clock;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Clock backed by `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and pass another into the cache.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<RwLock<Instant>>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(RwLock::new(Instant::now())),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.read()
    }
}
