//! Time source seam for expiry deadlines.
//!
//! # Responsibility
//! - Abstract "now" so notification expiry is deterministic under test.
//!
//! # Invariants
//! - `now_ms` is monotone non-decreasing for `ManualClock`; `SystemClock`
//!   follows the wall clock.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Millisecond time source consulted for notification deadlines.
pub trait Clock {
    /// Current time in milliseconds. Only differences matter; the epoch is
    /// an implementation detail.
    fn now_ms(&self) -> u64;
}

/// Wall-clock time source used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Manually advanced clock for tests and deterministic playback.
///
/// Clones share the same instant, so a test can keep one handle while the
/// mailbox owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}
