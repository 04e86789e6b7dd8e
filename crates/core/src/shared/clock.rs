use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Time source for settle deadlines and capture timestamps, in unix
/// milliseconds.
///
/// A port so that scripted replays and tests can drive the settle delay
/// deterministically instead of sleeping through it.
pub trait Clock: Send {
    fn now_ms(&self) -> u64;
}

/// Wall-clock adapter backed by `SystemTime`.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Manually advanced clock for scripted replays and tests.
///
/// Clones share the same underlying instant, so a caller can keep a handle
/// and advance time while the session controller owns another.
#[derive(Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.fetch_add(delta_ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_at_given_instant() {
        let clock = ManualClock::new(5000);
        assert_eq!(clock.now_ms(), 5000);
    }

    #[test]
    fn test_manual_clock_advance_is_shared_across_clones() {
        let clock = ManualClock::new(0);
        let handle = clock.clone();
        handle.advance(1500);
        assert_eq!(clock.now_ms(), 1500);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
