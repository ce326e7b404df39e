//! Timed in-process cache for sidebar reads.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// Revalidation window shared by every cached read.
pub const REVALIDATE_WINDOW: Duration = Duration::from_secs(120);

/// One cached value with a fixed time-to-live. A stale slot reads as a
/// miss; the caller recomputes and stores. No background refresh.
pub struct TimedCache<T> {
    ttl: Duration,
    slot: Mutex<Option<(Instant, T)>>,
}

impl<T: Clone> TimedCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// The cached value, if still within its window.
    pub fn get(&self) -> Option<T> {
        let slot = self.slot.lock();
        match slot.as_ref() {
            Some((stored_at, value)) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub fn put(&self, value: T) {
        *self.slot.lock() = Some((Instant::now(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_then_hit() {
        let cache = TimedCache::new(Duration::from_secs(60));
        assert_eq!(cache.get(), None::<u32>);

        cache.put(7u32);
        assert_eq!(cache.get(), Some(7));
    }

    #[test]
    fn test_expired_slot_reads_as_miss() {
        let cache = TimedCache::new(Duration::ZERO);
        cache.put(7u32);
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_put_replaces_value() {
        let cache = TimedCache::new(Duration::from_secs(60));
        cache.put(1u32);
        cache.put(2u32);
        assert_eq!(cache.get(), Some(2));
    }
}
