//! Bounded in-memory reading cache
//!
//! Holds the latest reading and a fixed-capacity FIFO history. The ingestion
//! loop is the only writer; API handlers read concurrently. All access goes
//! through a `tokio::sync::RwLock`, and reads hand out snapshot copies, never
//! the live buffer.

use airsense_core::Reading;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Inner {
    latest: Option<Reading>,
    history: VecDeque<Reading>,
    capacity: usize,
}

/// Shared reading cache.
///
/// Wrapped in `Arc` so it can be cheaply cloned into the ingestion task and
/// every API handler.
#[derive(Debug, Clone)]
pub struct ReadingCache {
    inner: Arc<RwLock<Inner>>,
}

impl ReadingCache {
    /// Create an empty cache retaining at most `capacity` readings.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                latest: None,
                history: VecDeque::with_capacity(capacity),
                capacity,
            })),
        }
    }

    /// Offer a reading to the cache.
    ///
    /// A reading identical to the current latest in every field is dropped
    /// silently and `false` is returned. Otherwise it becomes the latest, is
    /// appended to history (evicting the oldest entry at capacity), and `true`
    /// is returned. The caller uses the return value to decide whether to
    /// forward the reading.
    pub async fn accept(&self, reading: Reading) -> bool {
        let mut inner = self.inner.write().await;

        if inner.latest.as_ref() == Some(&reading) {
            return false;
        }

        if inner.history.len() == inner.capacity {
            inner.history.pop_front();
        }
        inner.history.push_back(reading.clone());
        inner.latest = Some(reading);
        true
    }

    /// The most recently accepted reading, if any.
    pub async fn latest(&self) -> Option<Reading> {
        self.inner.read().await.latest.clone()
    }

    /// Snapshot of the history, oldest first.
    pub async fn history(&self) -> Vec<Reading> {
        self.inner.read().await.history.iter().cloned().collect()
    }

    /// Number of readings currently held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.history.len()
    }

    /// Whether no reading has been accepted yet.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.history.is_empty()
    }

    /// Configured history capacity.
    pub async fn capacity(&self) -> usize {
        self.inner.read().await.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(n: u32) -> Reading {
        Reading::new(20.0 + n as f64, 50.0, 400 + n, 10 + n, 1)
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let cache = ReadingCache::new(100);
        assert!(cache.latest().await.is_none());
        assert!(cache.history().await.is_empty());
        assert!(cache.is_empty().await);
        assert_eq!(cache.capacity().await, 100);
    }

    #[tokio::test]
    async fn test_accept_updates_latest_and_history() {
        let cache = ReadingCache::new(100);
        let r = reading(1);

        assert!(cache.accept(r.clone()).await);
        assert_eq!(cache.latest().await, Some(r.clone()));
        assert_eq!(cache.history().await, vec![r]);
    }

    #[tokio::test]
    async fn test_duplicate_is_rejected_and_leaves_state_unchanged() {
        let cache = ReadingCache::new(100);
        let r = reading(1);

        assert!(cache.accept(r.clone()).await);
        assert!(!cache.accept(r.clone()).await);

        assert_eq!(cache.latest().await, Some(r.clone()));
        assert_eq!(cache.history().await, vec![r]);
    }

    #[tokio::test]
    async fn test_changed_reading_is_accepted_and_appended_last() {
        let cache = ReadingCache::new(100);
        let a = reading(1);
        // Differs in a single field
        let mut b = a.clone();
        b.tvoc += 1;

        assert!(cache.accept(a.clone()).await);
        assert!(cache.accept(b.clone()).await);

        assert_eq!(cache.latest().await, Some(b.clone()));
        assert_eq!(cache.history().await, vec![a, b]);
    }

    #[tokio::test]
    async fn test_reverting_to_older_value_is_accepted() {
        // Only consecutive duplicates are suppressed
        let cache = ReadingCache::new(100);
        let a = reading(1);
        let b = reading(2);

        assert!(cache.accept(a.clone()).await);
        assert!(cache.accept(b).await);
        assert!(cache.accept(a).await);
        assert_eq!(cache.len().await, 3);
    }

    #[tokio::test]
    async fn test_capacity_is_never_exceeded() {
        let cache = ReadingCache::new(5);
        for n in 0..50 {
            cache.accept(reading(n)).await;
            assert!(cache.len().await <= 5);
        }
        assert_eq!(cache.len().await, 5);
    }

    #[tokio::test]
    async fn test_eviction_is_fifo() {
        let cache = ReadingCache::new(2);
        let (a, b, c) = (reading(1), reading(2), reading(3));

        assert!(cache.accept(a).await);
        assert!(cache.accept(b.clone()).await);
        assert!(cache.accept(c.clone()).await);

        assert_eq!(cache.history().await, vec![b, c.clone()]);
        assert_eq!(cache.latest().await, Some(c));
    }

    #[tokio::test]
    async fn test_history_snapshot_is_stable_under_writes() {
        let cache = ReadingCache::new(4);
        for n in 0..4 {
            cache.accept(reading(n)).await;
        }

        let snapshot = cache.history().await;
        cache.accept(reading(99)).await;

        // The snapshot taken earlier is unaffected by the later eviction
        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot[0], reading(0));
    }

    #[tokio::test]
    async fn test_concurrent_readers_see_consistent_snapshots() {
        let cache = ReadingCache::new(10);
        let writer = {
            let cache = cache.clone();
            tokio::spawn(async move {
                for n in 0..500 {
                    cache.accept(reading(n)).await;
                }
            })
        };

        let reader = {
            let cache = cache.clone();
            tokio::spawn(async move {
                for _ in 0..500 {
                    let snapshot = cache.history().await;
                    assert!(snapshot.len() <= 10);
                    // Entries are consecutive: no half-evicted, half-appended state
                    for pair in snapshot.windows(2) {
                        assert_eq!(pair[1].eco2, pair[0].eco2 + 1);
                    }
                    tokio::task::yield_now().await;
                }
            })
        };

        writer.await.unwrap();
        reader.await.unwrap();
    }
}
