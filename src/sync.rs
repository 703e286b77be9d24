//! Thread-safe wrapper for concurrent index access.
//!
//! `SyncQuadtree` wraps a [`LinearQuadtree`] in `Arc<RwLock<_>>`: any number
//! of readers query concurrently while inserts take the lock exclusively.
//!
//! ```toml
//! [dependencies]
//! linquad = { version = "0.1", features = ["sync"] }
//! ```
//!
//! ```rust
//! use linquad::{Point, Sector, SyncQuadtree};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = SyncQuadtree::new();
//! let writer = index.clone();
//!
//! let handle = thread::spawn(move || {
//!     writer.insert(&Point::new(-87.63, 41.88), "Chicago".to_string()).unwrap();
//! });
//! handle.join().unwrap();
//!
//! let sector = Sector::from_degrees(34.2, -119.4, 45.4, -75.2)?;
//! assert_eq!(index.query(&sector)?, vec!["Chicago".to_string()]);
//! # Ok(())
//! # }
//! ```

use crate::config::{IndexConfig, QueryStrategy};
use crate::error::Result;
use crate::index::LinearQuadtree;
use crate::query::QueryStats;
use crate::types::Sector;
use geo::Point;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared, lock-protected [`LinearQuadtree`].
///
/// Query results are cloned out of the lock so no guard outlives a call.
#[derive(Debug)]
pub struct SyncQuadtree<T> {
    inner: Arc<RwLock<LinearQuadtree<T>>>,
}

impl<T> Clone for SyncQuadtree<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SyncQuadtree<T> {
    pub fn new() -> Self {
        Self::from_index(LinearQuadtree::new())
    }

    pub fn with_config(config: IndexConfig) -> Result<Self> {
        Ok(Self::from_index(LinearQuadtree::with_config(config)?))
    }

    pub fn from_index(index: LinearQuadtree<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` against the index under a shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&LinearQuadtree<T>) -> R) -> R {
        f(&self.inner.read())
    }
}

impl<T: PartialEq> SyncQuadtree<T> {
    pub fn insert(&self, point: &Point, item: T) -> Result<bool> {
        self.inner.write().insert(point, item)
    }

    pub fn insert_batch<I>(&self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = (Point, T)>,
    {
        self.inner.write().insert_batch(entries)
    }
}

impl<T: Clone> SyncQuadtree<T> {
    pub fn query(&self, sector: &Sector) -> Result<Vec<T>> {
        let strategy = self.inner.read().config().default_strategy;
        self.query_with_stats(sector, strategy)
            .map(|(items, _)| items)
    }

    pub fn query_brute_force(&self, sector: &Sector) -> Result<Vec<T>> {
        self.query_with_stats(sector, QueryStrategy::BruteForce)
            .map(|(items, _)| items)
    }

    pub fn query_optimized(&self, sector: &Sector) -> Result<Vec<T>> {
        self.query_with_stats(sector, QueryStrategy::RangeSubdivision)
            .map(|(items, _)| items)
    }

    pub fn query_with_stats(
        &self,
        sector: &Sector,
        strategy: QueryStrategy,
    ) -> Result<(Vec<T>, QueryStats)> {
        let guard = self.inner.read();
        let (items, stats) = guard.query_with_stats(sector, strategy)?;
        Ok((items.into_iter().cloned().collect(), stats))
    }

    /// Clone the current contents into an independent index.
    pub fn snapshot(&self) -> LinearQuadtree<T> {
        self.inner.read().clone()
    }
}

impl<T> Default for SyncQuadtree<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_writers_and_readers() {
        let index = SyncQuadtree::new();
        let sector = Sector::from_degrees(-90.0, -180.0, 90.0, 180.0).unwrap();

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let index = index.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        let lon = -179.0 + (t * 250 + i) as f64 * 0.3;
                        index.insert(&Point::new(lon, t as f64), (t, i)).unwrap();
                    }
                })
            })
            .collect();

        let reader = {
            let index = index.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    let found = index.query(&sector).unwrap().len();
                    assert!(found <= 1000);
                }
            })
        };

        for w in writers {
            w.join().unwrap();
        }
        reader.join().unwrap();

        assert_eq!(index.len(), 1000);
        assert_eq!(index.query_brute_force(&sector).unwrap().len(), 1000);
        assert_eq!(index.query_optimized(&sector).unwrap().len(), 1000);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let index = SyncQuadtree::new();
        index.insert(&Point::new(1.0, 1.0), 1u8).unwrap();
        let snapshot = index.snapshot();
        index.insert(&Point::new(2.0, 2.0), 2u8).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(index.len(), 2);
        assert_eq!(index.read(|inner| inner.code_count()), 2);
    }
}
