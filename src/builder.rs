//! Index builder for flexible configuration
//!
//! This module provides a builder pattern for creating indexes with tuned
//! query settings, optionally pre-loaded with entries.

use crate::config::{IndexConfig, QueryStrategy};
use crate::error::Result;
use crate::index::LinearQuadtree;
use geo::Point;

/// Builder for [`LinearQuadtree`] configuration and initial contents.
///
/// ```rust
/// use linquad::{IndexBuilder, Point, QueryStrategy};
///
/// let index = IndexBuilder::new()
///     .split_threshold(5)
///     .default_strategy(QueryStrategy::BruteForce)
///     .entry(Point::new(-74.0060, 40.7128), "NYC")
///     .build()?;
/// assert_eq!(index.len(), 1);
/// # Ok::<(), linquad::IndexError>(())
/// ```
#[derive(Debug)]
pub struct IndexBuilder<T> {
    config: IndexConfig,
    entries: Vec<(Point, T)>,
}

impl<T> IndexBuilder<T> {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: IndexConfig::default(),
            entries: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: IndexConfig) -> Self {
        self.config = config;
        self
    }

    pub fn split_threshold(mut self, threshold: usize) -> Self {
        self.config = self.config.with_split_threshold(threshold);
        self
    }

    pub fn default_strategy(mut self, strategy: QueryStrategy) -> Self {
        self.config = self.config.with_default_strategy(strategy);
        self
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_initial_capacity(capacity);
        self
    }

    /// Queue an entry to insert at build time.
    pub fn entry(mut self, point: Point, item: T) -> Self {
        self.entries.push((point, item));
        self
    }

    pub fn entries<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (Point, T)>,
    {
        self.entries.extend(entries);
        self
    }
}

impl<T: PartialEq> IndexBuilder<T> {
    /// Build the index. Fails on invalid configuration or the first invalid coordinate.
    pub fn build(self) -> Result<LinearQuadtree<T>> {
        let mut index = LinearQuadtree::with_config(self.config)?;
        let queued = self.entries.len();
        let added = index.insert_batch(self.entries)?;
        if added < queued {
            log::debug!("Dropped {} duplicate entries while building index", queued - added);
        }
        Ok(index)
    }
}

impl<T> Default for IndexBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
