//! Linear quadtree: items stored in Morton order.
//!
//! Items live in an arena (`Vec<T>`); an ordered map from Morton code to arena
//! slots gives each quadtree cell its set of items. A contiguous code range is
//! sliced in O(log n + k), which is what both query strategies rely on.

use crate::config::{IndexConfig, QueryStrategy};
use crate::error::Result;
use crate::morton::encode;
use crate::query::{self, QueryStats};
use crate::types::Sector;
use geo::Point;
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Arena slots of the items stored in one cell.
type Slots = SmallVec<[usize; 1]>;

/// A spatial index of `T` keyed by the Morton code of each item's coordinate.
///
/// Entries are never removed. Within one cell, items are unique by value.
///
/// ```rust
/// use linquad::{LinearQuadtree, Point, Sector};
///
/// let mut index = LinearQuadtree::new();
/// index.insert(&Point::new(-118.24, 34.05), "Los Angeles")?;
/// index.insert(&Point::new(-87.63, 41.88), "Chicago")?;
/// index.insert(&Point::new(2.35, 48.86), "Paris")?;
///
/// let sector = Sector::from_degrees(34.2, -119.4, 45.4, -75.2)?;
/// assert_eq!(index.query(&sector)?, vec![&"Chicago"]);
/// # Ok::<(), linquad::IndexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LinearQuadtree<T> {
    items: Vec<T>,
    cells: BTreeMap<u64, Slots>,
    config: IndexConfig,
}

impl<T> LinearQuadtree<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cells: BTreeMap::new(),
            config: IndexConfig::default(),
        }
    }

    /// Create an index with a validated configuration.
    pub fn with_config(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            items: Vec::with_capacity(config.initial_capacity),
            cells: BTreeMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct occupied cells.
    pub fn code_count(&self) -> usize {
        self.cells.len()
    }

    /// Items stored in the cell that `point` quantizes to.
    pub fn get(&self, point: &Point) -> Result<Vec<&T>> {
        let code = encode(point)?;
        Ok(self
            .cells
            .get(&code)
            .map(|slots| slots.iter().map(|&slot| &self.items[slot]).collect())
            .unwrap_or_default())
    }

    /// All `(code, item)` pairs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &T)> + '_ {
        self.cells
            .iter()
            .flat_map(move |(&code, slots)| slots.iter().map(move |&slot| (code, &self.items[slot])))
    }

    /// Query with the configured default strategy.
    pub fn query(&self, sector: &Sector) -> Result<Vec<&T>> {
        self.query_with_stats(sector, self.config.default_strategy)
            .map(|(items, _)| items)
    }

    /// Items inside `sector`, found by testing every key between its corner codes.
    pub fn query_brute_force(&self, sector: &Sector) -> Result<Vec<&T>> {
        self.query_with_stats(sector, QueryStrategy::BruteForce)
            .map(|(items, _)| items)
    }

    /// Items inside `sector`, found by BIGMIN/LITMAX range subdivision.
    pub fn query_optimized(&self, sector: &Sector) -> Result<Vec<&T>> {
        self.query_with_stats(sector, QueryStrategy::RangeSubdivision)
            .map(|(items, _)| items)
    }

    /// Run a query and report how much of the key space it walked.
    pub fn query_with_stats(
        &self,
        sector: &Sector,
        strategy: QueryStrategy,
    ) -> Result<(Vec<&T>, QueryStats)> {
        let (cells, stats) =
            query::execute(&self.cells, sector, strategy, self.config.split_threshold)?;

        let items = cells
            .into_iter()
            .flat_map(|slots| slots.iter().map(|&slot| &self.items[slot]))
            .collect();

        Ok((items, stats))
    }
}

impl<T: PartialEq> LinearQuadtree<T> {
    /// Insert `item` at `point`.
    ///
    /// Returns `false`, without storing anything, if an equal item is already
    /// in the same cell.
    pub fn insert(&mut self, point: &Point, item: T) -> Result<bool> {
        let code = encode(point)?;
        let slots = self.cells.entry(code).or_default();

        if slots.iter().any(|&slot| self.items[slot] == item) {
            return Ok(false);
        }

        slots.push(self.items.len());
        self.items.push(item);
        Ok(true)
    }

    /// Insert many items, stopping at the first invalid coordinate.
    ///
    /// Returns the number of items newly added.
    pub fn insert_batch<I>(&mut self, entries: I) -> Result<usize>
    where
        I: IntoIterator<Item = (Point, T)>,
    {
        let mut added = 0;
        for (point, item) in entries {
            if self.insert(&point, item)? {
                added += 1;
            }
        }
        Ok(added)
    }
}

impl<T> Default for LinearQuadtree<T> {
    fn default() -> Self {
        Self::new()
    }
}
