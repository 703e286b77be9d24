//! Rectangular range queries over a Morton-ordered map.
//!
//! Two strategies answer "which keys lie inside this sector":
//!
//! - **Brute force** slices the map over `[encode(sw), encode(ne)]` and tests
//!   every key. Correct, but a sector that does not line up with a quadrant
//!   drags in long runs of keys far outside it on one axis.
//! - **Range subdivision** scans the same slice, and once more than
//!   `split_threshold` keys fall outside the current box it splits the box at
//!   BIGMIN/LITMAX and recurses into both halves. Only the resulting sub-ranges
//!   are sliced for results.
//!
//! Both return the same keys; they differ only in how many entries they visit.

use crate::config::QueryStrategy;
use crate::error::Result;
use crate::morton::encode;
use crate::range::{CellBounds, ZRange};
use crate::types::Sector;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::ops::Bound;

/// Default number of out-of-box keys tolerated in a range before it is split.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 3;

/// Counters describing how a query walked the key space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Ranges sliced to collect results.
    pub ranges: usize,
    /// Keys classified while planning sub-ranges.
    pub keys_scanned: usize,
    /// Keys visited while collecting results.
    pub keys_visited: usize,
    /// Keys known to lie outside the sector before collection.
    pub keys_ignored: usize,
    pub subdivisions: usize,
    /// Keys whose entries were returned.
    pub keys_matched: usize,
}

/// Sub-ranges produced by [`plan_ranges`].
#[derive(Debug, Clone, Default)]
pub struct RangePlan {
    /// Disjoint ranges in ascending key order.
    pub ranges: Vec<ZRange>,
    /// Keys found outside their box during the scan.
    pub ignored: FxHashSet<u64>,
    pub subdivisions: usize,
    pub keys_scanned: usize,
}

/// The key range spanning a sector's corners.
pub fn sector_range(sector: &Sector) -> Result<ZRange> {
    ZRange::new(encode(&sector.southwest())?, encode(&sector.northeast())?)
}

/// Runs a query with the given strategy, returning the matching map values.
pub fn execute<'a, V>(
    map: &'a BTreeMap<u64, V>,
    sector: &Sector,
    strategy: QueryStrategy,
    split_threshold: usize,
) -> Result<(Vec<&'a V>, QueryStats)> {
    let range = sector_range(sector)?;
    let (values, stats) = match strategy {
        QueryStrategy::BruteForce => brute_force(map, range),
        QueryStrategy::RangeSubdivision => range_subdivision(map, range, split_threshold)?,
    };

    log::debug!(
        "{:?} query [{:#x}, {:#x}]: {} ranges, {} scanned, {} visited, {} ignored, {} splits, {} matched",
        strategy,
        range.min(),
        range.max(),
        stats.ranges,
        stats.keys_scanned,
        stats.keys_visited,
        stats.keys_ignored,
        stats.subdivisions,
        stats.keys_matched
    );

    Ok((values, stats))
}

/// Tests every key between the sector's corner codes.
pub fn brute_force<V>(map: &BTreeMap<u64, V>, range: ZRange) -> (Vec<&V>, QueryStats) {
    let bounds = range.bounds();
    let mut stats = QueryStats {
        ranges: 1,
        ..Default::default()
    };

    let values = map
        .range(range.min()..=range.max())
        .inspect(|_| stats.keys_visited += 1)
        .filter(|(code, _)| bounds.contains(**code))
        .map(|(_, value)| value)
        .collect::<Vec<_>>();

    stats.keys_matched = values.len();
    (values, stats)
}

/// Plans sub-ranges with [`plan_ranges`], then collects keys from them.
pub fn range_subdivision<V>(
    map: &BTreeMap<u64, V>,
    range: ZRange,
    split_threshold: usize,
) -> Result<(Vec<&V>, QueryStats)> {
    let bounds = range.bounds();
    let plan = plan_ranges(map, range, split_threshold)?;

    let mut stats = QueryStats {
        ranges: plan.ranges.len(),
        keys_scanned: plan.keys_scanned,
        keys_ignored: plan.ignored.len(),
        subdivisions: plan.subdivisions,
        ..Default::default()
    };

    let mut values = Vec::new();
    for sub in &plan.ranges {
        for (code, value) in map.range(sub.min()..=sub.max()) {
            stats.keys_visited += 1;
            if plan.ignored.contains(code) || !bounds.contains(*code) {
                continue;
            }
            values.push(value);
        }
    }

    stats.keys_matched = values.len();
    Ok((values, stats))
}

/// Decomposes `range` into sub-ranges that each hold few keys outside their box.
///
/// A range is split once more than `split_threshold` of its keys fall outside
/// its box. The threshold trades planning work against false positives left
/// for the collection pass; it does not affect which keys a query returns.
pub fn plan_ranges<V>(
    map: &BTreeMap<u64, V>,
    range: ZRange,
    split_threshold: usize,
) -> Result<RangePlan> {
    let mut subdivision = Subdivision {
        map,
        split_threshold,
        plan: RangePlan::default(),
    };
    subdivision.scan(range, None)?;
    Ok(subdivision.plan)
}

struct Subdivision<'a, V> {
    map: &'a BTreeMap<u64, V>,
    split_threshold: usize,
    plan: RangePlan,
}

impl<V> Subdivision<'_, V> {
    /// Scans `range` for keys past `last`, splitting on too many misses.
    fn scan(&mut self, range: ZRange, last: Option<u64>) -> Result<()> {
        let start = match last {
            // already classified by the parent
            Some(code) if code >= range.max() => {
                self.plan.ranges.push(range);
                return Ok(());
            }
            Some(code) if code >= range.min() => Bound::Excluded(code),
            _ => Bound::Included(range.min()),
        };

        let map = self.map;
        let bounds: CellBounds = range.bounds();
        let mut outside = 0usize;

        for (&code, _) in map.range((start, Bound::Included(range.max()))) {
            self.plan.keys_scanned += 1;
            if bounds.contains(code) {
                continue;
            }

            self.plan.ignored.insert(code);
            outside += 1;
            if outside > self.split_threshold
                && let Some((low, high)) = range.split()?
            {
                self.plan.subdivisions += 1;
                self.scan(low, Some(code))?;
                self.scan(high, Some(code))?;
                return Ok(());
            }
        }

        self.plan.ranges.push(range);
        Ok(())
    }
}
