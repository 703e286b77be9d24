//! Z-order (Morton) linear quadtree for 2D geographic points.
//!
//! Coordinates are quantized to Q9.22 fixed point, interleaved into 64-bit
//! Morton codes and kept in an ordered map. Rectangular queries either scan
//! the key range between the rectangle's corners or decompose it with
//! BIGMIN/LITMAX so that far-away keys are skipped.
//!
//! ```rust
//! use linquad::{LinearQuadtree, Point, Sector};
//!
//! let mut index = LinearQuadtree::new();
//! index.insert(&Point::new(-87.63, 41.88), "Chicago")?;
//! index.insert(&Point::new(-104.99, 39.74), "Denver")?;
//! index.insert(&Point::new(-80.19, 25.76), "Miami")?;
//!
//! let sector = Sector::from_degrees(34.2, -119.4, 45.4, -75.2)?;
//! let mut found = index.query_optimized(&sector)?;
//! found.sort();
//! assert_eq!(found, vec![&"Chicago", &"Denver"]);
//! assert_eq!(found.len(), index.query_brute_force(&sector)?.len());
//! # Ok::<(), linquad::IndexError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod fixed;
pub mod index;
pub mod morton;
pub mod query;
pub mod range;
pub mod types;

#[cfg(feature = "sync")]
pub mod sync;

pub use builder::IndexBuilder;
pub use config::{IndexConfig, QueryStrategy};
pub use error::{IndexError, Result};
pub use index::LinearQuadtree;
pub use query::{QueryStats, RangePlan};
pub use range::ZRange;
pub use types::Sector;

#[cfg(feature = "sync")]
pub use sync::SyncQuadtree;

pub use morton::{decode, deinterleave_x, deinterleave_y, encode, interleave};

pub use geo::{Point, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{
        IndexBuilder, IndexConfig, IndexError, LinearQuadtree, QueryStrategy, Result, Sector,
    };

    pub use geo::{Point, Rect};

    pub use crate::morton::{decode, encode};

    #[cfg(feature = "sync")]
    pub use crate::SyncQuadtree;
}
