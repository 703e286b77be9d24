//! Geographic value types shared by the index and the query engine.

use crate::error::{IndexError, Result};
use geo::{Point, Rect, coord};
use serde::{Deserialize, Serialize};

/// Validates a 2D point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// ```
/// use linquad::types::validate_point;
/// use geo::Point;
///
/// assert!(validate_point(&Point::new(-74.0060, 40.7128)).is_ok());
/// assert!(validate_point(&Point::new(200.0, 40.0)).is_err());
/// assert!(validate_point(&Point::new(-74.0, 95.0)).is_err());
/// ```
pub fn validate_point(point: &Point) -> Result<()> {
    check_point(point).inspect_err(|e| log::warn!("Rejecting point: {}", e))
}

fn check_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(IndexError::InvalidCoordinate(format!(
            "Longitude must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(IndexError::InvalidCoordinate(format!(
            "Latitude must be finite, got: {}",
            y
        )));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(IndexError::InvalidCoordinate(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(IndexError::InvalidCoordinate(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}

/// An axis-aligned query rectangle given by its southwest and northeast corners.
///
/// Both corners are inclusive. Sectors crossing the antimeridian are not
/// representable; split them into two queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectorCorners")]
pub struct Sector {
    southwest: Point,
    northeast: Point,
}

/// Unchecked wire form of a [`Sector`].
#[derive(Deserialize)]
struct SectorCorners {
    southwest: Point,
    northeast: Point,
}

impl TryFrom<SectorCorners> for Sector {
    type Error = IndexError;

    fn try_from(corners: SectorCorners) -> Result<Self> {
        Self::new(corners.southwest, corners.northeast)
    }
}

impl Sector {
    /// Creates a sector, rejecting invalid corners and inverted extents.
    pub fn new(southwest: Point, northeast: Point) -> Result<Self> {
        validate_point(&southwest)?;
        validate_point(&northeast)?;

        Self::check_extent(&southwest, &northeast)
            .inspect_err(|e| log::warn!("Rejecting sector: {}", e))?;

        Ok(Self {
            southwest,
            northeast,
        })
    }

    fn check_extent(southwest: &Point, northeast: &Point) -> Result<()> {
        if northeast.y() < southwest.y() {
            return Err(IndexError::InvalidSector(format!(
                "Northeast latitude {} is south of southwest latitude {}",
                northeast.y(),
                southwest.y()
            )));
        }

        if northeast.x() < southwest.x() {
            return Err(IndexError::InvalidSector(format!(
                "Northeast longitude {} is west of southwest longitude {}",
                northeast.x(),
                southwest.x()
            )));
        }

        Ok(())
    }

    /// Creates a sector from degree values, latitude first.
    ///
    /// ```
    /// use linquad::Sector;
    ///
    /// let west_us = Sector::from_degrees(34.2, -119.4, 45.4, -75.2)?;
    /// assert_eq!(west_us.southwest().x(), -119.4);
    /// assert!(Sector::from_degrees(45.4, -119.4, 34.2, -75.2).is_err());
    /// # Ok::<(), linquad::IndexError>(())
    /// ```
    pub fn from_degrees(
        south_lat: f64,
        west_lon: f64,
        north_lat: f64,
        east_lon: f64,
    ) -> Result<Self> {
        Self::new(
            Point::new(west_lon, south_lat),
            Point::new(east_lon, north_lat),
        )
    }

    /// A zero-area sector covering exactly one point.
    pub fn point(point: Point) -> Result<Self> {
        Self::new(point, point)
    }

    pub fn southwest(&self) -> Point {
        self.southwest
    }

    pub fn northeast(&self) -> Point {
        self.northeast
    }

    /// Whether `point` lies inside the sector in degree space, edges included.
    pub fn contains(&self, point: &Point) -> bool {
        point.x() >= self.southwest.x()
            && point.x() <= self.northeast.x()
            && point.y() >= self.southwest.y()
            && point.y() <= self.northeast.y()
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            coord! { x: self.southwest.x(), y: self.southwest.y() },
            coord! { x: self.northeast.x(), y: self.northeast.y() },
        )
    }
}

impl TryFrom<Rect> for Sector {
    type Error = IndexError;

    fn try_from(rect: Rect) -> Result<Self> {
        Self::new(rect.min().into(), rect.max().into())
    }
}
