use crate::geo::{GEO_INT_LON_MAX, GEO_INT_LON_MIN, GeoError, GeoIntPoint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned geographic rectangle in fixed-point degrees.
///
/// Used both for dataset bounds and for the visible envelope the refresh
/// pass derives from the viewport. Corners are inclusive.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeoEnvelope {
    pub min: GeoIntPoint,
    pub max: GeoIntPoint,
}

impl GeoEnvelope {
    pub fn new(xmin: i32, ymin: i32, xmax: i32, ymax: i32) -> Result<Self, GeoError> {
        if xmin > xmax || ymin > ymax {
            return Err(GeoError::UnorderedEnvelope);
        }
        Ok(Self {
            min: GeoIntPoint::new(xmin, ymin),
            max: GeoIntPoint::new(xmax, ymax),
        })
    }

    /// Smallest envelope containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoIntPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut env = Self {
            min: first,
            max: first,
        };
        for p in iter {
            env.expand_to(p);
        }
        Some(env)
    }

    pub fn expand_to(&mut self, p: GeoIntPoint) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Midpoint of the corners, truncated toward zero on each axis.
    pub fn center(&self) -> GeoIntPoint {
        let (xmin, xmax) = (self.min.x as i64, self.max.x as i64);
        let (ymin, ymax) = (self.min.y as i64, self.max.y as i64);
        GeoIntPoint::new(
            (xmin + (xmax - xmin) / 2) as i32,
            ((ymin + ymax) / 2) as i32,
        )
    }

    pub fn width(&self) -> i64 {
        self.max.x as i64 - self.min.x as i64
    }

    pub fn height(&self) -> i64 {
        self.max.y as i64 - self.min.y as i64
    }

    pub fn intersects(&self, other: &GeoEnvelope) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn contains(&self, p: GeoIntPoint) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }

    /// Same latitude span, longitude widened to the whole valid range.
    pub fn with_full_longitude(self) -> Self {
        Self {
            min: GeoIntPoint::new(GEO_INT_LON_MIN, self.min.y),
            max: GeoIntPoint::new(GEO_INT_LON_MAX, self.max.y),
        }
    }

    pub fn spans_full_longitude(&self) -> bool {
        self.min.x <= GEO_INT_LON_MIN && self.max.x >= GEO_INT_LON_MAX
    }
}
