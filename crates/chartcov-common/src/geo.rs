//! Fixed-point geographic coordinates.
//!
//! `GeoIntPoint` stores longitude (`x`) and latitude (`y`) as signed integers
//! in units of 1e-7 degree, which keeps the full longitude range inside an
//! `i32` and matches what chart catalogs hand back for dataset bounds and
//! coverage footprints. Nothing in this module projects; conversion to and
//! from degrees is the only arithmetic performed here.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-point units per degree.
pub const GEO_INT_PER_DEGREE: i32 = 10_000_000;

pub const GEO_INT_LON_MIN: i32 = -180 * GEO_INT_PER_DEGREE;
pub const GEO_INT_LON_MAX: i32 = 180 * GEO_INT_PER_DEGREE;
pub const GEO_INT_LAT_MIN: i32 = -90 * GEO_INT_PER_DEGREE;
pub const GEO_INT_LAT_MAX: i32 = 90 * GEO_INT_PER_DEGREE;

/// Length of the equator in meters (WGS-84 semi-major axis).
pub const EQUATOR_LENGTH_M: f64 = 40_075_016.685_578_49;

/// Errors returned when constructing geographic values from unchecked inputs.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq)]
pub enum GeoError {
    #[error("longitude {0} outside [-180, 180] degrees")]
    LonOutOfRange(i64),
    #[error("latitude {0} outside [-90, 90] degrees")]
    LatOutOfRange(i64),
    #[error("degree value {0} is not finite")]
    NonFinite(f64),
    #[error("degree value {0} overflows the fixed-point range")]
    Overflow(f64),
    #[error("envelope corners are not ordered: min must not exceed max")]
    UnorderedEnvelope,
}

#[inline(always)]
pub fn deg_from_geo_int(value: i32) -> f64 {
    value as f64 / GEO_INT_PER_DEGREE as f64
}

/// Convert degrees to fixed-point units, rounding to the nearest unit.
pub fn geo_int_from_deg(deg: f64) -> Result<i32, GeoError> {
    if !deg.is_finite() {
        return Err(GeoError::NonFinite(deg));
    }
    let scaled = (deg * GEO_INT_PER_DEGREE as f64).round();
    if scaled < i32::MIN as f64 || scaled > i32::MAX as f64 {
        return Err(GeoError::Overflow(deg));
    }
    Ok(scaled as i32)
}

/// Geographic point in fixed-point degrees: `x` is longitude, `y` latitude.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct GeoIntPoint {
    pub x: i32,
    pub y: i32,
}

impl GeoIntPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Fallible constructor that rejects points outside the valid lon/lat range.
    pub fn try_new(x: i32, y: i32) -> Result<Self, GeoError> {
        if !(GEO_INT_LON_MIN..=GEO_INT_LON_MAX).contains(&x) {
            return Err(GeoError::LonOutOfRange(x as i64));
        }
        if !(GEO_INT_LAT_MIN..=GEO_INT_LAT_MAX).contains(&y) {
            return Err(GeoError::LatOutOfRange(y as i64));
        }
        Ok(Self { x, y })
    }

    pub fn from_degrees(lon: f64, lat: f64) -> Result<Self, GeoError> {
        let x = geo_int_from_deg(lon)?;
        let y = geo_int_from_deg(lat)?;
        Self::try_new(x, y)
    }

    #[inline(always)]
    pub fn lon_deg(self) -> f64 {
        deg_from_geo_int(self.x)
    }

    #[inline(always)]
    pub fn lat_deg(self) -> f64 {
        deg_from_geo_int(self.y)
    }

    /// Clamp both axes into the valid lon/lat range.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(GEO_INT_LON_MIN, GEO_INT_LON_MAX),
            y: self.y.clamp(GEO_INT_LAT_MIN, GEO_INT_LAT_MAX),
        }
    }
}

impl fmt::Display for GeoIntPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lat_deg(), self.lon_deg())
    }
}

impl From<(i32, i32)> for GeoIntPoint {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<GeoIntPoint> for (i32, i32) {
    fn from(point: GeoIntPoint) -> Self {
        (point.x, point.y)
    }
}

/// Geographic point with a height component, as stored by multipoint shapes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct GeoIntPoint3D {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GeoIntPoint3D {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl From<GeoIntPoint3D> for GeoIntPoint {
    fn from(point: GeoIntPoint3D) -> Self {
        Self::new(point.x, point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_roundtrip() {
        let p = GeoIntPoint::from_degrees(-70.25, 43.5).unwrap();
        assert_eq!(p, GeoIntPoint::new(-702_500_000, 435_000_000));
        assert_eq!(p.lon_deg(), -70.25);
        assert_eq!(p.lat_deg(), 43.5);
    }

    #[test]
    fn full_range_fits_i32() {
        assert!(GeoIntPoint::try_new(GEO_INT_LON_MAX, GEO_INT_LAT_MIN).is_ok());
        assert_eq!(
            GeoIntPoint::try_new(GEO_INT_LON_MAX + 1, 0),
            Err(GeoError::LonOutOfRange(GEO_INT_LON_MAX as i64 + 1))
        );
        assert_eq!(
            GeoIntPoint::try_new(0, GEO_INT_LAT_MIN - 1),
            Err(GeoError::LatOutOfRange(GEO_INT_LAT_MIN as i64 - 1))
        );
    }

    #[test]
    fn rejects_non_finite_degrees() {
        assert!(matches!(
            GeoIntPoint::from_degrees(f64::NAN, 0.0),
            Err(GeoError::NonFinite(_))
        ));
        assert_eq!(geo_int_from_deg(1.0e12), Err(GeoError::Overflow(1.0e12)));
        assert_eq!(
            GeoIntPoint::from_degrees(0.0, -1.0e12),
            Err(GeoError::Overflow(-1.0e12))
        );
        assert_eq!(
            GeoIntPoint::from_degrees(0.0, 95.0),
            Err(GeoError::LatOutOfRange(950_000_000))
        );
    }

    #[test]
    fn height_is_dropped() {
        let p: GeoIntPoint = GeoIntPoint3D::new(5, 6, 700).into();
        assert_eq!(p, GeoIntPoint::new(5, 6));
    }

    #[test]
    fn display_is_lat_lon() {
        let p = GeoIntPoint::new(10_000_000, -5_000_000);
        assert_eq!(p.to_string(), "(-0.5000000, 1.0000000)");
    }
}
