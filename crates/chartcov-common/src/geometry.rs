//! Coverage and feature geometry as handed back by a chart catalog.
//!
//! Shapes are a closed set of kinds, so they are a tagged union rather than a
//! trait object hierarchy. Areal kinds carry a [`RingSet`]: either the shape
//! decomposes into component rings (ring 0 is the exterior ring), or it only
//! exposes one point collection whose first part is the exterior ring.

use core::fmt;

use smallvec::SmallVec;

use crate::geo::{GeoIntPoint, GeoIntPoint3D};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Null,
    Point,
    Multipoint,
    Curve,
    CompositeCurve,
    Surface,
    MultiCurve,
    MultiCompositeCurve,
    MultiSurface,
    Envelope,
    Arc,
}

impl GeometryKind {
    /// Kinds whose outline is a closed area.
    pub fn is_areal(self) -> bool {
        matches!(self, Self::Surface | Self::MultiSurface)
    }

    /// Kinds a dataset coverage may take. Each extracted figure is a ring.
    pub fn is_coverage_area(self) -> bool {
        matches!(
            self,
            Self::Surface | Self::MultiCurve | Self::MultiCompositeCurve | Self::MultiSurface
        )
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Point => "point",
            Self::Multipoint => "multipoint",
            Self::Curve => "curve",
            Self::CompositeCurve => "composite-curve",
            Self::Surface => "surface",
            Self::MultiCurve => "multi-curve",
            Self::MultiCompositeCurve => "multi-composite-curve",
            Self::MultiSurface => "multi-surface",
            Self::Envelope => "envelope",
            Self::Arc => "arc",
        })
    }
}

/// Ordered points grouped into parts. Most collections hold one part.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointCollection {
    parts: SmallVec<[Vec<GeoIntPoint>; 1]>,
}

impl PointCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<GeoIntPoint>) -> Self {
        let mut parts = SmallVec::new();
        parts.push(points);
        Self { parts }
    }

    pub fn from_parts<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Vec<GeoIntPoint>>,
    {
        Self {
            parts: parts.into_iter().collect(),
        }
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn part(&self, idx: usize) -> Option<&[GeoIntPoint]> {
        self.parts.get(idx).map(Vec::as_slice)
    }

    /// Total number of points across all parts.
    pub fn point_count(&self) -> usize {
        self.parts.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// All points of all parts, in part order.
    pub fn points(&self) -> impl Iterator<Item = GeoIntPoint> + '_ {
        self.parts.iter().flat_map(|p| p.iter().copied())
    }
}

impl From<Vec<GeoIntPoint>> for PointCollection {
    fn from(points: Vec<GeoIntPoint>) -> Self {
        Self::from_points(points)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingSet {
    /// Component rings; the first one is the exterior ring.
    Rings(Vec<PointCollection>),
    /// No ring decomposition; the first part is the exterior ring.
    Flat(PointCollection),
}

impl RingSet {
    /// Exterior ring followed by zero or more holes.
    pub fn with_holes(exterior: Vec<GeoIntPoint>, holes: Vec<Vec<GeoIntPoint>>) -> Self {
        let mut rings = Vec::with_capacity(holes.len() + 1);
        rings.push(PointCollection::from_points(exterior));
        rings.extend(holes.into_iter().map(PointCollection::from_points));
        Self::Rings(rings)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Geometry {
    Point(GeoIntPoint),
    Multipoint(Vec<GeoIntPoint3D>),
    Curve(PointCollection),
    CompositeCurve(PointCollection),
    Surface(RingSet),
    MultiCurve(RingSet),
    MultiCompositeCurve(RingSet),
    MultiSurface(Vec<Geometry>),
    /// A kind the outline extractor does not handle.
    Unsupported(GeometryKind),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Multipoint(_) => GeometryKind::Multipoint,
            Geometry::Curve(_) => GeometryKind::Curve,
            Geometry::CompositeCurve(_) => GeometryKind::CompositeCurve,
            Geometry::Surface(_) => GeometryKind::Surface,
            Geometry::MultiCurve(_) => GeometryKind::MultiCurve,
            Geometry::MultiCompositeCurve(_) => GeometryKind::MultiCompositeCurve,
            Geometry::MultiSurface(_) => GeometryKind::MultiSurface,
            Geometry::Unsupported(kind) => *kind,
        }
    }

    /// Simple polygon without holes.
    pub fn polygon(ring: Vec<GeoIntPoint>) -> Self {
        Geometry::Surface(RingSet::Rings(vec![PointCollection::from_points(ring)]))
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(p) => write!(f, "point {p}"),
            Geometry::Multipoint(points) => write!(f, "multipoint[{}]", points.len()),
            Geometry::Curve(pc) | Geometry::CompositeCurve(pc) => {
                write!(f, "{}[{}]", self.kind(), pc.point_count())
            }
            Geometry::Surface(_) | Geometry::MultiCurve(_) | Geometry::MultiCompositeCurve(_) => {
                write!(f, "{}", self.kind())
            }
            Geometry::MultiSurface(members) => write!(f, "multi-surface[{}]", members.len()),
            Geometry::Unsupported(kind) => write!(f, "unsupported {kind}"),
        }
    }
}
