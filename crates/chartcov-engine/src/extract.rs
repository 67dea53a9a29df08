//! Flattening of catalog geometry into plain point sequences.
//!
//! Extraction works in geographic fixed-point coordinates only; projecting
//! the result is left to the caller.

use chartcov_common::{GeoIntPoint, Geometry, RingSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedOutline {
    Single(Vec<GeoIntPoint>),
    /// One exterior ring per multi-surface member.
    Figures(Vec<Vec<GeoIntPoint>>),
}

impl ExtractedOutline {
    pub fn figures(&self) -> impl Iterator<Item = &[GeoIntPoint]> + '_ {
        let figures: &[Vec<GeoIntPoint>] = match self {
            ExtractedOutline::Single(points) => std::slice::from_ref(points),
            ExtractedOutline::Figures(figures) => figures,
        };
        figures.iter().map(Vec::as_slice)
    }

    pub fn figure_count(&self) -> usize {
        match self {
            ExtractedOutline::Single(_) => 1,
            ExtractedOutline::Figures(figures) => figures.len(),
        }
    }

    pub fn point_count(&self) -> usize {
        self.figures().map(<[_]>::len).sum()
    }

    pub fn into_figures(self) -> Vec<Vec<GeoIntPoint>> {
        match self {
            ExtractedOutline::Single(points) => vec![points],
            ExtractedOutline::Figures(figures) => figures,
        }
    }
}

/// Outline points of `geometry`, or `None` when the shape has no usable points.
///
/// Areal and multi-curve kinds contribute only their exterior ring: holes and
/// further components are ignored.
pub fn extract_outline(geometry: &Geometry) -> Option<ExtractedOutline> {
    match geometry {
        Geometry::Point(p) => Some(ExtractedOutline::Single(vec![*p])),
        Geometry::Multipoint(members) => {
            non_empty(members.iter().map(|&p| GeoIntPoint::from(p)).collect())
        }
        Geometry::Curve(pc) | Geometry::CompositeCurve(pc) => non_empty(pc.points().collect()),
        Geometry::Surface(rings)
        | Geometry::MultiCurve(rings)
        | Geometry::MultiCompositeCurve(rings) => exterior_ring(rings).and_then(non_empty),
        Geometry::MultiSurface(members) => {
            let figures: Vec<Vec<GeoIntPoint>> = members
                .iter()
                .filter_map(extract_outline)
                .flat_map(ExtractedOutline::into_figures)
                .collect();
            if figures.is_empty() {
                None
            } else {
                Some(ExtractedOutline::Figures(figures))
            }
        }
        Geometry::Unsupported(_) => None,
    }
}

fn exterior_ring(rings: &RingSet) -> Option<Vec<GeoIntPoint>> {
    match rings {
        RingSet::Rings(rings) => rings.first().map(|ring| ring.points().collect()),
        RingSet::Flat(pc) => pc.part(0).map(<[_]>::to_vec),
    }
}

fn non_empty(points: Vec<GeoIntPoint>) -> Option<ExtractedOutline> {
    (!points.is_empty()).then_some(ExtractedOutline::Single(points))
}
