use smallvec::SmallVec;

use chartcov_common::{PointF2D, RectF2D};

/// One connected run of projected points.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    points: Vec<PointF2D>,
    closed: bool,
}

impl Figure {
    pub fn points(&self) -> &[PointF2D] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Projected outline in coverage-local units.
///
/// Built once and then only read; there are no mutable accessors, a changed
/// shape gets a new outline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageOutline {
    figures: SmallVec<[Figure; 1]>,
}

impl CoverageOutline {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_figure(&mut self, points: Vec<PointF2D>, closed: bool) {
        if !points.is_empty() {
            self.figures.push(Figure { points, closed });
        }
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn figure_count(&self) -> usize {
        self.figures.len()
    }

    pub fn point_count(&self) -> usize {
        self.figures.iter().map(|f| f.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Tight bounding rectangle of every point, `None` when empty.
    pub fn bounds(&self) -> Option<RectF2D> {
        let mut points = self.figures.iter().flat_map(|f| f.points.iter());
        let first = points.next()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in points {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(RectF2D::new(x0, y0, x1 - x0, y1 - y0))
    }
}

impl FromIterator<(Vec<PointF2D>, bool)> for CoverageOutline {
    fn from_iter<I: IntoIterator<Item = (Vec<PointF2D>, bool)>>(iter: I) -> Self {
        let mut outline = Self::new();
        for (points, closed) in iter {
            outline.push_figure(points, closed);
        }
        outline
    }
}
