//! Local scale-compensation.
//!
//! Each cached outline is projected once through its own projection, centered
//! on the dataset and fixed at the dataset's base scale. Drawing it at any
//! other zoom is then a uniform scale by `base_scale / view_scale` followed by
//! a translation to where the current projection puts the dataset center.
//! The cached coordinates stay small and well conditioned at every zoom.

use chartcov_common::{Affine2D, CoverageError, GeoIntPoint, PointF2D};

use crate::traits::Projection;

/// Clone `source` and recenter it on `base_center` at `base_scale`.
pub fn build_local_projection(
    source: &dyn Projection,
    base_center: GeoIntPoint,
    base_scale: f64,
) -> Result<Box<dyn Projection>, CoverageError> {
    let mut local = source.clone_projection()?;
    let mut params = local.parameters();
    params.latitude_of_center = 0.0;
    params.latitude_of_origin = base_center.lat_deg();
    params.longitude_of_origin = base_center.lon_deg();
    params.scale_factor = base_scale;
    local.set_parameters(&params)?;
    Ok(local)
}

#[inline]
pub fn view_scale_factor(projection: &dyn Projection) -> f64 {
    projection.parameters().scale_factor
}

/// Draw-time mapping from coverage-local units to current view units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleCompensation {
    ratio: f64,
    translation: PointF2D,
}

impl ScaleCompensation {
    pub fn new(
        current: &dyn Projection,
        base_center: GeoIntPoint,
        base_scale: f64,
        view_scale: f64,
    ) -> Result<Self, CoverageError> {
        if !(view_scale.is_finite() && view_scale > 0.0) {
            return Err(CoverageError::projection(format!(
                "invalid view scale {view_scale}"
            )));
        }
        let ratio = base_scale / view_scale;
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(CoverageError::projection(format!(
                "invalid scale ratio {base_scale}/{view_scale}"
            )));
        }
        let translation = current.forward(base_center)?;
        if !translation.is_finite() {
            return Err(CoverageError::projection(format!(
                "center {base_center} projects to {translation}"
            )));
        }
        Ok(Self { ratio, translation })
    }

    /// `base_scale / view_scale`.
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    #[inline]
    pub fn translation(&self) -> PointF2D {
        self.translation
    }

    /// Scale by the ratio, then translate to the projected center.
    pub fn transform(&self) -> Affine2D {
        Affine2D::scale(self.ratio, self.ratio).then(Affine2D::translate(
            self.translation.x,
            self.translation.y,
        ))
    }

    /// Local stroke width that renders as `nominal` on screen.
    #[inline]
    pub fn stroke_width(&self, nominal: f64) -> f64 {
        nominal / self.ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_catalog::PlanarProjection;
    use chartcov_common::{CoverageErrorKind, GEO_INT_PER_DEGREE};

    #[test]
    fn local_projection_recenters_and_rescales() {
        let view = PlanarProjection::new(250_000.0);
        let center = GeoIntPoint::new(12 * GEO_INT_PER_DEGREE, -35 * GEO_INT_PER_DEGREE);
        let local = build_local_projection(&view, center, 25_000.0).unwrap();

        let p = local.parameters();
        assert_eq!(p.latitude_of_center, 0.0);
        assert_eq!(p.latitude_of_origin, -35.0);
        assert_eq!(p.longitude_of_origin, 12.0);
        assert_eq!(p.scale_factor, 25_000.0);
        assert_eq!(local.forward(center).unwrap(), PointF2D::new(0.0, 0.0));

        // Source left untouched.
        assert_eq!(view_scale_factor(&view), 250_000.0);
    }

    #[test]
    fn clone_rejection_propagates() {
        let view = PlanarProjection::new(1000.0).with_clone_failure();
        let err = build_local_projection(&view, GeoIntPoint::new(0, 0), 10.0).unwrap_err();
        assert_eq!(err.kind, CoverageErrorKind::Projection);
    }

    #[test]
    fn compensation_scales_then_translates() {
        let view = PlanarProjection::new(100_000.0);
        let center = GeoIntPoint::new(GEO_INT_PER_DEGREE, 0);
        let comp = ScaleCompensation::new(&view, center, 25_000.0, 100_000.0).unwrap();
        assert_eq!(comp.ratio(), 0.25);
        assert_eq!(comp.stroke_width(1.0), 4.0);

        let t = comp.translation();
        let mapped = comp.transform().apply(PointF2D::new(8.0, -4.0));
        assert_eq!(mapped, PointF2D::new(t.x + 2.0, t.y - 1.0));
    }

    #[test]
    fn rejects_degenerate_scales() {
        let view = PlanarProjection::new(1.0);
        let c = GeoIntPoint::new(0, 0);
        for (base, view_scale) in [(10.0, 0.0), (10.0, -3.0), (10.0, f64::NAN), (0.0, 5.0)] {
            let err = ScaleCompensation::new(&view, c, base, view_scale).unwrap_err();
            assert_eq!(err.kind, CoverageErrorKind::Projection);
        }
    }
}
