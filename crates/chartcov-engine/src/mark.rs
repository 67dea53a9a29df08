//! Highlighting of a single chart feature.
//!
//! A mark is built the same way as a coverage entry: the feature's shape is
//! projected once through a projection local to its dataset and drawn later
//! with the current scale compensation.

use chartcov_common::{
    CoverageError, CoverageErrorKind, GeoIntPoint, GeometryKind, ObjectId, PointF2D,
};

use crate::extract::{ExtractedOutline, extract_outline};
use crate::outline::CoverageOutline;
use crate::projection::{ScaleCompensation, build_local_projection, view_scale_factor};
use crate::render::{ColorF, INFO_COLOR};
use crate::traits::{Projection, RenderSurface, WorkspaceCatalog};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStyle {
    pub stroke: ColorF,
    pub fill: ColorF,
    /// Screen stroke width.
    pub width: f64,
    /// Half length of a point cross, in local projected units.
    pub cross_half_size: f64,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            stroke: INFO_COLOR,
            fill: INFO_COLOR.with_alpha(0.5),
            width: 6.0,
            cross_half_size: 10.0,
        }
    }
}

/// Where a host should move the view to show a marked feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkFocus {
    /// Center of the feature's shape envelope.
    pub position: GeoIntPoint,
    /// Current view scale, capped at the dataset's minimum display scale.
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMark {
    object: ObjectId,
    kind: GeometryKind,
    outline: CoverageOutline,
    base_center: GeoIntPoint,
    base_scale: f64,
    focus: MarkFocus,
}

impl FeatureMark {
    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn outline(&self) -> &CoverageOutline {
        &self.outline
    }

    pub fn base_center(&self) -> GeoIntPoint {
        self.base_center
    }

    pub fn base_scale(&self) -> f64 {
        self.base_scale
    }

    pub fn focus(&self) -> MarkFocus {
        self.focus
    }

    pub fn is_filled(&self) -> bool {
        self.kind.is_areal()
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureMarker {
    style: MarkStyle,
    mark: Option<FeatureMark>,
}

impl FeatureMarker {
    pub fn new(style: MarkStyle) -> Self {
        Self { style, mark: None }
    }

    pub fn style(&self) -> &MarkStyle {
        &self.style
    }

    pub fn current(&self) -> Option<&FeatureMark> {
        self.mark.as_ref()
    }

    /// Replace the current mark with one for `object`. On failure no mark
    /// remains.
    pub fn set_mark<C: WorkspaceCatalog + ?Sized>(
        &mut self,
        catalog: &C,
        object: ObjectId,
        projection: &dyn Projection,
    ) -> Result<MarkFocus, CoverageError> {
        self.mark = None;
        let mark = self.build(catalog, object, projection)?;
        let focus = mark.focus;
        self.mark = Some(mark);
        Ok(focus)
    }

    pub fn remove_mark(&mut self) -> Option<FeatureMark> {
        self.mark.take()
    }

    fn build<C: WorkspaceCatalog + ?Sized>(
        &self,
        catalog: &C,
        object: ObjectId,
        projection: &dyn Projection,
    ) -> Result<FeatureMark, CoverageError> {
        let workspace = catalog
            .workspace_by_id(object.did.workspace())
            .ok_or_else(|| {
                CoverageError::new(CoverageErrorKind::WorkspaceNotFound)
                    .with_message(format!("no workspace with id {}", object.did.workspace()))
            })?;
        let feature = workspace.feature(object)?;
        let dataset = workspace.dataset(feature.dataset())?;

        let base_scale = f64::from(dataset.compilation_scale()?) / 2.0;
        let min_display_scale = dataset.min_display_scale()?;
        let base_center = dataset.bounds()?.center();
        let local = build_local_projection(projection, base_center, base_scale)?;

        let shape = feature.shape()?;
        let position = feature.shape_envelope()?.center();
        let extracted = extract_outline(&shape).ok_or_else(|| {
            CoverageError::geometry(format!("feature {object} has no usable {} shape", shape.kind()))
        })?;
        let outline = self.mark_outline(shape.kind(), &extracted, local.as_ref())?;

        let view_scale = view_scale_factor(projection);
        let scale = if min_display_scale > 0.0 {
            view_scale.min(min_display_scale)
        } else {
            view_scale
        };

        Ok(FeatureMark {
            object,
            kind: shape.kind(),
            outline,
            base_center,
            base_scale,
            focus: MarkFocus { position, scale },
        })
    }

    fn mark_outline(
        &self,
        kind: GeometryKind,
        extracted: &ExtractedOutline,
        local: &dyn Projection,
    ) -> Result<CoverageOutline, CoverageError> {
        let mut outline = CoverageOutline::new();
        match kind {
            GeometryKind::Point | GeometryKind::Multipoint => {
                let h = self.style.cross_half_size;
                for figure in extracted.figures() {
                    for p in local.forward_points(figure)? {
                        for [a, b] in cross_strokes(p, h) {
                            outline.push_figure(vec![a, b], false);
                        }
                    }
                }
            }
            _ => {
                let closed = kind.is_areal();
                for figure in extracted.figures() {
                    outline.push_figure(local.forward_points(figure)?, closed);
                }
            }
        }
        Ok(outline)
    }

    /// Clear `surface` and draw the current mark, if any. Returns whether a
    /// mark was drawn.
    pub fn render<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        projection: &dyn Projection,
    ) -> Result<bool, CoverageError> {
        surface.reset_transform();
        surface.fill_background(ColorF::TRANSPARENT)?;
        let Some(mark) = &self.mark else {
            return Ok(false);
        };

        let comp = ScaleCompensation::new(
            projection,
            mark.base_center,
            mark.base_scale,
            view_scale_factor(projection),
        )?;
        surface.push_transform(comp.transform());
        let width = comp.stroke_width(self.style.width);
        for figure in mark.outline.figures() {
            if mark.is_filled() {
                surface.fill_outline(figure.points(), self.style.fill)?;
            }
            surface.draw_outline(figure.points(), figure.is_closed(), self.style.stroke, width)?;
        }
        surface.reset_transform();
        Ok(true)
    }
}

/// Horizontal then vertical stroke of a cross centered on `p`.
fn cross_strokes(p: PointF2D, half_size: f64) -> [[PointF2D; 2]; 2] {
    [
        [p.offset(-half_size, 0.0), p.offset(half_size, 0.0)],
        [p.offset(0.0, half_size), p.offset(0.0, -half_size)],
    ]
}
