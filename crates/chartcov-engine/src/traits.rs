//! chartcov-engine – collaborator traits (object-safe)
//!
//! The engine never does projection math, spatial indexing or drawing on its
//! own. Hosts plug those in through the traits below; `test_catalog` provides
//! in-memory implementations.

use std::fmt::Debug;
use std::sync::Arc;

use chartcov_common::{
    Affine2D, CoverageError, DatasetId, GeoEnvelope, GeoIntPoint, Geometry, ObjectId, PointF2D,
};

use crate::render::ColorF;

/* ─────────────────────────── Projection ─────────────────────────── */

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParameters {
    /// Degrees.
    pub latitude_of_center: f64,
    /// Degrees.
    pub latitude_of_origin: f64,
    /// Degrees.
    pub longitude_of_origin: f64,
    /// Map scale denominator.
    pub scale_factor: f64,
    /// Meters per projected unit at scale 1.
    pub coordinate_unit: f64,
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self {
            latitude_of_center: 0.0,
            latitude_of_origin: 0.0,
            longitude_of_origin: 0.0,
            scale_factor: 1.0,
            coordinate_unit: 1.0,
        }
    }
}

pub trait Projection: Debug {
    fn forward(&self, point: GeoIntPoint) -> Result<PointF2D, CoverageError>;
    fn inverse(&self, point: PointF2D) -> Result<GeoIntPoint, CoverageError>;

    fn forward_points(&self, points: &[GeoIntPoint]) -> Result<Vec<PointF2D>, CoverageError> {
        points.iter().map(|p| self.forward(*p)).collect()
    }

    fn parameters(&self) -> ProjectionParameters;
    fn set_parameters(&mut self, params: &ProjectionParameters) -> Result<(), CoverageError>;

    /// Independent copy whose parameters can be changed without affecting `self`.
    fn clone_projection(&self) -> Result<Box<dyn Projection>, CoverageError>;
}

/* ─────────────────────────── Catalog ─────────────────────────── */

pub trait WorkspaceCatalog {
    fn workspace(&self, name: &str) -> Option<Arc<dyn Workspace>>;
    fn workspace_by_id(&self, id: u16) -> Option<Arc<dyn Workspace>>;
}

impl<T: WorkspaceCatalog + ?Sized> WorkspaceCatalog for Arc<T> {
    fn workspace(&self, name: &str) -> Option<Arc<dyn Workspace>> {
        (**self).workspace(name)
    }
    fn workspace_by_id(&self, id: u16) -> Option<Arc<dyn Workspace>> {
        (**self).workspace_by_id(id)
    }
}

pub trait Workspace: Debug {
    fn id(&self) -> u16;
    fn name(&self) -> &str;

    /// Datasets whose coverage intersects `envelope`. Ids are produced lazily;
    /// an `Err` means the query itself could not be issued.
    fn dataset_ids<'a>(
        &'a self,
        envelope: &GeoEnvelope,
    ) -> Result<Box<dyn Iterator<Item = DatasetId> + 'a>, CoverageError>;

    fn dataset(&self, id: DatasetId) -> Result<Arc<dyn Dataset>, CoverageError>;
    fn feature(&self, id: ObjectId) -> Result<Arc<dyn Feature>, CoverageError>;
}

pub trait Dataset: Debug {
    fn id(&self) -> DatasetId;
    fn file_name(&self) -> Result<String, CoverageError>;
    fn compilation_scale(&self) -> Result<u32, CoverageError>;
    fn min_display_scale(&self) -> Result<f64, CoverageError>;
    fn bounds(&self) -> Result<GeoEnvelope, CoverageError>;
    fn coverage(&self) -> Result<Geometry, CoverageError>;
}

pub trait Feature: Debug {
    fn id(&self) -> ObjectId;

    fn dataset(&self) -> DatasetId {
        self.id().did
    }

    fn shape(&self) -> Result<Geometry, CoverageError>;
    fn shape_envelope(&self) -> Result<GeoEnvelope, CoverageError>;
}

/* ─────────────────────────── Drawing ─────────────────────────── */

/// Immediate-mode 2D surface. Transforms pushed after a reset compose in
/// push order and apply to every subsequent draw call.
pub trait RenderSurface {
    fn fill_background(&mut self, color: ColorF) -> Result<(), CoverageError>;
    fn reset_transform(&mut self);
    fn push_transform(&mut self, transform: Affine2D);
    fn draw_outline(
        &mut self,
        figure: &[PointF2D],
        closed: bool,
        color: ColorF,
        width: f64,
    ) -> Result<(), CoverageError>;
    fn fill_outline(&mut self, figure: &[PointF2D], color: ColorF) -> Result<(), CoverageError>;
}
