//! crates/chartcov-engine/src/test_catalog.rs
//! ------------------------------------------
//! In-memory catalog, planar projection and recording surface for unit,
//! scenario and property tests.
//!
//! Everything here is deterministic: spatial queries return datasets in
//! ascending order of their southern bound, then insertion order.
use std::cell::Cell;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use chartcov_common::{
    Affine2D, CoverageError, DatasetId, EQUATOR_LENGTH_M, GEO_INT_PER_DEGREE,
    GeoEnvelope, GeoIntPoint, Geometry, ObjectId, PointF2D,
};

use crate::extract::extract_outline;
use crate::render::ColorF;
use crate::span_index::SpanIndex;
use crate::traits::{
    Dataset, Feature, Projection, ProjectionParameters, RenderSurface, Workspace,
    WorkspaceCatalog,
};

/// Meters along the equator per degree of longitude.
pub const METERS_PER_DEGREE: f64 = EQUATOR_LENGTH_M / 360.0;

fn geo_int(deg: f64) -> i32 {
    (deg * GEO_INT_PER_DEGREE as f64).round() as i32
}

/// Envelope from two corners given in degrees, in any order.
pub fn envelope_deg(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> GeoEnvelope {
    let (x0, x1) = (geo_int(lon0), geo_int(lon1));
    let (y0, y1) = (geo_int(lat0), geo_int(lat1));
    GeoEnvelope {
        min: GeoIntPoint::new(x0.min(x1), y0.min(y1)).clamped(),
        max: GeoIntPoint::new(x0.max(x1), y0.max(y1)).clamped(),
    }
}

/// Point from degrees, clamped into the valid range.
pub fn point_deg(lon: f64, lat: f64) -> GeoIntPoint {
    GeoIntPoint::new(geo_int(lon), geo_int(lat)).clamped()
}

/// Closed rectangle ring (first point repeated) around `env`.
pub fn envelope_ring(env: &GeoEnvelope) -> Vec<GeoIntPoint> {
    vec![
        env.min,
        GeoIntPoint::new(env.max.x, env.min.y),
        env.max,
        GeoIntPoint::new(env.min.x, env.max.y),
        env.min,
    ]
}

/* ─────────────── projection ─────────────── */

/// Equirectangular projection: one degree maps to
/// `METERS_PER_DEGREE / (coordinate_unit * scale_factor)` projected units on
/// both axes, measured from the longitude and latitude of origin.
#[derive(Debug, Clone)]
pub struct PlanarProjection {
    params: ProjectionParameters,
    fail_clone: bool,
    reject_parameters: bool,
    fail_inverse: bool,
}

impl PlanarProjection {
    pub fn new(scale_factor: f64) -> Self {
        Self {
            params: ProjectionParameters {
                scale_factor,
                ..ProjectionParameters::default()
            },
            fail_clone: false,
            reject_parameters: false,
            fail_inverse: false,
        }
    }

    pub fn centered(lon: f64, lat: f64, scale_factor: f64) -> Self {
        let mut proj = Self::new(scale_factor);
        proj.params.longitude_of_origin = lon;
        proj.params.latitude_of_origin = lat;
        proj
    }

    pub fn with_coordinate_unit(mut self, meters: f64) -> Self {
        self.params.coordinate_unit = meters;
        self
    }

    pub fn with_clone_failure(mut self) -> Self {
        self.fail_clone = true;
        self
    }

    /// Clones inherit this, so local projections cannot be configured.
    pub fn with_parameter_rejection(mut self) -> Self {
        self.reject_parameters = true;
        self
    }

    pub fn with_inverse_failure(mut self) -> Self {
        self.fail_inverse = true;
        self
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.params.scale_factor = scale_factor;
    }

    pub fn units_per_degree(&self) -> f64 {
        METERS_PER_DEGREE / (self.params.coordinate_unit * self.params.scale_factor)
    }
}

impl Projection for PlanarProjection {
    fn forward(&self, point: GeoIntPoint) -> Result<PointF2D, CoverageError> {
        let k = self.units_per_degree();
        let projected = PointF2D::new(
            (point.lon_deg() - self.params.longitude_of_origin) * k,
            (point.lat_deg() - self.params.latitude_of_origin) * k,
        );
        if !projected.is_finite() {
            return Err(CoverageError::projection(format!("{point} has no image")));
        }
        Ok(projected)
    }

    fn inverse(&self, point: PointF2D) -> Result<GeoIntPoint, CoverageError> {
        if self.fail_inverse {
            return Err(CoverageError::projection("inverse transform unavailable"));
        }
        let k = self.units_per_degree();
        let lon = point.x / k + self.params.longitude_of_origin;
        let lat = point.y / k + self.params.latitude_of_origin;
        if !(lon.is_finite() && lat.is_finite()) {
            return Err(CoverageError::projection(format!("{point} has no preimage")));
        }
        Ok(point_deg(lon, lat))
    }

    fn parameters(&self) -> ProjectionParameters {
        self.params
    }

    fn set_parameters(&mut self, params: &ProjectionParameters) -> Result<(), CoverageError> {
        if self.reject_parameters {
            return Err(CoverageError::projection("parameters rejected"));
        }
        if !(params.scale_factor.is_finite() && params.scale_factor > 0.0) {
            return Err(CoverageError::projection(format!(
                "scale factor {} out of range",
                params.scale_factor
            )));
        }
        self.params = *params;
        Ok(())
    }

    fn clone_projection(&self) -> Result<Box<dyn Projection>, CoverageError> {
        if self.fail_clone {
            return Err(CoverageError::projection("projection cannot be cloned"));
        }
        Ok(Box::new(self.clone()))
    }
}

/* ─────────────── datasets & features ─────────────── */

#[derive(Debug, Clone)]
pub struct MemoryDataset {
    id: DatasetId,
    file_name: String,
    compilation_scale: Option<u32>,
    min_display_scale: f64,
    bounds: GeoEnvelope,
    coverage: Option<Geometry>,
}

impl MemoryDataset {
    /// Dataset whose coverage is exactly its bounding rectangle.
    pub fn rect(id: DatasetId, file_name: &str, compilation_scale: u32, bounds: GeoEnvelope) -> Self {
        Self {
            id,
            file_name: file_name.to_string(),
            compilation_scale: Some(compilation_scale),
            min_display_scale: 0.0,
            bounds,
            coverage: Some(Geometry::polygon(envelope_ring(&bounds))),
        }
    }

    pub fn with_coverage(mut self, coverage: Geometry) -> Self {
        self.coverage = Some(coverage);
        self
    }

    pub fn with_min_display_scale(mut self, scale: f64) -> Self {
        self.min_display_scale = scale;
        self
    }

    /// Compilation scale lookups fail.
    pub fn without_compilation_scale(mut self) -> Self {
        self.compilation_scale = None;
        self
    }

    /// Coverage lookups fail.
    pub fn without_coverage(mut self) -> Self {
        self.coverage = None;
        self
    }
}

impl Dataset for MemoryDataset {
    fn id(&self) -> DatasetId {
        self.id
    }

    fn file_name(&self) -> Result<String, CoverageError> {
        Ok(self.file_name.clone())
    }

    fn compilation_scale(&self) -> Result<u32, CoverageError> {
        self.compilation_scale
            .ok_or_else(|| CoverageError::property("compilation scale missing"))
    }

    fn min_display_scale(&self) -> Result<f64, CoverageError> {
        Ok(self.min_display_scale)
    }

    fn bounds(&self) -> Result<GeoEnvelope, CoverageError> {
        Ok(self.bounds)
    }

    fn coverage(&self) -> Result<Geometry, CoverageError> {
        self.coverage
            .clone()
            .ok_or_else(|| CoverageError::property("coverage geometry missing"))
    }
}

#[derive(Debug, Clone)]
pub struct MemoryFeature {
    id: ObjectId,
    shape: Geometry,
}

impl MemoryFeature {
    pub fn new(id: ObjectId, shape: Geometry) -> Self {
        Self { id, shape }
    }
}

impl Feature for MemoryFeature {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn shape(&self) -> Result<Geometry, CoverageError> {
        Ok(self.shape.clone())
    }

    fn shape_envelope(&self) -> Result<GeoEnvelope, CoverageError> {
        extract_outline(&self.shape)
            .and_then(|outline| GeoEnvelope::from_points(outline.figures().flatten().copied()))
            .ok_or_else(|| CoverageError::geometry(format!("{} has no envelope", self.shape)))
    }
}

/* ─────────────── workspace ─────────────── */

#[derive(Debug)]
pub struct MemoryWorkspace {
    id: u16,
    name: String,
    datasets: FxHashMap<DatasetId, Arc<MemoryDataset>>,
    features: FxHashMap<ObjectId, Arc<MemoryFeature>>,
    lat_index: SpanIndex<DatasetId>,
    fail_queries: Cell<bool>,
    queries: Cell<usize>,
    dataset_lookups: Cell<usize>,
}

impl MemoryWorkspace {
    pub fn new<S: Into<String>>(id: u16, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            datasets: FxHashMap::default(),
            features: FxHashMap::default(),
            lat_index: SpanIndex::new(),
            fail_queries: Cell::new(false),
            queries: Cell::new(0),
            dataset_lookups: Cell::new(0),
        }
    }

    /// Id for the `index`-th dataset of this workspace.
    pub fn dataset_id(&self, index: u64) -> DatasetId {
        DatasetId::new(self.id, index)
    }

    pub fn with_dataset(mut self, dataset: MemoryDataset) -> Self {
        let (id, bounds) = (dataset.id, dataset.bounds);
        if let Some(old) = self.datasets.insert(id, Arc::new(dataset)) {
            self.lat_index.remove(old.bounds.min.y, old.bounds.max.y, &id);
        }
        self.lat_index.insert(bounds.min.y, bounds.max.y, id);
        self
    }

    pub fn with_feature(mut self, feature: MemoryFeature) -> Self {
        self.features.insert(feature.id, Arc::new(feature));
        self
    }

    /// Make subsequent spatial queries fail.
    pub fn set_query_failure(&self, fail: bool) {
        self.fail_queries.set(fail);
    }

    /// Spatial queries issued so far.
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    /// Successful and failed `dataset()` lookups so far.
    pub fn dataset_lookup_count(&self) -> usize {
        self.dataset_lookups.get()
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }
}

impl Workspace for MemoryWorkspace {
    fn id(&self) -> u16 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dataset_ids<'a>(
        &'a self,
        envelope: &GeoEnvelope,
    ) -> Result<Box<dyn Iterator<Item = DatasetId> + 'a>, CoverageError> {
        self.queries.set(self.queries.get() + 1);
        if self.fail_queries.get() {
            return Err(CoverageError::catalog(format!(
                "spatial query on '{}' failed",
                self.name
            )));
        }
        let envelope = *envelope;
        Ok(Box::new(
            self.lat_index
                .query(envelope.min.y, envelope.max.y)
                .filter(move |did| {
                    self.datasets
                        .get(*did)
                        .is_some_and(|ds| ds.bounds.intersects(&envelope))
                })
                .copied(),
        ))
    }

    fn dataset(&self, id: DatasetId) -> Result<Arc<dyn Dataset>, CoverageError> {
        self.dataset_lookups.set(self.dataset_lookups.get() + 1);
        self.datasets
            .get(&id)
            .map(|ds| Arc::clone(ds) as Arc<dyn Dataset>)
            .ok_or_else(|| CoverageError::catalog(format!("no dataset {id}")))
    }

    fn feature(&self, id: ObjectId) -> Result<Arc<dyn Feature>, CoverageError> {
        self.features
            .get(&id)
            .map(|f| Arc::clone(f) as Arc<dyn Feature>)
            .ok_or_else(|| CoverageError::catalog(format!("no feature {id}")))
    }
}

/* ─────────────── catalog ─────────────── */

#[derive(Debug, Default)]
pub struct MemoryCatalog {
    workspaces: Vec<Arc<MemoryWorkspace>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace(mut self, workspace: MemoryWorkspace) -> Self {
        self.workspaces.retain(|ws| ws.id != workspace.id && ws.name != workspace.name);
        self.workspaces.push(Arc::new(workspace));
        self
    }

    /// Concrete handle for toggling failures and reading counters.
    pub fn memory_workspace(&self, name: &str) -> Option<&Arc<MemoryWorkspace>> {
        self.workspaces.iter().find(|ws| ws.name == name)
    }
}

impl WorkspaceCatalog for MemoryCatalog {
    fn workspace(&self, name: &str) -> Option<Arc<dyn Workspace>> {
        self.memory_workspace(name)
            .map(|ws| Arc::clone(ws) as Arc<dyn Workspace>)
    }

    fn workspace_by_id(&self, id: u16) -> Option<Arc<dyn Workspace>> {
        self.workspaces
            .iter()
            .find(|ws| ws.id == id)
            .map(|ws| Arc::clone(ws) as Arc<dyn Workspace>)
    }
}

/* ─────────────── surface ─────────────── */

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Background(ColorF),
    ResetTransform,
    PushTransform(Affine2D),
    Draw {
        points: Vec<PointF2D>,
        closed: bool,
        color: ColorF,
        width: f64,
    },
    Fill {
        points: Vec<PointF2D>,
        color: ColorF,
    },
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
    fail_draws: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draw_failure(mut self) -> Self {
        self.fail_draws = true;
        self
    }

    pub fn draws(&self) -> impl Iterator<Item = &SurfaceOp> + '_ {
        self.ops.iter().filter(|op| matches!(op, SurfaceOp::Draw { .. }))
    }

    pub fn fills(&self) -> impl Iterator<Item = &SurfaceOp> + '_ {
        self.ops.iter().filter(|op| matches!(op, SurfaceOp::Fill { .. }))
    }

    pub fn transforms(&self) -> impl Iterator<Item = &Affine2D> + '_ {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::PushTransform(m) => Some(m),
            _ => None,
        })
    }
}

impl RenderSurface for RecordingSurface {
    fn fill_background(&mut self, color: ColorF) -> Result<(), CoverageError> {
        self.ops.push(SurfaceOp::Background(color));
        Ok(())
    }

    fn reset_transform(&mut self) {
        self.ops.push(SurfaceOp::ResetTransform);
    }

    fn push_transform(&mut self, transform: Affine2D) {
        self.ops.push(SurfaceOp::PushTransform(transform));
    }

    fn draw_outline(
        &mut self,
        figure: &[PointF2D],
        closed: bool,
        color: ColorF,
        width: f64,
    ) -> Result<(), CoverageError> {
        if self.fail_draws {
            return Err(CoverageError::render("draw rejected"));
        }
        self.ops.push(SurfaceOp::Draw {
            points: figure.to_vec(),
            closed,
            color,
            width,
        });
        Ok(())
    }

    fn fill_outline(&mut self, figure: &[PointF2D], color: ColorF) -> Result<(), CoverageError> {
        if self.fail_draws {
            return Err(CoverageError::render("fill rejected"));
        }
        self.ops.push(SurfaceOp::Fill {
            points: figure.to_vec(),
            color,
        });
        Ok(())
    }
}
