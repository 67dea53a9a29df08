use chartcov_common::{CoverageError, DatasetId, GeoIntPoint};

use super::cache::{Pinned, RecencyCache};
use crate::extract::extract_outline;
use crate::outline::CoverageOutline;
use crate::projection::build_local_projection;
use crate::traits::{Projection, Workspace};

pub type CoverageCache = RecencyCache<DatasetId, CoverageEntry>;

/// Cached coverage footprint of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageEntry {
    dataset: DatasetId,
    dataset_name: String,
    outline: CoverageOutline,
    base_scale: f64,
    base_center: GeoIntPoint,
    visible: bool,
}

impl CoverageEntry {
    /// Look up `did` in `workspace` and project its coverage through a local
    /// projection derived from `projection`. The entry starts invisible.
    pub fn build(
        workspace: &dyn Workspace,
        did: DatasetId,
        projection: &dyn Projection,
    ) -> Result<Self, CoverageError> {
        let scoped = |err: CoverageError| err.with_dataset(did);

        let dataset = workspace.dataset(did).map_err(scoped)?;
        let compilation_scale = dataset.compilation_scale().map_err(scoped)?;
        let base_scale = f64::from(compilation_scale / 2);
        if base_scale <= 0.0 {
            return Err(CoverageError::property(format!(
                "compilation scale {compilation_scale} too small"
            ))
            .with_dataset(did));
        }
        let dataset_name = dataset.file_name().map_err(scoped)?;
        let base_center = dataset.bounds().map_err(scoped)?.center();
        let local = build_local_projection(projection, base_center, base_scale).map_err(scoped)?;

        let coverage = dataset.coverage().map_err(scoped)?;
        if !coverage.kind().is_coverage_area() {
            return Err(CoverageError::geometry(format!(
                "{} is not a coverage area",
                coverage.kind()
            ))
            .with_dataset(did));
        }
        let extracted = extract_outline(&coverage).ok_or_else(|| {
            CoverageError::geometry(format!("no outline in {} coverage", coverage.kind()))
                .with_dataset(did)
        })?;
        let mut outline = CoverageOutline::new();
        for figure in extracted.figures() {
            outline.push_figure(local.forward_points(figure).map_err(scoped)?, true);
        }

        Ok(Self {
            dataset: did,
            dataset_name,
            outline,
            base_scale,
            base_center,
            visible: false,
        })
    }

    pub fn dataset(&self) -> DatasetId {
        self.dataset
    }

    /// File name of the dataset; diagnostic only.
    pub fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    pub fn outline(&self) -> &CoverageOutline {
        &self.outline
    }

    pub fn base_scale(&self) -> f64 {
        self.base_scale
    }

    pub fn base_center(&self) -> GeoIntPoint {
        self.base_center
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Pinned for CoverageEntry {
    fn is_pinned(&self) -> bool {
        self.visible
    }
}
