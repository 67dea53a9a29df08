//! Meta crate that re-exports the chartcov building blocks. Depend on this
//! crate and pick layers through feature flags; the underlying crates stay
//! reachable for deeper integration.
//!
//! ```rust
//! # use std::sync::Arc;
//! use chartcov::test_catalog::{MemoryCatalog, MemoryDataset, MemoryWorkspace, PlanarProjection, envelope_deg};
//! use chartcov::{CoverageConfig, CoverageLayer, DatasetId, RectF2D};
//!
//! let ws = MemoryWorkspace::new(1, "charts").with_dataset(MemoryDataset::rect(
//!     DatasetId::new(1, 1),
//!     "US5MA10M.000",
//!     40_000,
//!     envelope_deg(-71.0, 42.0, -70.5, 42.5),
//! ));
//! let mut layer = CoverageLayer::new(
//!     Arc::new(MemoryCatalog::new().with_workspace(ws)),
//!     CoverageConfig::default(),
//! );
//! layer.set_workspace_name("charts");
//! layer.set_viewport_bounds(RectF2D::centered(800.0, 600.0));
//!
//! let stats = layer.refresh(&PlanarProjection::centered(-70.75, 42.25, 200.0))?;
//! assert_eq!(stats.built, 1);
//! # Ok::<(), chartcov::CoverageError>(())
//! ```

#[cfg(feature = "common")]
pub use chartcov_common as common;

#[cfg(feature = "engine")]
pub use chartcov_engine as engine;

#[cfg(feature = "common")]
pub use chartcov_common::{
    CoverageError, CoverageErrorKind, DatasetId, GeoEnvelope, GeoIntPoint, Geometry,
    GeometryKind, ObjectId, PointF2D, RectF2D,
};

#[cfg(feature = "engine")]
pub use chartcov_engine::{
    ColorF, CoverageConfig, CoverageLayer, CoverageOutline, FeatureMark, FeatureMarker,
    MarkFocus, MarkStyle, OutlineStyle, Projection, RefreshState, RefreshStats, RenderStats,
    RenderSurface, WorkspaceCatalog, extract_outline, render_coverages, test_catalog,
};

/// Install a `tracing` subscriber filtered by `RUST_LOG`. Repeated calls are
/// no-ops.
#[cfg(feature = "tracing")]
pub fn init_logging() {
    chartcov_engine::telemetry::init();
}
