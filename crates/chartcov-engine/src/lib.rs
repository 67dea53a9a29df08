pub mod extract;
pub mod mark;
pub mod outline;
pub mod projection;
pub mod render;
pub mod span_index;
pub mod telemetry;
pub mod traits;

pub mod engine;
pub mod test_catalog;

pub use engine::{
    CoverageConfig, CoverageLayer, DEFAULT_COVERAGE_CAPACITY, RefreshState, RefreshStats,
};
pub use extract::{ExtractedOutline, extract_outline};
pub use mark::{FeatureMark, FeatureMarker, MarkFocus, MarkStyle};
pub use outline::CoverageOutline;
pub use projection::{ScaleCompensation, build_local_projection, view_scale_factor};
pub use render::{ColorF, DrawItem, OutlineStyle, RenderStats, render_coverages};
pub use traits::{
    Dataset, Feature, Projection, ProjectionParameters, RenderSurface, Workspace,
    WorkspaceCatalog,
};
