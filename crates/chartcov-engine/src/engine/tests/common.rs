//! Common test helpers
use std::sync::Arc;

use chartcov_common::{DatasetId, RectF2D};

use crate::engine::{CoverageConfig, CoverageLayer};
use crate::test_catalog::{
    MemoryCatalog, MemoryDataset, MemoryWorkspace, PlanarProjection, envelope_deg,
};

pub const WS_NAME: &str = "charts";
pub const WS_ID: u16 = 3;

/// Compilation scale of grid cells; base scale is half of it.
pub const CELL_SCALE: u32 = 50_000;

/// At this view scale an 800 unit wide viewport spans about 0.72 degrees,
/// so a view centered on a cell sees that cell only.
pub const NARROW_SCALE: f64 = 100.0;

/// At this view scale the viewport spans about 7.2 by 5.4 degrees.
pub const WIDE_SCALE: f64 = 1_000.0;

pub type TestLayer = CoverageLayer<Arc<MemoryCatalog>>;

pub fn did(index: u64) -> DatasetId {
    DatasetId::new(WS_ID, index)
}

pub fn viewport() -> RectF2D {
    RectF2D::centered(800.0, 600.0)
}

/// `cols` x `rows` one-degree cells starting at 10E 50N. Cell `(c, r)` has
/// index `r * cols + c + 1`.
pub fn grid_workspace(cols: u32, rows: u32) -> MemoryWorkspace {
    let mut ws = MemoryWorkspace::new(WS_ID, WS_NAME);
    for r in 0..rows {
        for c in 0..cols {
            let index = u64::from(r * cols + c + 1);
            let (lon, lat) = (10.0 + f64::from(c), 50.0 + f64::from(r));
            ws = ws.with_dataset(MemoryDataset::rect(
                did(index),
                &format!("CELL{index:03}.000"),
                CELL_SCALE,
                envelope_deg(lon, lat, lon + 1.0, lat + 1.0),
            ));
        }
    }
    ws
}

/// Projection centered on grid cell `(c, r)`.
pub fn view_on_cell(c: u32, r: u32, scale: f64) -> PlanarProjection {
    PlanarProjection::centered(10.5 + f64::from(c), 50.5 + f64::from(r), scale)
}

pub fn layer_with(ws: MemoryWorkspace, config: CoverageConfig) -> (TestLayer, Arc<MemoryCatalog>) {
    let catalog = Arc::new(MemoryCatalog::new().with_workspace(ws));
    let mut layer = CoverageLayer::new(Arc::clone(&catalog), config);
    layer.set_workspace_name(WS_NAME);
    layer.set_viewport_bounds(viewport());
    (layer, catalog)
}

pub fn layer(ws: MemoryWorkspace) -> (TestLayer, Arc<MemoryCatalog>) {
    layer_with(ws, CoverageConfig::default())
}

pub fn workspace(catalog: &MemoryCatalog) -> &Arc<MemoryWorkspace> {
    catalog.memory_workspace(WS_NAME).unwrap()
}

/// Visible dataset ids, sorted.
pub fn visible_ids(layer: &TestLayer) -> Vec<DatasetId> {
    let mut ids: Vec<DatasetId> = layer
        .cache()
        .iter()
        .filter(|(_, e)| e.is_visible())
        .map(|(k, _)| *k)
        .collect();
    ids.sort();
    ids
}

/// Cached dataset ids, sorted.
pub fn cached_ids(layer: &TestLayer) -> Vec<DatasetId> {
    let mut ids: Vec<DatasetId> = layer.cache().keys().copied().collect();
    ids.sort();
    ids
}
