use chartcov_common::{
    CoverageError, CoverageErrorKind, EQUATOR_LENGTH_M, GeoEnvelope, RectF2D,
};

use super::entry::{CoverageCache, CoverageEntry};
use super::CoverageConfig;
use crate::render::DrawItem;
use crate::traits::{Projection, WorkspaceCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshState {
    #[default]
    Idle,
    Refreshing,
}

/// Counters for one refresh pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshStats {
    /// Ids produced by the spatial query.
    pub queried: usize,
    /// Already cached; only recency and visibility were updated.
    pub reused: usize,
    pub built: usize,
    /// Per-dataset failures; these datasets are absent this pass.
    pub skipped: usize,
    pub evicted: usize,
    /// The query envelope was widened to the whole longitude range.
    pub full_longitude: bool,
}

/// Visible-coverage cache for one workspace, refreshed on viewport or
/// projection change.
pub struct CoverageLayer<C: WorkspaceCatalog> {
    catalog: C,
    config: CoverageConfig,
    cache: CoverageCache,
    workspace_name: Option<String>,
    viewport: RectF2D,
    state: RefreshState,
}

impl<C: WorkspaceCatalog> CoverageLayer<C> {
    pub fn new(catalog: C, config: CoverageConfig) -> Self {
        Self {
            catalog,
            config,
            cache: CoverageCache::new(),
            workspace_name: None,
            viewport: RectF2D::default(),
            state: RefreshState::Idle,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &CoverageConfig {
        &self.config
    }

    pub fn cache(&self) -> &CoverageCache {
        &self.cache
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    pub fn viewport_bounds(&self) -> RectF2D {
        self.viewport
    }

    pub fn set_viewport_bounds(&mut self, bounds: RectF2D) {
        self.viewport = bounds;
    }

    pub fn workspace_name(&self) -> Option<&str> {
        self.workspace_name.as_deref()
    }

    /// Select the workspace to query. Switching to a different workspace
    /// drops every cached coverage.
    pub fn set_workspace_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.workspace_name.as_deref() == Some(name.as_str()) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            workspace = %name,
            dropped = self.cache.len(),
            "coverage workspace switched"
        );
        self.cache.clear();
        self.workspace_name = Some(name);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Geographic envelope covered by the viewport under `projection`.
    pub fn visible_envelope(&self, projection: &dyn Projection) -> Result<GeoEnvelope, CoverageError> {
        self.query_envelope(projection).map(|(env, _)| env)
    }

    /// Every cached coverage, most recent first.
    pub fn draw_items(&self) -> impl Iterator<Item = DrawItem<'_>> + '_ {
        self.cache.iter().map(|(_, entry)| DrawItem::from(entry))
    }

    pub fn visible_count(&self) -> usize {
        self.cache.iter().filter(|(_, e)| e.is_visible()).count()
    }

    /// Recompute which coverages are visible, building entries for newly
    /// visible datasets and evicting stale invisible ones.
    ///
    /// Failures before the query (no workspace, failed inverse projection)
    /// leave the cache exactly as it was. A failed query leaves every entry
    /// invisible and still shrinks the cache before returning the error.
    pub fn refresh(&mut self, projection: &dyn Projection) -> Result<RefreshStats, CoverageError> {
        if self.state == RefreshState::Refreshing {
            return Err(CoverageError::new(CoverageErrorKind::Busy)
                .with_message("coverage refresh already in flight"));
        }
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("coverage_refresh", cached = self.cache.len()).entered();

        self.state = RefreshState::Refreshing;
        let result = self.refresh_pass(projection);
        self.state = RefreshState::Idle;

        #[cfg(feature = "tracing")]
        {
            match &result {
                Ok(stats) => tracing::debug!(
                    queried = stats.queried,
                    reused = stats.reused,
                    built = stats.built,
                    skipped = stats.skipped,
                    evicted = stats.evicted,
                    full_longitude = stats.full_longitude,
                    "coverage refresh done"
                ),
                Err(err) => tracing::warn!(error = %err, "coverage refresh aborted"),
            }
        }
        result
    }

    fn refresh_pass(&mut self, projection: &dyn Projection) -> Result<RefreshStats, CoverageError> {
        let name = self
            .workspace_name
            .as_deref()
            .ok_or_else(|| CoverageError::uninitialized("no workspace selected"))?;
        let workspace = self.catalog.workspace(name).ok_or_else(|| {
            CoverageError::new(CoverageErrorKind::WorkspaceNotFound)
                .with_message(format!("workspace '{name}'"))
        })?;
        let (envelope, full_longitude) = self.query_envelope(projection)?;

        for entry in self.cache.values_mut() {
            entry.set_visible(false);
        }
        let ids = match workspace.dataset_ids(&envelope) {
            Ok(ids) => ids,
            Err(err) => {
                let _evicted = self.cache.shrink_to_size(self.config.capacity);
                #[cfg(feature = "tracing")]
                tracing::debug!(evicted = _evicted, "coverage query failed");
                return Err(err);
            }
        };

        let mut stats = RefreshStats {
            full_longitude,
            ..RefreshStats::default()
        };
        for did in ids {
            stats.queried += 1;
            if let Some(entry) = self.cache.get(&did) {
                entry.set_visible(true);
                stats.reused += 1;
                continue;
            }
            match CoverageEntry::build(workspace.as_ref(), did, projection) {
                Ok(mut entry) => {
                    entry.set_visible(true);
                    self.cache.put(did, entry);
                    stats.built += 1;
                }
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(dataset = %did, error = %err, "coverage skipped");
                    stats.skipped += 1;
                }
            }
        }

        stats.evicted = self.cache.shrink_to_size(self.config.capacity);
        Ok(stats)
    }

    fn query_envelope(
        &self,
        projection: &dyn Projection,
    ) -> Result<(GeoEnvelope, bool), CoverageError> {
        if self.viewport.is_empty() {
            return Err(CoverageError::uninitialized("viewport bounds not set"));
        }
        let corners = self
            .viewport
            .corners()
            .into_iter()
            .map(|c| projection.inverse(c).map(|g| g.clamped()))
            .collect::<Result<Vec<_>, _>>()?;
        let envelope = GeoEnvelope::from_points(corners)
            .ok_or_else(|| CoverageError::projection("viewport has no corners"))?;

        let params = projection.parameters();
        let ground_width = self.viewport.width * params.coordinate_unit * params.scale_factor;
        if ground_width >= EQUATOR_LENGTH_M {
            Ok((envelope.with_full_longitude(), true))
        } else {
            Ok((envelope, false))
        }
    }

    #[doc(hidden)]
    pub fn __set_state(&mut self, state: RefreshState) {
        self.state = state;
    }
}
