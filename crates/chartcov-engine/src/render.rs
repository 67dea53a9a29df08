//! Per-frame drawing of cached coverages.

use chartcov_common::{CoverageError, GeoIntPoint};

use crate::engine::{CoverageEntry, CoverageLayer};
use crate::outline::CoverageOutline;
use crate::projection::{ScaleCompensation, view_scale_factor};
use crate::traits::{Projection, RenderSurface, WorkspaceCatalog};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorF {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Orange used for chart information overlays.
pub const INFO_COLOR: ColorF = ColorF::rgba(0.92, 0.55, 0.10, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    pub color: ColorF,
    /// Screen stroke width; divided by the scale ratio at draw time.
    pub width: f64,
    pub background: ColorF,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            color: INFO_COLOR,
            width: 1.0,
            background: ColorF::TRANSPARENT,
        }
    }
}

/// Read-only view of one cached coverage.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub outline: &'a CoverageOutline,
    pub base_center: GeoIntPoint,
    pub base_scale: f64,
    pub visible: bool,
}

impl<'a> From<&'a CoverageEntry> for DrawItem<'a> {
    fn from(entry: &'a CoverageEntry) -> Self {
        Self {
            outline: entry.outline(),
            base_center: entry.base_center(),
            base_scale: entry.base_scale(),
            visible: entry.is_visible(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub drawn: usize,
    /// Visible items whose transform could not be computed or drawn.
    pub skipped: usize,
}

/// Refresh `layer` and draw every visible coverage onto `surface`.
///
/// A failed refresh is not fatal: whatever the cache still marks visible is drawn.
pub fn render_coverages<C, S>(
    layer: &mut CoverageLayer<C>,
    surface: &mut S,
    projection: &dyn Projection,
) -> Result<RenderStats, CoverageError>
where
    C: WorkspaceCatalog,
    S: RenderSurface + ?Sized,
{
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("coverage_render").entered();

    if let Err(_err) = layer.refresh(projection) {
        #[cfg(feature = "tracing")]
        tracing::debug!(error = %_err, "drawing cached coverages after failed refresh");
    }
    let layer: &CoverageLayer<C> = layer;
    let style = layer.config().coverage_style;
    let view_scale = view_scale_factor(projection);

    surface.fill_background(style.background)?;

    let mut stats = RenderStats::default();
    for item in layer.draw_items().filter(|item| item.visible) {
        match draw_item(surface, projection, &item, &style, view_scale) {
            Ok(()) => stats.drawn += 1,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %err, "coverage not drawn");
                stats.skipped += 1;
            }
        }
    }
    surface.reset_transform();
    Ok(stats)
}

fn draw_item<S: RenderSurface + ?Sized>(
    surface: &mut S,
    projection: &dyn Projection,
    item: &DrawItem<'_>,
    style: &OutlineStyle,
    view_scale: f64,
) -> Result<(), CoverageError> {
    let comp = ScaleCompensation::new(projection, item.base_center, item.base_scale, view_scale)?;
    surface.reset_transform();
    surface.push_transform(comp.transform());
    let width = comp.stroke_width(style.width);
    for figure in item.outline.figures() {
        surface.draw_outline(figure.points(), figure.is_closed(), style.color, width)?;
    }
    Ok(())
}
