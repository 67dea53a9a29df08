use chartcov_common::{
    Affine2D, CoverageErrorKind, DatasetId, GeoIntPoint3D, Geometry, GeometryKind, ObjectId,
    PointCollection, PointF2D,
};

use super::common::*;
use crate::mark::{FeatureMarker, MarkStyle};
use crate::render::{ColorF, INFO_COLOR};
use crate::test_catalog::{
    MemoryCatalog, MemoryDataset, MemoryFeature, MemoryWorkspace, RecordingSurface, SurfaceOp,
    envelope_deg, envelope_ring, point_deg,
};

const POINT: u64 = 1;
const MULTIPOINT: u64 = 2;
const CURVE: u64 = 3;
const SURFACE: u64 = 4;
const MULTI_SURFACE: u64 = 5;
const UNSUPPORTED: u64 = 6;

fn object(feature: u64) -> ObjectId {
    ObjectId::new(did(1), feature)
}

fn feature(id: u64, shape: Geometry) -> MemoryFeature {
    MemoryFeature::new(object(id), shape)
}

/// Dataset 1 covers 10E..11E, 50N..51N at 1:50000 and carries one feature of
/// each shape kind.
fn mark_catalog(min_display_scale: f64) -> MemoryCatalog {
    let multipoint = [(10.2, 50.2), (10.5, 50.5), (10.8, 50.8)]
        .into_iter()
        .map(|(lon, lat)| {
            let p = point_deg(lon, lat);
            GeoIntPoint3D::new(p.x, p.y, 15)
        })
        .collect();
    let curve = PointCollection::from_points(vec![
        point_deg(10.1, 50.1),
        point_deg(10.4, 50.6),
        point_deg(10.9, 50.2),
    ]);
    let west = envelope_deg(10.1, 50.1, 10.4, 50.4);
    let east = envelope_deg(10.6, 50.6, 10.9, 50.9);

    let ws = MemoryWorkspace::new(WS_ID, WS_NAME)
        .with_dataset(
            MemoryDataset::rect(did(1), "MARKS.000", CELL_SCALE, envelope_deg(10.0, 50.0, 11.0, 51.0))
                .with_min_display_scale(min_display_scale),
        )
        .with_feature(feature(POINT, Geometry::Point(point_deg(10.5, 50.5))))
        .with_feature(feature(MULTIPOINT, Geometry::Multipoint(multipoint)))
        .with_feature(feature(CURVE, Geometry::Curve(curve)))
        .with_feature(feature(SURFACE, Geometry::polygon(envelope_ring(&west))))
        .with_feature(feature(
            MULTI_SURFACE,
            Geometry::MultiSurface(vec![
                Geometry::polygon(envelope_ring(&west)),
                Geometry::polygon(envelope_ring(&east)),
            ]),
        ))
        .with_feature(feature(UNSUPPORTED, Geometry::Unsupported(GeometryKind::Arc)));
    MemoryCatalog::new().with_workspace(ws)
}

#[test]
fn point_mark_is_a_cross_at_local_origin() {
    let catalog = mark_catalog(0.0);
    let mut marker = FeatureMarker::default();

    let focus = marker
        .set_mark(&catalog, object(POINT), &view_on_cell(0, 0, NARROW_SCALE))
        .unwrap();
    assert_eq!(focus.position, point_deg(10.5, 50.5));
    assert_eq!(focus.scale, NARROW_SCALE);

    let mark = marker.current().unwrap();
    assert_eq!(mark.kind(), GeometryKind::Point);
    assert_eq!(mark.base_scale(), 25_000.0);
    assert!(!mark.is_filled());
    let figures = mark.outline().figures();
    assert_eq!(figures.len(), 2);
    assert_eq!(figures[0].points(), &[PointF2D::new(-10.0, 0.0), PointF2D::new(10.0, 0.0)]);
    assert_eq!(figures[1].points(), &[PointF2D::new(0.0, 10.0), PointF2D::new(0.0, -10.0)]);
    assert!(figures.iter().all(|f| !f.is_closed()));
}

#[test]
fn cross_size_follows_style() {
    let catalog = mark_catalog(0.0);
    let mut marker = FeatureMarker::new(MarkStyle {
        cross_half_size: 4.0,
        ..MarkStyle::default()
    });
    marker
        .set_mark(&catalog, object(POINT), &view_on_cell(0, 0, NARROW_SCALE))
        .unwrap();
    let figures = marker.current().unwrap().outline().figures();
    assert_eq!(figures[0].points()[1], PointF2D::new(4.0, 0.0));
}

#[test]
fn multipoint_mark_has_a_cross_per_point() {
    let catalog = mark_catalog(0.0);
    let mut marker = FeatureMarker::default();
    marker
        .set_mark(&catalog, object(MULTIPOINT), &view_on_cell(0, 0, NARROW_SCALE))
        .unwrap();

    let outline = marker.current().unwrap().outline();
    assert_eq!(outline.figure_count(), 6);
    assert_eq!(outline.point_count(), 12);
    // The middle point sits on the dataset center.
    assert_eq!(outline.figures()[2].points()[0], PointF2D::new(-10.0, 0.0));
}

#[test]
fn curve_mark_is_open() {
    let catalog = mark_catalog(0.0);
    let mut marker = FeatureMarker::default();
    marker
        .set_mark(&catalog, object(CURVE), &view_on_cell(0, 0, NARROW_SCALE))
        .unwrap();

    let mark = marker.current().unwrap();
    assert!(!mark.is_filled());
    assert_eq!(mark.outline().figure_count(), 1);
    assert_eq!(mark.outline().point_count(), 3);
    assert!(!mark.outline().figures()[0].is_closed());
}

#[test]
fn surface_mark_is_filled_then_stroked() {
    let catalog = mark_catalog(0.0);
    let mut marker = FeatureMarker::default();
    let view = view_on_cell(0, 0, NARROW_SCALE);
    let focus = marker.set_mark(&catalog, object(SURFACE), &view).unwrap();
    assert_eq!(focus.position, envelope_deg(10.1, 50.1, 10.4, 50.4).center());

    let mut surface = RecordingSurface::new();
    assert!(marker.render(&mut surface, &view).unwrap());

    let ring = marker.current().unwrap().outline().figures()[0].points().to_vec();
    assert_eq!(
        surface.ops,
        vec![
            SurfaceOp::ResetTransform,
            SurfaceOp::Background(ColorF::TRANSPARENT),
            SurfaceOp::PushTransform(Affine2D::scale(250.0, 250.0)),
            SurfaceOp::Fill {
                points: ring.clone(),
                color: INFO_COLOR.with_alpha(0.5),
            },
            SurfaceOp::Draw {
                points: ring,
                closed: true,
                color: INFO_COLOR,
                width: 6.0 / 250.0,
            },
            SurfaceOp::ResetTransform,
        ]
    );
}

#[test]
fn multi_surface_mark_keeps_every_member() {
    let catalog = mark_catalog(0.0);
    let mut marker = FeatureMarker::default();
    let view = view_on_cell(0, 0, NARROW_SCALE);
    marker.set_mark(&catalog, object(MULTI_SURFACE), &view).unwrap();

    let mark = marker.current().unwrap();
    assert!(mark.is_filled());
    assert_eq!(mark.outline().figure_count(), 2);

    let mut surface = RecordingSurface::new();
    marker.render(&mut surface, &view).unwrap();
    assert_eq!(surface.fills().count(), 2);
    assert_eq!(surface.draws().count(), 2);
}

#[test]
fn focus_scale_is_capped_by_min_display_scale() {
    let mut marker = FeatureMarker::default();

    let catalog = mark_catalog(5_000.0);
    let focus = marker
        .set_mark(&catalog, object(POINT), &view_on_cell(0, 0, 20_000.0))
        .unwrap();
    assert_eq!(focus.scale, 5_000.0);

    // Already zoomed in further than required.
    let focus = marker
        .set_mark(&catalog, object(POINT), &view_on_cell(0, 0, NARROW_SCALE))
        .unwrap();
    assert_eq!(focus.scale, NARROW_SCALE);
}

#[test]
fn base_scale_keeps_fraction() {
    let ws = MemoryWorkspace::new(WS_ID, WS_NAME)
        .with_dataset(MemoryDataset::rect(did(1), "ODD.000", 25_001, envelope_deg(10.0, 50.0, 11.0, 51.0)))
        .with_feature(feature(POINT, Geometry::Point(point_deg(10.5, 50.5))));
    let catalog = MemoryCatalog::new().with_workspace(ws);
    let mut marker = FeatureMarker::default();
    marker
        .set_mark(&catalog, object(POINT), &view_on_cell(0, 0, NARROW_SCALE))
        .unwrap();
    assert_eq!(marker.current().unwrap().base_scale(), 12_500.5);
}

#[test]
fn failed_mark_leaves_no_mark() {
    let catalog = mark_catalog(0.0);
    let mut marker = FeatureMarker::default();
    let view = view_on_cell(0, 0, NARROW_SCALE);
    marker.set_mark(&catalog, object(POINT), &view).unwrap();

    let err = marker.set_mark(&catalog, object(99), &view).unwrap_err();
    assert_eq!(err.kind, CoverageErrorKind::Catalog);
    assert!(marker.current().is_none());

    let err = marker.set_mark(&catalog, object(UNSUPPORTED), &view).unwrap_err();
    assert_eq!(err.kind, CoverageErrorKind::Geometry);
    assert!(marker.current().is_none());

    let elsewhere = ObjectId::new(DatasetId::new(WS_ID + 1, 1), POINT);
    let err = marker.set_mark(&catalog, elsewhere, &view).unwrap_err();
    assert_eq!(err.kind, CoverageErrorKind::WorkspaceNotFound);

    let err = marker
        .set_mark(&catalog, object(POINT), &view.clone().with_clone_failure())
        .unwrap_err();
    assert_eq!(err.kind, CoverageErrorKind::Projection);
    assert!(marker.current().is_none());
}

#[test]
fn removed_mark_renders_nothing() {
    let catalog = mark_catalog(0.0);
    let mut marker = FeatureMarker::default();
    let view = view_on_cell(0, 0, NARROW_SCALE);
    marker.set_mark(&catalog, object(CURVE), &view).unwrap();

    let removed = marker.remove_mark().unwrap();
    assert_eq!(removed.object(), object(CURVE));
    assert!(marker.remove_mark().is_none());

    let mut surface = RecordingSurface::new();
    assert!(!marker.render(&mut surface, &view).unwrap());
    assert_eq!(
        surface.ops,
        vec![SurfaceOp::ResetTransform, SurfaceOp::Background(ColorF::TRANSPARENT)]
    );
}
