use super::layout::{x_scale, y_scale, LinearScale, HOVER_TOLERANCE, PLOT_MARGIN};
use super::*;
use crate::types::{GroupAggregate, TooltipData};
use pretty_assertions::assert_eq;

fn group(key: &str, average_points: &str, average_price: &str) -> GroupAggregate {
    GroupAggregate {
        key: Some(key.to_string()),
        points: Vec::new(),
        prices: Vec::new(),
        average_points: average_points.to_string(),
        average_price: average_price.to_string(),
        tooltip: TooltipData::new().with("Country", key),
    }
}

fn setup_plan() -> ScenePlan {
    ScenePlan {
        title: "Wine Scores grouped by Countries".to_string(),
        aggregates: vec![
            group("A", "91.00", "20.00"),
            group("B", "80.00", "5.00"),
            group("C", "100.00", "41.00"),
        ],
        bounds: AxisBounds::new(1.0, 78.0, 41.0, 100.0),
        annotation: None,
    }
}

#[test]
fn test_linear_scale() {
    let scale = LinearScale::new((0.0, 10.0), (100.0, 200.0));
    assert_eq!(scale.apply(0.0), 100.0);
    assert_eq!(scale.apply(5.0), 150.0);
    assert_eq!(scale.apply(10.0), 200.0);

    let inverted = LinearScale::new((0.0, 10.0), (200.0, 100.0));
    assert_eq!(inverted.apply(10.0), 100.0);

    let flat = LinearScale::new((3.0, 3.0), (0.0, 50.0));
    assert_eq!(flat.apply(3.0), 0.0);
}

#[test]
fn test_scales_respect_margins() {
    let plan = setup_plan();
    let viewport = Viewport::new(600, 400);
    let xs = x_scale(&plan.bounds, viewport);
    let ys = y_scale(&plan.bounds, viewport);
    let margin = PLOT_MARGIN as f64;

    assert_eq!(xs.apply(1.0), margin);
    assert_eq!(xs.apply(41.0), 600.0 - margin);
    // Higher scores sit higher on screen
    assert_eq!(ys.apply(100.0), margin);
    assert_eq!(ys.apply(78.0), 400.0 - margin);
}

#[test]
fn test_layout_places_every_group() {
    let plan = setup_plan();
    let layout = layout_plot(&plan, Viewport::new(600, 400));

    assert_eq!(layout.markers.len(), 3);
    let top = &layout.markers[2];
    assert_eq!((top.x, top.y), (550.0, 50.0));
    assert_eq!(top.tooltip.get("Country"), Some("C"));
    assert!(layout.markers[0].y < layout.markers[1].y);
    assert!(layout.annotation.is_none());
}

#[test]
fn test_layout_is_idempotent() {
    let plan = setup_plan();
    let viewport = Viewport::new(1024, 700);

    let first = layout_plot(&plan, viewport);
    let second = layout_plot(&plan, viewport);

    assert_eq!(first, second);
}

#[test]
fn test_layout_skips_non_finite_groups() {
    let mut plan = setup_plan();
    plan.aggregates.push(group("broken", "NaN", "12.00"));

    let layout = layout_plot(&plan, Viewport::new(600, 400));

    assert_eq!(layout.markers.len(), 3);
}

#[test]
fn test_annotation_layout() {
    let mut plan = setup_plan();
    plan.bounds = AxisBounds::new(1.0, 78.0, 129.0, 100.0);
    plan.annotation = Some(Annotation {
        label: "Sweet Spot",
        x: 65.0,
        y: 89.0,
        radius: 90,
        note_offset: (150, 150),
    });

    let layout = layout_plot(&plan, Viewport::new(1100, 540));
    let annotation = layout.annotation.unwrap();

    // 65 is the middle of [1, 129]; 89 is the middle of [78, 100]
    assert_eq!(annotation.center, (550.0, 270.0));
    assert_eq!(annotation.note, (700.0, 420.0));
    assert_eq!(annotation.radius, 90.0);
    assert_eq!(annotation.label, "Sweet Spot");
}

#[test]
fn test_small_viewport_is_clamped() {
    let viewport = Viewport::new(10, 0);
    assert!(viewport.plot_width() > 0.0);
    assert!(viewport.plot_height() > 0.0);
}

#[test]
fn test_axis_bounds_for_aggregates() {
    let plan = setup_plan();
    let bounds = AxisBounds::for_aggregates(&plan.aggregates, 1.0, (78.0, 100.0));
    assert_eq!(bounds, AxisBounds::new(1.0, 78.0, 41.0, 100.0));
}

#[test]
fn test_axis_bounds_degenerate() {
    let empty = AxisBounds::for_aggregates(&[], 1.0, (78.0, 100.0));
    assert_eq!(empty.max_x, 2.0);

    let cheap = vec![group("A", "85.00", "0.50")];
    let bounds = AxisBounds::for_aggregates(&cheap, 1.0, (78.0, 100.0));
    assert_eq!(bounds.max_x, 2.0);

    let broken = vec![group("A", "85.00", "NaN"), group("B", "85.00", "30.00")];
    let bounds = AxisBounds::for_aggregates(&broken, 1.0, (78.0, 100.0));
    assert_eq!(bounds.max_x, 30.0);
}

#[test]
fn test_hit_test() {
    let plan = setup_plan();
    let layout = layout_plot(&plan, Viewport::new(600, 400));
    let target = &layout.markers[0];

    let hit = hit_test(&layout.markers, (target.x + 1.0, target.y - 1.0)).unwrap();
    assert_eq!(hit.tooltip.get("Country"), Some("A"));

    let far = (target.x + 3.0 + HOVER_TOLERANCE + 1.0, target.y);
    assert!(hit_test(&layout.markers, far).is_none());
    assert!(hit_test(&[], (0.0, 0.0)).is_none());
}

#[test]
fn test_hit_test_prefers_nearest() {
    let near = Marker {
        x: 100.0,
        y: 100.0,
        tooltip: TooltipData::new().with("Winery", "near"),
    };
    let close = Marker {
        x: 103.0,
        y: 100.0,
        tooltip: TooltipData::new().with("Winery", "close"),
    };
    let markers = vec![near, close];

    let hit = hit_test(&markers, (102.5, 100.0)).unwrap();
    assert_eq!(hit.tooltip.get("Winery"), Some("close"));
}

#[test]
fn test_export_file_name() {
    let name = export_file_name(4);
    assert!(name.starts_with("scene-4-"));
    assert!(name.ends_with(".svg"));
}
