// File: crates/chart-core/tests/interaction.rs
// Purpose: Hover through ChartView: snapping, overlay pixels, leave, unmount and reconfigure.

use inline_chart_core::{
    ChartConfig, ChartKind, ChartView, DataValue, LogicalSize, RenderOptions, Series,
};

fn quiet() -> RenderOptions {
    RenderOptions::default().with_labels(false)
}

fn line_view() -> ChartView {
    let cfg = ChartConfig::new(ChartKind::Line)
        .with_categories(["A", "B", "C", "D"])
        .with_series(Series::from_numbers(&[1.0, 2.0, 3.0, 4.0]).with_name("Sales"));
    ChartView::mount(LogicalSize::new(640.0, 300.0), 1.0, cfg, None, quiet()).expect("mount")
}

#[test]
fn pointer_near_point_highlights_it() {
    let mut view = line_view();
    view.pointer_move(245.0, 120.0);

    let hit = view.hovered().expect("point within 20px");
    assert_eq!((hit.series_index, hit.point_index), (0, 1));
    assert_eq!(hit.category_label.as_deref(), Some("B"));
    assert_eq!(hit.raw_value, DataValue::Number(2.0));
    assert_eq!(hit.pixel_x, 240.0);
    assert_eq!(hit.label_text(), "B: 2");

    let tooltip = view.tooltip().expect("tooltip shown");
    assert_eq!(tooltip.text, "B: 2");
    assert_eq!(tooltip.x, 250.0);
    assert!((tooltip.y - (hit.pixel_y - 30.0)).abs() < 1e-4);

    let (x, y) = (hit.pixel_x.round() as u32, hit.pixel_y.round() as u32);
    let frame = view.pixels_rgba8().expect("pixels");
    assert_eq!(frame.pixel(x, y), Some([255, 255, 255, 255]), "highlight dot");
}

#[test]
fn pointer_far_from_points_stays_idle() {
    let mut view = line_view();
    let before = view.pixels_rgba8().expect("pixels");
    view.pointer_move(330.0, 120.0);
    assert!(view.hovered().is_none());
    assert!(view.tooltip().is_none());
    assert_eq!(view.pixels_rgba8().expect("pixels"), before);
}

#[test]
fn non_finite_pointer_is_ignored() {
    let mut view = line_view();
    let before = view.pixels_rgba8().expect("pixels");
    view.pointer_move(f32::NAN, 120.0);
    assert!(view.hover_state().is_idle());
    assert!(view.tooltip().is_none());
    view.pointer_move(f32::NEG_INFINITY, 120.0);
    assert!(view.hovered().is_none());
    assert_eq!(view.pixels_rgba8().expect("pixels"), before);
}

#[test]
fn leaving_restores_base_chart() {
    let mut view = line_view();
    let base = view.pixels_rgba8().expect("pixels");
    view.pointer_move(62.0, 100.0);
    assert!(view.hovered().is_some());
    assert_ne!(view.pixels_rgba8().expect("pixels"), base);

    view.pointer_leave();
    assert!(view.hover_state().is_idle());
    assert_eq!(view.pixels_rgba8().expect("pixels"), base);
}

#[test]
fn unmounted_view_ignores_pointer() {
    let mut view = line_view();
    view.unmount();
    assert!(!view.listeners_attached());
    view.pointer_move(240.0, 100.0);
    assert!(view.hovered().is_none());
}

#[test]
fn reconfigure_reattaches_once_and_resets_hover() {
    let mut view = line_view();
    let generation = view.listener_generation();
    view.pointer_move(240.0, 100.0);
    assert!(view.hovered().is_some());

    let next = ChartConfig::new(ChartKind::Bar)
        .with_categories(["x", "y"])
        .with_series(Series::from_numbers(&[3.0, 4.0]));
    view.reconfigure(next).expect("reconfigure");

    assert!(view.listeners_attached());
    assert_eq!(view.listener_generation(), generation + 1);
    assert!(view.hovered().is_none());

    // Bars snap at their slot centre: 60 + 270/2.
    view.pointer_move(200.0, 100.0);
    let hit = view.hovered().expect("bar hit");
    assert_eq!(hit.point_index, 0);
    assert_eq!(hit.category_label.as_deref(), Some("x"));
}

#[test]
fn scatter_pairs_label_as_coordinates() {
    let cfg = ChartConfig::new(ChartKind::Scatter)
        .with_series(Series::from_pairs(&[(1.0, -2.5), (3.0, 4.0)]));
    let mut view =
        ChartView::mount(LogicalSize::new(640.0, 300.0), 2.0, cfg, None, quiet()).expect("mount");
    view.pointer_move(65.0, 200.0);
    let hit = view.hovered().expect("first point");
    assert_eq!(hit.category_label, None);
    assert_eq!(hit.label_text(), "(1, -2.5)");
}

#[test]
fn pie_has_nothing_to_hover() {
    let cfg = ChartConfig::new(ChartKind::Pie)
        .with_categories(["a", "b"])
        .with_series(Series::from_numbers(&[1.0, 1.0]));
    let size = LogicalSize::new(320.0, 240.0);
    let mut view = ChartView::mount(size, 1.0, cfg, None, RenderOptions::default()).expect("mount");
    view.pointer_move(160.0, 120.0);
    assert!(view.hovered().is_none());
}
