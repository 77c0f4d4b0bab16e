use std::f64::consts::PI;

use chart_config::PolarConfigPatch;
use charts::{PolarChart, RecordingSurface, RenderSurface};

fn assert_close(a: f64, b: f64, eps: f64) {
    let diff = (a - b).abs();
    assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
}

fn half_circle_chart<S: RenderSurface>(surface: S) -> PolarChart<S> {
    let patch = PolarConfigPatch::from_json_str(&format!(
        r#"{{
            "angleAxis": {{"startAngle": 0, "endAngle": {PI}, "scaleWeight": [1, 1, 1], "minValue": 0, "maxValue": 100}},
            "radiusAxis": {{"categories": ["A", "B", "C"]}},
            "data": {{"dataset": [30, 50, 70]}}
        }}"#
    ))
    .expect("patch");
    PolarChart::new(surface, patch).expect("chart")
}

#[test]
fn first_bar_sweeps_into_its_slice() {
    let chart = half_circle_chart(RecordingSurface::new(30.0));
    let bars = chart.bar_transitions(None);

    let first = &bars[0];
    assert_eq!(first.category, "A");
    let start = (first.arc)(0.0);
    let end = (first.arc)(1.0);
    assert_eq!(start.start_angle, 0.0);
    assert_eq!(start.end_angle, 0.0);
    assert_close(end.end_angle, 0.2 * PI, 1e-9);
    assert!(end.end_angle <= chart.layout().slices[0].end_angle);
    assert_eq!((first.label_text)(1.0), "30");
}

#[test]
fn bars_stack_inward_by_category() {
    let chart = half_circle_chart(RecordingSurface::new(30.0));
    let bars = chart.bar_transitions(None);
    let radii: Vec<(f64, f64)> = bars
        .iter()
        .map(|b| {
            let arc = (b.arc)(1.0);
            (arc.inner_radius, arc.outer_radius)
        })
        .collect();
    for pair in radii.windows(2) {
        assert!(pair[0].0 >= pair[1].1, "bands overlap: {pair:?}");
    }
    assert!(radii[0].1 <= 250.0);
}

#[test]
fn recorded_frames_end_on_target_state() {
    let mut chart = half_circle_chart(RecordingSurface::new(30.0));
    chart.surface_mut().run_until_idle(1000);
    chart.update_dataset(vec![100.0, 0.0, 50.0]).expect("update");
    chart.surface_mut().run_until_idle(1000);

    let scene = chart.surface().scene();
    let ends: Vec<f64> = scene.bars.iter().map(|b| b.arc.end_angle).collect();
    // The top tick sits on the last slice's start boundary.
    assert_close(ends[0], 2.0 * PI / 3.0, 1e-9);
    assert_close(ends[1], 0.0, 1e-9);
    assert_close(ends[2], PI / 3.0, 1e-9);
    let labels: Vec<&str> = scene.bars.iter().map(|b| b.label_text.as_str()).collect();
    assert_eq!(labels, vec!["100", "0", "50"]);
}
