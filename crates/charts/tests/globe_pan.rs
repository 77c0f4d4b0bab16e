use chart_config::GlobeConfigPatch;
use charts::{GlobeChart, RecordingSurface};
use foundation::math::GeoPoint;
use geodata::{Country, GeoData, StaticGeoProvider};

fn assert_close(a: f64, b: f64, eps: f64) {
    let diff = (a - b).abs();
    assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
}

fn world() -> StaticGeoProvider {
    let ring = vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(5.0, 0.0),
        GeoPoint::new(5.0, 5.0),
        GeoPoint::new(0.0, 5.0),
        GeoPoint::new(0.0, 0.0),
    ];
    StaticGeoProvider::new(GeoData::from_countries(vec![Country {
        id: Some("1".to_string()),
        name: "Square".to_string(),
        polygons: vec![vec![ring]],
    }]))
}

#[test]
fn pan_centers_destination() {
    let patch = GlobeConfigPatch::from_json_str(
        r#"{"dimensions": {"width": 600, "height": 400}, "scale": 180}"#,
    )
    .expect("patch");
    let mut chart = GlobeChart::new(RecordingSurface::new(24.0), patch).expect("chart");
    pollster::block_on(chart.load(&world())).expect("load");

    let from = GeoPoint::new(-46.6333, -23.5505);
    let to = GeoPoint::new(139.6917, 35.6895);
    chart.pan(from, to).expect("pan");
    chart.surface_mut().run_until_idle(1000);

    let frame = chart.surface().scene().globe.expect("frame");
    let center = frame.projection.project(to).expect("visible");
    assert_close(center.x, 300.0, 1e-6);
    assert_close(center.y, 200.0, 1e-6);
    assert!(frame.projection.project(from).is_none(), "start is behind the globe");
    let (a, b) = frame.arc.expect("arc");
    assert_close(a.lon_deg, to.lon_deg, 1e-6);
    assert_eq!(b, to);
}

#[test]
fn turning_leg_never_overshoots() {
    let mut chart = GlobeChart::new(RecordingSurface::new(8.0), GlobeConfigPatch::default())
        .expect("chart");
    pollster::block_on(chart.load(&world())).expect("load");
    chart
        .pan(GeoPoint::new(0.0, 0.0), GeoPoint::new(90.0, 0.0))
        .expect("pan");

    // Sample every frame of the turning leg: the rotation never overshoots.
    for _ in 0..10 {
        chart.surface_mut().tick();
        let lon = chart.surface().scene().globe.expect("frame").projection.rotation[0];
        assert!((-90.0 - 1e-9..=1e-9).contains(&lon), "lambda {lon}");
    }
}
