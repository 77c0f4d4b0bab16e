//! Minimal SVG rendering of a recorded [`Scene`].

use std::fmt::Write;

use charts::{ArcDescriptor, GlobeFrame, Scene};
use foundation::math::{geo_interpolate, polar_to_cartesian, GeoPoint, Orthographic, Vec2};
use geodata::GeoData;

const ARC_SAMPLES: usize = 48;

fn header(out: &mut String, width: f64, height: f64) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn point(center: Vec2, angle: f64, radius: f64) -> Vec2 {
    center + polar_to_cartesian(angle, radius)
}

/// Path data for an annular sector centered at `center`.
pub fn arc_path(arc: &ArcDescriptor, center: Vec2) -> String {
    let span = arc.end_angle - arc.start_angle;
    if span.abs() < 1e-9 {
        return String::new();
    }
    let large = u8::from(span.abs() > std::f64::consts::PI);
    let sweep = u8::from(span > 0.0);
    let (ro, ri) = (arc.outer_radius, arc.inner_radius.max(0.0));
    let os = point(center, arc.start_angle, ro);
    let oe = point(center, arc.end_angle, ro);
    let ie = point(center, arc.end_angle, ri);
    let is = point(center, arc.start_angle, ri);
    format!(
        "M{:.3},{:.3}A{ro:.3},{ro:.3} 0 {large} {sweep} {:.3},{:.3}L{:.3},{:.3}A{ri:.3},{ri:.3} 0 {large} {} {:.3},{:.3}Z",
        os.x,
        os.y,
        oe.x,
        oe.y,
        ie.x,
        ie.y,
        1 - sweep,
        is.x,
        is.y
    )
}

pub fn render_polar(scene: &Scene) -> String {
    let (width, height) = scene.size.unwrap_or((500.0, 500.0));
    let center = Vec2::new(width / 2.0, height / 2.0);
    let mut out = String::new();
    header(&mut out, width, height);

    if let Some(axis) = &scene.angle_axis {
        for slice in &axis.slices {
            let edge = point(center, slice.end_angle, axis.radius);
            let _ = writeln!(
                out,
                r##"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="#999" stroke-dasharray="{}"/>"##,
                center.x, center.y, edge.x, edge.y, axis.dash
            );
        }
        for tick in &axis.ticks {
            let _ = writeln!(
                out,
                r##"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="#333"/>"##,
                center.x + tick.inner.x,
                center.y + tick.inner.y,
                center.x + tick.outer.x,
                center.y + tick.outer.y
            );
        }
    }
    if let Some(axis) = &scene.radius_axis {
        for label in &axis.labels {
            let _ = writeln!(
                out,
                r#"<text x="{:.3}" y="{:.3}" text-anchor="end" font-size="12">{}</text>"#,
                center.x + label.position.x - 4.0,
                center.y + label.position.y,
                escape(&label.category)
            );
        }
    }
    for bar in &scene.bars {
        let _ = writeln!(
            out,
            r##"<path d="{}" fill="#4682b4" data-index="{}"/>"##,
            arc_path(&bar.arc, center),
            bar.index
        );
        let _ = writeln!(
            out,
            r##"<text x="{:.3}" y="{:.3}" text-anchor="middle" font-size="11" fill="#fff">{}</text>"##,
            center.x + bar.label_position.x,
            center.y + bar.label_position.y,
            escape(&bar.label_text)
        );
    }
    out.push_str("</svg>\n");
    out
}

/// Polyline path data for `points`, split wherever a point falls on the far
/// side of the globe.
fn projected_path(projection: &Orthographic, points: &[GeoPoint], close: bool) -> String {
    let mut d = String::new();
    let mut pen_down = false;
    let mut visible = 0;
    for p in points {
        match projection.project(*p) {
            Some(v) => {
                let cmd = if pen_down { 'L' } else { 'M' };
                let _ = write!(d, "{cmd}{:.2},{:.2}", v.x, v.y);
                pen_down = true;
                visible += 1;
            }
            None => pen_down = false,
        }
    }
    if close && visible == points.len() && visible > 2 {
        d.push('Z');
    }
    d
}

pub fn render_globe(scene: &Scene) -> String {
    let (width, height) = scene.size.unwrap_or((500.0, 500.0));
    let mut out = String::new();
    header(&mut out, width, height);

    if let (Some(geo), Some(frame)) = (&scene.geo, &scene.globe) {
        write_globe(&mut out, geo, frame);
    }
    out.push_str("</svg>\n");
    out
}

fn write_globe(out: &mut String, geo: &GeoData, frame: &GlobeFrame) {
    let proj = &frame.projection;
    let _ = writeln!(
        out,
        r##"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="none" stroke="#000" stroke-width="1.5"/>"##,
        proj.translate.x, proj.translate.y, proj.scale
    );
    for polygon in &geo.land {
        if let Some(exterior) = polygon.first() {
            let d = projected_path(proj, exterior, true);
            if !d.is_empty() {
                let _ = writeln!(out, r##"<path d="{d}" fill="#ccc"/>"##);
            }
        }
    }
    if let Some(country) = frame.highlight.and_then(|i| geo.countries.get(i)) {
        for polygon in &country.polygons {
            if let Some(exterior) = polygon.first() {
                let d = projected_path(proj, exterior, true);
                if !d.is_empty() {
                    let _ = writeln!(out, r##"<path d="{d}" fill="#f00"/>"##);
                }
            }
        }
    }
    for border in &geo.borders {
        let d = projected_path(proj, border, false);
        if !d.is_empty() {
            let _ = writeln!(
                out,
                r##"<path d="{d}" fill="none" stroke="#fff" stroke-width="0.5"/>"##
            );
        }
    }
    if let Some((a, b)) = frame.arc {
        let along = geo_interpolate(a, b);
        let samples: Vec<GeoPoint> = (0..=ARC_SAMPLES)
            .map(|i| along(i as f64 / ARC_SAMPLES as f64))
            .collect();
        let d = projected_path(proj, &samples, false);
        if !d.is_empty() {
            let _ = writeln!(out, r##"<path d="{d}" fill="none" stroke="#000"/>"##);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{arc_path, render_polar};
    use charts::{ArcDescriptor, DrawnBar, Scene};
    use foundation::math::Vec2;

    #[test]
    fn quarter_arc_path_uses_small_clockwise_sweep() {
        let arc = ArcDescriptor {
            start_angle: 0.0,
            end_angle: std::f64::consts::FRAC_PI_2,
            inner_radius: 5.0,
            outer_radius: 10.0,
        };
        let d = arc_path(&arc, Vec2::new(0.0, 0.0));
        assert!(d.starts_with("M0.000,-10.000A10.000,10.000 0 0 1 10.000,"), "{d}");
        assert!(d.contains("A5.000,5.000 0 0 0 "), "{d}");
        assert!(d.ends_with('Z'));
    }

    #[test]
    fn collapsed_arc_draws_nothing() {
        let arc = ArcDescriptor {
            start_angle: 1.0,
            end_angle: 1.0,
            inner_radius: 5.0,
            outer_radius: 10.0,
        };
        assert_eq!(arc_path(&arc, Vec2::new(0.0, 0.0)), "");
    }

    #[test]
    fn polar_svg_contains_bars_and_labels() {
        let scene = Scene {
            size: Some((100.0, 100.0)),
            bars: vec![DrawnBar {
                index: 0,
                category: "A&B".to_string(),
                value: 30.0,
                arc: ArcDescriptor {
                    start_angle: 0.0,
                    end_angle: 1.0,
                    inner_radius: 10.0,
                    outer_radius: 20.0,
                },
                label_position: Vec2::new(1.0, -15.0),
                label_text: "30".to_string(),
            }],
            ..Scene::default()
        };
        let svg = render_polar(&scene);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"data-index="0""#));
        assert!(svg.contains(">30</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
