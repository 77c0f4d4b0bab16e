//! The drawing seam between chart controllers and a host renderer.
//!
//! Controllers never draw. They compute layouts and tweens and hand them to a
//! [`RenderSurface`], which owns the element lifecycle and samples tweens from
//! its own frame scheduler.

use std::sync::Arc;

use foundation::math::{GeoPoint, Orthographic, Vec2};
use foundation::tween::{Easing, Tween};
use geodata::GeoData;

use crate::layout::{AngleAxisLayout, RadiusAxisLayout};
use crate::tween::ArcDescriptor;

pub const BAR_DURATION_MS: f64 = 1000.0;
pub const GLOBE_LEG_DURATION_MS: f64 = 1250.0;
pub const SPIN_DURATION_MS: f64 = 1000.0;

/// Everything needed to animate one bar and its label.
pub struct BarTransition {
    pub index: usize,
    pub category: String,
    /// Target value.
    pub value: f64,
    pub arc: Tween<ArcDescriptor>,
    pub label_position: Tween<Vec2>,
    pub label_text: Tween<String>,
}

/// One drawable state of the globe.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeFrame {
    pub projection: Orthographic,
    /// Great-circle segment to stroke, if any.
    pub arc: Option<(GeoPoint, GeoPoint)>,
    /// Country index to fill as highlighted.
    pub highlight: Option<usize>,
}

pub struct GlobeLeg {
    pub duration_ms: f64,
    pub easing: Easing,
    pub frame: Tween<GlobeFrame>,
}

/// Legs run back to back; a new transition replaces a running one.
pub struct GlobeTransition {
    pub legs: Vec<GlobeLeg>,
}

impl GlobeTransition {
    pub fn duration_ms(&self) -> f64 {
        self.legs.iter().map(|l| l.duration_ms).sum()
    }

    /// Final drawable state, if the transition has any leg.
    pub fn last_frame(&self) -> Option<GlobeFrame> {
        self.legs.last().map(|leg| (leg.frame)(1.0))
    }
}

pub trait RenderSurface {
    fn set_size(&mut self, width: f64, height: f64);
    fn draw_radius_axis(&mut self, axis: &RadiusAxisLayout);
    fn draw_angle_axis(&mut self, axis: &AngleAxisLayout);
    fn animate_bars(&mut self, bars: Vec<BarTransition>, duration_ms: f64);
    fn draw_globe(&mut self, geo: Arc<GeoData>, frame: GlobeFrame);
    fn animate_globe(&mut self, geo: Arc<GeoData>, transition: GlobeTransition);
}

/// Pointer data forwarded by the host with a click.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PointerEvent {
    pub position: Vec2,
}

/// Payload of a bar or category label click.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub index: usize,
    pub category: String,
    pub value: f64,
    pub pointer: PointerEvent,
}
