//! Reference [`RenderSurface`] that keeps the drawn state in memory.
//!
//! Tweens are sampled on a deterministic [`Timeline`]: the host (or a test)
//! advances frames and reads back the [`Scene`].

use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use foundation::math::Vec2;
use foundation::tween::Easing;
use geodata::GeoData;
use runtime::{Event, EventBus, Frame, Phase, Timeline, Track};

use crate::layout::{AngleAxisLayout, RadiusAxisLayout};
use crate::surface::{BarTransition, GlobeFrame, GlobeTransition, RenderSurface};
use crate::tween::ArcDescriptor;

pub const BARS_TRACK: &str = "bars";
pub const GLOBE_TRACK: &str = "globe";

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnBar {
    pub index: usize,
    pub category: String,
    pub value: f64,
    pub arc: ArcDescriptor,
    pub label_position: Vec2,
    pub label_text: String,
}

/// Last sampled state of everything a chart handed to the surface.
#[derive(Debug, Default)]
pub struct Scene {
    pub size: Option<(f64, f64)>,
    pub radius_axis: Option<RadiusAxisLayout>,
    pub angle_axis: Option<AngleAxisLayout>,
    pub bars: Vec<DrawnBar>,
    pub geo: Option<Arc<GeoData>>,
    pub globe: Option<GlobeFrame>,
    /// Number of `animate_bars` calls received.
    pub bar_transitions: usize,
    /// Number of `animate_globe` calls received.
    pub globe_transitions: usize,
}

pub struct RecordingSurface {
    scene: Rc<RefCell<Scene>>,
    timeline: Timeline,
    bus: EventBus,
    frame: Frame,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl RecordingSurface {
    pub fn new(fps: f64) -> Self {
        Self {
            scene: Rc::new(RefCell::new(Scene::default())),
            timeline: Timeline::new(),
            bus: EventBus::new(),
            frame: Frame::first_at_fps(fps),
        }
    }

    pub fn scene(&self) -> Ref<'_, Scene> {
        self.scene.borrow()
    }

    /// The next frame to be ticked.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn is_idle(&self) -> bool {
        self.timeline.is_idle()
    }

    pub fn events(&self) -> &[Event] {
        self.bus.events()
    }

    pub fn tick(&mut self) {
        self.timeline.tick(self.frame, &mut self.bus);
        self.frame = self.frame.next();
    }

    /// Ticks until every animation finished, up to `max_frames`. Returns the
    /// number of frames ticked.
    pub fn run_until_idle(&mut self, max_frames: u64) -> u64 {
        let start = self.frame.index;
        self.frame = self
            .timeline
            .run_until_idle(self.frame, &mut self.bus, max_frames);
        self.frame.index - start
    }
}

impl RenderSurface for RecordingSurface {
    fn set_size(&mut self, width: f64, height: f64) {
        self.scene.borrow_mut().size = Some((width, height));
    }

    fn draw_radius_axis(&mut self, axis: &RadiusAxisLayout) {
        self.scene.borrow_mut().radius_axis = Some(axis.clone());
    }

    fn draw_angle_axis(&mut self, axis: &AngleAxisLayout) {
        self.scene.borrow_mut().angle_axis = Some(axis.clone());
    }

    fn animate_bars(&mut self, bars: Vec<BarTransition>, duration_ms: f64) {
        let scene = self.scene.clone();
        scene.borrow_mut().bar_transitions += 1;
        let step = move |t: f64| {
            scene.borrow_mut().bars = bars
                .iter()
                .map(|bar| DrawnBar {
                    index: bar.index,
                    category: bar.category.clone(),
                    value: bar.value,
                    arc: (bar.arc)(t),
                    label_position: (bar.label_position)(t),
                    label_text: (bar.label_text)(t),
                })
                .collect();
        };
        self.timeline.schedule(
            Track::new(BARS_TRACK).then(Phase::new(duration_ms, Easing::default(), step)),
        );
    }

    fn draw_globe(&mut self, geo: Arc<GeoData>, frame: GlobeFrame) {
        let mut scene = self.scene.borrow_mut();
        scene.geo = Some(geo);
        scene.globe = Some(frame);
    }

    fn animate_globe(&mut self, geo: Arc<GeoData>, transition: GlobeTransition) {
        {
            let mut scene = self.scene.borrow_mut();
            scene.geo = Some(geo);
            scene.globe_transitions += 1;
        }
        let mut track = Track::new(GLOBE_TRACK);
        for leg in transition.legs {
            let scene = self.scene.clone();
            let frame = leg.frame;
            track = track.then(Phase::new(leg.duration_ms, leg.easing, move |t| {
                scene.borrow_mut().globe = Some(frame(t));
            }));
        }
        self.timeline.schedule(track);
    }
}

#[cfg(test)]
mod tests {
    use super::{BARS_TRACK, RecordingSurface};
    use crate::surface::{BarTransition, RenderSurface};
    use crate::tween::ArcDescriptor;
    use foundation::math::Vec2;
    use runtime::EventKind;

    fn bar(end: f64) -> BarTransition {
        BarTransition {
            index: 0,
            category: "A".to_string(),
            value: end,
            arc: Box::new(move |t| ArcDescriptor {
                start_angle: 0.0,
                end_angle: end * t,
                inner_radius: 0.0,
                outer_radius: 1.0,
            }),
            label_position: Box::new(|_| Vec2::default()),
            label_text: Box::new(|t| format!("{t}")),
        }
    }

    #[test]
    fn bars_land_on_final_sample() {
        let mut surface = RecordingSurface::new(10.0);
        surface.animate_bars(vec![bar(2.0)], 1000.0);
        let frames = surface.run_until_idle(100);
        assert_eq!(frames, 11);
        assert_eq!(surface.scene().bars[0].arc.end_angle, 2.0);
        assert_eq!(surface.scene().bar_transitions, 1);
    }

    #[test]
    fn new_bar_animation_interrupts_running_one() {
        let mut surface = RecordingSurface::new(10.0);
        surface.animate_bars(vec![bar(2.0)], 1000.0);
        surface.tick();
        surface.animate_bars(vec![bar(3.0)], 1000.0);
        surface.run_until_idle(100);
        assert_eq!(surface.scene().bars[0].arc.end_angle, 3.0);
        let interrupted = surface
            .events()
            .iter()
            .filter(|e| e.kind == EventKind::TrackInterrupted && e.track == BARS_TRACK)
            .count();
        assert_eq!(interrupted, 1);
    }
}
