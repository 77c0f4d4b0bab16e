use std::collections::VecDeque;

use foundation::time::TimeSpan;
use foundation::tween::Easing;

use crate::event_bus::{EventBus, EventKind};
use crate::frame::Frame;

/// One timed segment of a [`Track`].
///
/// `step` receives eased progress in `[0, 1]`; it is called once per frame
/// while the phase is active and always with exactly `1.0` on its last frame.
pub struct Phase {
    pub duration_s: f64,
    pub easing: Easing,
    pub step: Box<dyn FnMut(f64)>,
}

impl Phase {
    pub fn new(duration_ms: f64, easing: Easing, step: impl FnMut(f64) + 'static) -> Self {
        Self {
            duration_s: duration_ms / 1000.0,
            easing,
            step: Box::new(step),
        }
    }
}

/// A named chain of phases run back to back.
pub struct Track {
    pub name: String,
    phases: VecDeque<Phase>,
    on_end: Option<Box<dyn FnOnce()>>,
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phases: VecDeque::new(),
            on_end: None,
        }
    }

    pub fn then(mut self, phase: Phase) -> Self {
        self.phases.push_back(phase);
        self
    }

    /// Called once after the last phase completed. Not called when the track
    /// is interrupted.
    pub fn on_end(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_end = Some(Box::new(f));
        self
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }
}

struct Running {
    track: Track,
    started: bool,
    /// Span of the front phase, fixed on the first frame that samples it.
    span: Option<TimeSpan>,
}

impl Running {
    fn advance(&mut self, frame: Frame, bus: &mut EventBus) {
        while let Some(phase) = self.track.phases.front_mut() {
            let span = *self
                .span
                .get_or_insert_with(|| TimeSpan::starting_at(frame.time, phase.duration_s));
            (phase.step)(phase.easing.apply(span.progress(frame.time)));
            if !span.is_finished(frame.time) {
                break;
            }

            self.track.phases.pop_front();
            bus.emit(frame, EventKind::PhaseEnded, self.track.name.clone());
            // The next phase starts where this one ended, not at this frame.
            self.span = self
                .track
                .phases
                .front()
                .map(|next| TimeSpan::starting_at(span.end, next.duration_s));
        }
    }
}

/// Frame-driven sampler for animation tracks.
///
/// Tracks are advanced in scheduling order. Scheduling a track whose name is
/// already running replaces the running one, so a new transition on the same
/// target always starts from whatever was last drawn.
#[derive(Default)]
pub struct Timeline {
    running: Vec<Running>,
    interrupted: Vec<String>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, track: Track) {
        if let Some(pos) = self.running.iter().position(|r| r.track.name == track.name) {
            let old = self.running.remove(pos);
            self.interrupted.push(old.track.name);
        }
        self.running.push(Running {
            track,
            started: false,
            span: None,
        });
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.running.iter().any(|r| r.track.name == name)
    }

    pub fn tick(&mut self, frame: Frame, bus: &mut EventBus) {
        for name in self.interrupted.drain(..) {
            bus.emit(frame, EventKind::TrackInterrupted, name);
        }

        for mut run in std::mem::take(&mut self.running) {
            if !run.started {
                run.started = true;
                bus.emit(frame, EventKind::TrackStarted, run.track.name.clone());
            }
            run.advance(frame, bus);

            if run.track.phases.is_empty() {
                bus.emit(frame, EventKind::TrackEnded, run.track.name.clone());
                if let Some(on_end) = run.track.on_end.take() {
                    on_end();
                }
            } else {
                self.running.push(run);
            }
        }
    }

    /// Ticks from `frame` until every track has finished or `max_frames`
    /// frames have run. Returns the first frame that was not ticked.
    pub fn run_until_idle(
        &mut self,
        mut frame: Frame,
        bus: &mut EventBus,
        max_frames: u64,
    ) -> Frame {
        let mut ticked = 0;
        while !self.is_idle() && ticked < max_frames {
            self.tick(frame, bus);
            frame = frame.next();
            ticked += 1;
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use foundation::tween::Easing;

    use super::{Phase, Timeline, Track};
    use crate::event_bus::{EventBus, EventKind};
    use crate::frame::Frame;

    fn recorder() -> (Rc<RefCell<Vec<f64>>>, impl FnMut(f64) + 'static) {
        let samples = Rc::new(RefCell::new(Vec::new()));
        let sink = samples.clone();
        (samples, move |t| sink.borrow_mut().push(t))
    }

    #[test]
    fn samples_phase_from_zero_to_one() {
        let (samples, step) = recorder();
        let mut timeline = Timeline::new();
        timeline.schedule(Track::new("bars").then(Phase::new(1000.0, Easing::Linear, step)));

        let mut bus = EventBus::new();
        timeline.run_until_idle(Frame::new(0, 0.25), &mut bus, 100);

        assert_eq!(*samples.borrow(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(bus.count(EventKind::TrackStarted, "bars"), 1);
        assert_eq!(bus.count(EventKind::TrackEnded, "bars"), 1);
    }

    #[test]
    fn chained_phases_run_back_to_back() {
        let (first, step_a) = recorder();
        let (second, step_b) = recorder();
        let mut timeline = Timeline::new();
        timeline.schedule(
            Track::new("pan")
                .then(Phase::new(500.0, Easing::Linear, step_a))
                .then(Phase::new(500.0, Easing::Linear, step_b)),
        );

        let mut bus = EventBus::new();
        timeline.run_until_idle(Frame::new(0, 0.25), &mut bus, 100);

        assert_eq!(*first.borrow(), vec![0.0, 0.5, 1.0]);
        // The second phase starts on the frame the first one ends.
        assert_eq!(*second.borrow(), vec![0.0, 0.5, 1.0]);
        assert_eq!(bus.count(EventKind::PhaseEnded, "pan"), 2);
    }

    #[test]
    fn same_name_interrupts_running_track() {
        let (old, step_old) = recorder();
        let (new, step_new) = recorder();
        let ended = Rc::new(RefCell::new(false));
        let flag = ended.clone();

        let mut timeline = Timeline::new();
        timeline.schedule(
            Track::new("bars")
                .then(Phase::new(1000.0, Easing::Linear, step_old))
                .on_end(move || *flag.borrow_mut() = true),
        );
        let mut bus = EventBus::new();
        timeline.tick(Frame::new(0, 0.5), &mut bus);

        timeline.schedule(Track::new("bars").then(Phase::new(1000.0, Easing::Linear, step_new)));
        let last = timeline.run_until_idle(Frame::new(1, 0.5), &mut bus, 100);

        assert_eq!(*old.borrow(), vec![0.0]);
        assert_eq!(*new.borrow(), vec![0.0, 0.5, 1.0]);
        assert!(!*ended.borrow());
        assert_eq!(bus.count(EventKind::TrackInterrupted, "bars"), 1);
        assert_eq!(last.index, 4);
    }

    #[test]
    fn on_end_fires_after_completion() {
        let ended = Rc::new(RefCell::new(0));
        let counter = ended.clone();
        let mut timeline = Timeline::new();
        timeline.schedule(
            Track::new("spin")
                .then(Phase::new(0.0, Easing::Linear, |_| {}))
                .on_end(move || *counter.borrow_mut() += 1),
        );
        let mut bus = EventBus::new();
        timeline.tick(Frame::new(0, 0.1), &mut bus);
        assert_eq!(*ended.borrow(), 1);
        assert!(timeline.is_idle());
    }
}
