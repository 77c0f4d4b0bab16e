use crate::frame::Frame;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    TrackStarted,
    PhaseEnded,
    TrackEnded,
    /// A running track was replaced by a new one with the same name.
    TrackInterrupted,
}

/// Timeline event, recorded for traceability and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: EventKind,
    /// Name of the track the event belongs to.
    pub track: String,
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, frame: Frame, kind: EventKind, track: impl Into<String>) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
            track: track.into(),
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn count(&self, kind: EventKind, track: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == kind && e.track == track)
            .count()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
