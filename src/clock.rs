use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::events::{Event, EventKind, ScheduledEvent};

/// Time-ordered event queue. The current simulated time is the time of the
/// most recently popped event.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<ScheduledEvent>>,
    next_seq: u64,
    now: f64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: f64, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(ScheduledEvent::new(time, seq, event)));
    }

    pub fn pop(&mut self) -> Option<ScheduledEvent> {
        let Reverse(scheduled) = self.heap.pop()?;
        self.now = scheduled.time;
        Some(scheduled)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.heap
            .iter()
            .filter(|Reverse(scheduled)| scheduled.event.kind() == kind)
            .count()
    }

    /// Discards every pending event of `kind`.
    pub fn retain_kind(&mut self, kind: EventKind) {
        self.heap
            .retain(|Reverse(scheduled)| scheduled.event.kind() == kind);
    }
}

/// Renders simulated hours as `HH:MM` on a 24-hour wrap.
pub fn format_time(hours: f64) -> String {
    let total_minutes = (hours * 60.0).floor() as i64;
    let h = (total_minutes / 60) % 24;
    let m = total_minutes % 60;
    format!("{:02}:{:02}", h, m)
}
