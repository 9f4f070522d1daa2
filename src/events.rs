use std::cmp::Ordering;

use crate::request::Request;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Arrival(Request),
    Completion { server_id: usize, request_id: u64 },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Arrival(_) => EventKind::Arrival,
            Event::Completion { .. } => EventKind::Completion,
        }
    }

    fn priority(&self) -> u8 {
        match self {
            Event::Completion { .. } => 0,
            Event::Arrival(_) => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventKind {
    Arrival,
    Completion,
}

/// An event stamped with its simulated time (hours) and the order in which it
/// was scheduled. Equal times resolve completions first, then scheduling order.
#[derive(Clone, Debug)]
pub struct ScheduledEvent {
    pub time: f64,
    pub seq: u64,
    pub event: Event,
}

impl ScheduledEvent {
    pub fn new(time: f64, seq: u64, event: Event) -> Self {
        Self { time, seq, event }
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledEvent {}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .total_cmp(&other.time)
            .then_with(|| self.event.priority().cmp(&other.event.priority()))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn arrival(time: f64, seq: u64) -> ScheduledEvent {
        ScheduledEvent::new(
            time,
            seq,
            Event::Arrival(Request::new(seq, Priority::Free, time, 0)),
        )
    }

    fn completion(time: f64, seq: u64) -> ScheduledEvent {
        ScheduledEvent::new(
            time,
            seq,
            Event::Completion {
                server_id: 0,
                request_id: seq,
            },
        )
    }

    #[test]
    fn earlier_time_orders_first() {
        assert!(arrival(1.0, 5) < completion(2.0, 1));
    }

    #[test]
    fn completion_precedes_arrival_at_equal_time() {
        assert!(completion(3.0, 9) < arrival(3.0, 1));
    }

    #[test]
    fn scheduling_order_breaks_remaining_ties() {
        assert!(arrival(3.0, 1) < arrival(3.0, 2));
        assert_eq!(arrival(3.0, 1).event.kind(), EventKind::Arrival);
    }
}
