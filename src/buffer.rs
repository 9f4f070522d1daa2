use std::collections::VecDeque;

use crate::models::{Priority, BUFFER_CAPACITY};
use crate::request::Request;

/// Outcome of offering a request to the buffer.
#[derive(Debug, PartialEq)]
pub enum Admission {
    Admitted,
    /// Admitted by evicting a lower-priority occupant, handed back here.
    Evicted(Request),
    /// Buffer full with no eviction candidate; the incoming request is handed back.
    Rejected(Request),
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        !matches!(self, Admission::Rejected(_))
    }

    /// The priority charged with a rejection, if any: the evicted occupant's
    /// on eviction, the incoming request's on outright rejection.
    pub fn rejected_priority(&self) -> Option<Priority> {
        match self {
            Admission::Admitted => None,
            Admission::Evicted(request) | Admission::Rejected(request) => Some(request.priority),
        }
    }
}

/// Bounded holding area ordered by priority, then by arrival time.
#[derive(Debug)]
pub struct Buffer {
    requests: VecDeque<Request>,
    capacity: usize,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    pub fn new() -> Self {
        Self::with_capacity(BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            requests: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn admit(&mut self, mut request: Request) -> Admission {
        if self.requests.len() < self.capacity {
            request.set_buffer_enter_time(request.arrival_time);
            self.insert_ordered(request);
            return Admission::Admitted;
        }

        let victim = request
            .priority
            .eviction_candidates()
            .find_map(|candidate| self.position_of(candidate));

        match victim.and_then(|idx| self.requests.remove(idx)) {
            Some(evicted) => {
                request.set_buffer_enter_time(request.arrival_time);
                self.insert_ordered(request);
                Admission::Evicted(evicted)
            }
            None => Admission::Rejected(request),
        }
    }

    pub fn pop(&mut self) -> Option<Request> {
        self.requests.pop_front()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.requests.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Request> {
        self.requests.iter()
    }

    pub fn count(&self, priority: Priority) -> usize {
        self.requests
            .iter()
            .filter(|request| request.priority == priority)
            .count()
    }

    fn position_of(&self, priority: Priority) -> Option<usize> {
        self.requests
            .iter()
            .position(|request| request.priority == priority)
    }

    fn insert_ordered(&mut self, request: Request) {
        let idx = self.requests.partition_point(|resident| {
            resident.priority < request.priority
                || (resident.priority == request.priority
                    && resident.arrival_time <= request.arrival_time)
        });
        self.requests.insert(idx, request);
    }
}
