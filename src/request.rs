use serde::Serialize;

use crate::models::Priority;

/// A single request. Identity, class and arrival are fixed at creation;
/// only the queueing and service timestamps move afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Request {
    pub id: u64,
    pub priority: Priority,
    pub arrival_time: f64,
    pub source_index: usize,
    buffer_enter_time: f64,
    start_service_time: Option<f64>,
}

impl Request {
    pub fn new(id: u64, priority: Priority, arrival_time: f64, source_index: usize) -> Self {
        Self {
            id,
            priority,
            arrival_time,
            source_index,
            buffer_enter_time: arrival_time,
            start_service_time: None,
        }
    }

    pub fn buffer_enter_time(&self) -> f64 {
        self.buffer_enter_time
    }

    pub fn set_buffer_enter_time(&mut self, time: f64) {
        self.buffer_enter_time = time;
    }

    pub fn start_service_time(&self) -> Option<f64> {
        self.start_service_time
    }

    pub fn set_start_service_time(&mut self, time: f64) {
        self.start_service_time = Some(time);
    }

    /// Time spent buffered before service, zero until service starts.
    pub fn wait_time(&self) -> f64 {
        self.start_service_time
            .map(|start| start - self.buffer_enter_time)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_enters_buffer_at_arrival() {
        let request = Request::new(7, Priority::Premium, 1.25, 3);
        assert_eq!(request.buffer_enter_time(), 1.25);
        assert_eq!(request.start_service_time(), None);
        assert_eq!(request.wait_time(), 0.0);
    }

    #[test]
    fn wait_time_measures_from_buffer_entry() {
        let mut request = Request::new(1, Priority::Free, 2.0, 0);
        request.set_start_service_time(2.5);
        assert_eq!(request.wait_time(), 0.5);
    }
}
