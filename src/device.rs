use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::Exp1;
use tracing::debug;

use crate::clock::format_time;
use crate::models::SERVICE_RATE;
use crate::request::Request;

/// One single-slot server of the pool.
#[derive(Debug)]
pub struct Device {
    pub id: usize,
    busy: bool,
    finish_time: f64,
    start_busy_time: f64,
    busy_total: f64,
    current: Option<Request>,
    rng: StdRng,
}

impl Device {
    pub fn new(id: usize, rng: StdRng) -> Self {
        Self {
            id,
            busy: false,
            finish_time: 0.0,
            start_busy_time: 0.0,
            busy_total: 0.0,
            current: None,
            rng,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn finish_time(&self) -> f64 {
        self.finish_time
    }

    pub fn busy_total(&self) -> f64 {
        self.busy_total
    }

    pub fn current(&self) -> Option<&Request> {
        self.current.as_ref()
    }

    /// Starts serving `request` at `now` and returns the completion time.
    pub fn load(&mut self, mut request: Request, now: f64) -> f64 {
        let unit: f64 = self.rng.sample(Exp1);
        let service_time = unit / SERVICE_RATE;

        request.set_start_service_time(now);
        self.busy = true;
        self.start_busy_time = now;
        self.finish_time = now + service_time;

        debug!(
            device = self.id,
            request = request.id,
            started = %format_time(now),
            finish = %format_time(self.finish_time),
            service_min = (service_time * 60.0).round() as i64,
            "service started"
        );

        self.current = Some(request);
        self.finish_time
    }

    /// Ends the current service at `now`, returning the request that was served.
    pub fn release(&mut self, now: f64) -> Option<Request> {
        if !self.busy {
            return None;
        }
        self.busy_total += now - self.start_busy_time;
        self.busy = false;

        let request = self.current.take();
        if let Some(request) = &request {
            debug!(
                device = self.id,
                request = request.id,
                finished = %format_time(now),
                "service finished"
            );
        }
        request
    }
}
