use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::Exp1;
use std::f64::consts::PI;

use crate::models::{
    Priority, ARRIVAL_PERIOD_HOURS, ARRIVAL_RATE_AMPLITUDE, ARRIVAL_RATE_FLOOR,
    ARRIVAL_RATE_OFFSET,
};
use crate::request::Request;

/// Instantaneous arrival rate (requests per hour) at simulated time `hours`.
pub fn arrival_rate(hours: f64) -> f64 {
    let phase = 2.0 * PI * hours / ARRIVAL_PERIOD_HOURS;
    let rate = ARRIVAL_RATE_OFFSET + ARRIVAL_RATE_AMPLITUDE * phase.sin();
    if rate <= 0.0 {
        ARRIVAL_RATE_FLOOR
    } else {
        rate
    }
}

/// Traffic generator for one priority class.
///
/// Inter-arrival gaps are exponential with the rate taken at the current
/// time only; the rate is not integrated over the gap.
#[derive(Debug)]
pub struct Source {
    pub priority: Priority,
    pub index: usize,
    rng: StdRng,
}

impl Source {
    pub fn new(priority: Priority, index: usize, rng: StdRng) -> Self {
        Self {
            priority,
            index,
            rng,
        }
    }

    pub fn next_gap(&mut self, now: f64) -> f64 {
        let unit: f64 = self.rng.sample(Exp1);
        unit / arrival_rate(now)
    }

    pub fn create_request(&self, id: u64, arrival_time: f64) -> Request {
        Request::new(id, self.priority, arrival_time, self.index)
    }
}
