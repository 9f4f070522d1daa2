use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::buffer::{Admission, Buffer};
use crate::clock::{format_time, EventQueue};
use crate::device::Device;
use crate::error::{Error, Result};
use crate::events::{Event, EventKind};
use crate::models::{Priority, SimConfig};
use crate::request::Request;
use crate::source::Source;
use crate::state::{Counters, DeviceSummary, SimulationResult, StopReason, WaitSummary};

/// The controller: owns the scheduler, buffer, sources and devices, and
/// every counter. All state changes happen while handling the current event.
pub struct SimulationEngine {
    pub config: SimConfig,
    pub queue: EventQueue,
    pub buffer: Buffer,
    pub sources: Vec<Source>,
    pub devices: Vec<Device>,
    pub counters: Counters,
    next_request_id: u64,
    last_event_time: f64,
    dropped_arrivals: usize,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Result<Self> {
        validate_config(&config)?;

        let mut seeder = StreamSeeder::new(config.seed);
        let sources = config
            .source_priorities()
            .into_iter()
            .enumerate()
            .map(|(index, priority)| Source::new(priority, index, seeder.next_rng()))
            .collect();
        let devices = (0..config.servers)
            .map(|id| Device::new(id, seeder.next_rng()))
            .collect();

        Ok(Self {
            config,
            queue: EventQueue::new(),
            buffer: Buffer::new(),
            sources,
            devices,
            counters: Counters::default(),
            next_request_id: 0,
            last_event_time: 0.0,
            dropped_arrivals: 0,
        })
    }

    pub fn run(&mut self) -> SimulationResult {
        info!(
            corporate = self.config.corporate_sources,
            premium = self.config.premium_sources,
            free = self.config.free_sources,
            servers = self.config.servers,
            requests = self.config.requests,
            seed = ?self.config.seed,
            "starting simulation"
        );

        self.init_requests();
        let stop_reason = loop {
            if self.counters.served >= self.config.requests {
                break StopReason::TargetReached;
            }
            if self.step().is_none() {
                debug!("no more events");
                break StopReason::QueueExhausted;
            }
        };
        if stop_reason == StopReason::TargetReached {
            self.drain();
        }

        let result = self.result(stop_reason);
        info!(
            generated = result.generated,
            served = result.served,
            rejected = result.rejected,
            elapsed_hours = result.elapsed_hours,
            %stop_reason,
            "simulation finished"
        );
        result
    }

    /// Schedules the first arrival of every source, starting at time zero.
    pub fn init_requests(&mut self) {
        for index in 0..self.sources.len() {
            if !self.schedule_next_arrival(index, 0.0) {
                break;
            }
        }
    }

    /// Processes the earliest pending event, returning its kind, or `None`
    /// once the queue is exhausted.
    pub fn step(&mut self) -> Option<EventKind> {
        let scheduled = self.queue.pop()?;
        let now = scheduled.time;
        self.last_event_time = self.last_event_time.max(now);

        let kind = scheduled.event.kind();
        match scheduled.event {
            Event::Arrival(request) => self.handle_arrival(request, now),
            Event::Completion {
                server_id,
                request_id,
            } => self.handle_completion(server_id, request_id, now),
        }
        Some(kind)
    }

    /// Offers `request` to the buffer and charges any rejection or eviction.
    pub fn admit(&mut self, request: Request) -> bool {
        let request_id = request.id;
        let priority = request.priority;
        let outcome = self.buffer.admit(request);

        match &outcome {
            Admission::Admitted => debug!(
                request = request_id,
                %priority,
                buffered = self.buffer.len(),
                "request buffered"
            ),
            Admission::Evicted(evicted) => debug!(
                request = request_id,
                %priority,
                evicted = evicted.id,
                evicted_priority = %evicted.priority,
                "evicted buffered request"
            ),
            Admission::Rejected(_) => debug!(request = request_id, %priority, "request rejected"),
        }

        if let Some(charged) = outcome.rejected_priority() {
            self.counters.rejected += 1;
            *self.counters.rejected_by_priority.get_mut(charged) += 1;
        }
        outcome.is_admitted()
    }

    /// Feeds every idle device from the buffer until either runs out.
    pub fn dispatch_free_servers(&mut self, now: f64) {
        for device in self.devices.iter_mut().filter(|device| !device.is_busy()) {
            let Some(request) = self.buffer.pop() else {
                break;
            };
            let wait = now - request.buffer_enter_time();
            let priority = request.priority;
            let request_id = request.id;

            let finish_time = device.load(request, now);
            self.counters.served += 1;
            *self.counters.served_by_priority.get_mut(priority) += 1;
            self.counters.total_wait += wait;
            *self.counters.wait_by_priority.get_mut(priority) += wait;

            self.queue.push(
                finish_time,
                Event::Completion {
                    server_id: device.id,
                    request_id,
                },
            );
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.last_event_time
    }

    fn handle_arrival(&mut self, request: Request, now: f64) {
        self.counters.arrivals_processed += 1;
        let source_index = request.source_index;
        debug!(
            request = request.id,
            priority = %request.priority,
            at = %format_time(now),
            "request arrived"
        );

        if self.admit(request) {
            self.dispatch_free_servers(now);
        }
        self.schedule_next_arrival(source_index, now);
    }

    fn handle_completion(&mut self, server_id: usize, request_id: u64, now: f64) {
        self.finish_service(server_id, request_id, now);
        self.dispatch_free_servers(now);
    }

    fn finish_service(&mut self, server_id: usize, request_id: u64, now: f64) {
        self.counters.completions_processed += 1;
        match self.devices.get_mut(server_id) {
            Some(device) => {
                device.release(now);
            }
            None => debug!(server_id, request = request_id, "completion for unknown device"),
        }
    }

    /// Lets in-service requests finish once the target is met. Pending
    /// arrivals are dropped and nothing new is dispatched.
    fn drain(&mut self) {
        self.dropped_arrivals += self.queue.count(EventKind::Arrival);
        self.queue.retain_kind(EventKind::Completion);

        while let Some(scheduled) = self.queue.pop() {
            self.last_event_time = self.last_event_time.max(scheduled.time);
            if let Event::Completion {
                server_id,
                request_id,
            } = scheduled.event
            {
                self.finish_service(server_id, request_id, scheduled.time);
            }
        }
    }

    fn schedule_next_arrival(&mut self, source_index: usize, now: f64) -> bool {
        if self.counters.generated >= self.config.requests {
            return false;
        }
        let Some(source) = self.sources.get_mut(source_index) else {
            return false;
        };

        let arrival_time = now + source.next_gap(now);
        self.next_request_id += 1;
        let request = source.create_request(self.next_request_id, arrival_time);
        self.counters.generated += 1;
        self.queue.push(arrival_time, Event::Arrival(request));
        true
    }

    pub fn result(&self, stop_reason: StopReason) -> SimulationResult {
        let elapsed = self.last_event_time;
        let devices = self
            .devices
            .iter()
            .map(|device| {
                let utilization_pct = if elapsed > 0.0 {
                    device.busy_total() / elapsed * 100.0
                } else {
                    0.0
                };
                DeviceSummary {
                    id: device.id,
                    busy_hours: device.busy_total(),
                    utilization_pct: round_to(utilization_pct, 2),
                }
            })
            .collect();

        let served = self.counters.served;
        let avg_hours = if served == 0 {
            0.0
        } else {
            self.counters.total_wait / served as f64
        };
        let by_priority_hours = self.counters.wait_by_priority.map(|priority, total| {
            let count = *self.counters.served_by_priority.get(priority);
            if count == 0 {
                0.0
            } else {
                total / count as f64
            }
        });

        SimulationResult {
            config: self.config.clone(),
            stop_reason,
            generated: self.counters.generated,
            served,
            rejected: self.counters.rejected,
            served_by_priority: self.counters.served_by_priority,
            rejected_by_priority: self.counters.rejected_by_priority,
            wait: WaitSummary {
                avg_hours,
                avg_minutes: avg_hours * 60.0,
                by_priority_hours,
            },
            devices,
            elapsed_hours: elapsed,
            buffered: self.buffer.len(),
            in_service: self.devices.iter().filter(|device| device.is_busy()).count(),
            pending_arrivals: self.dropped_arrivals + self.queue.count(EventKind::Arrival),
            arrivals_processed: self.counters.arrivals_processed,
            completions_processed: self.counters.completions_processed,
        }
    }
}

pub fn run_simulation(config: &SimConfig) -> Result<SimulationResult> {
    let mut engine = SimulationEngine::new(config.clone())?;
    Ok(engine.run())
}

fn validate_config(config: &SimConfig) -> Result<()> {
    let sources: usize = Priority::ALL
        .iter()
        .map(|priority| config.source_count(*priority))
        .sum();
    if sources == 0 {
        return Err(Error::NoSources);
    }
    if config.servers == 0 {
        return Err(Error::ServersZero);
    }
    if config.requests == 0 {
        return Err(Error::RequestsZero);
    }
    Ok(())
}

/// Hands out one independent random stream per source and device. Streams
/// come from OS entropy unless a seed is configured.
struct StreamSeeder {
    master: Option<StdRng>,
}

impl StreamSeeder {
    fn new(seed: Option<u64>) -> Self {
        Self {
            master: seed.map(StdRng::seed_from_u64),
        }
    }

    fn next_rng(&mut self) -> StdRng {
        match self.master.as_mut() {
            Some(master) => StdRng::seed_from_u64(master.gen()),
            None => StdRng::from_entropy(),
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}
