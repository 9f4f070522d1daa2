use serde::{Deserialize, Serialize};
use std::fmt;

/// Capacity of the admission buffer.
pub const BUFFER_CAPACITY: usize = 8;

/// Service completions per simulated hour (mean service time of 40 minutes).
pub const SERVICE_RATE: f64 = 1.0 / (40.0 / 60.0);

pub const ARRIVAL_PERIOD_HOURS: f64 = 24.0;
pub const ARRIVAL_RATE_OFFSET: f64 = 0.45;
pub const ARRIVAL_RATE_AMPLITUDE: f64 = 0.25;
pub const ARRIVAL_RATE_FLOOR: f64 = 0.01;

/// Traffic class of a request. Declaration order is rank order:
/// `Corporate < Premium < Free`, with `Corporate` served first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Corporate,
    Premium,
    Free,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Corporate, Priority::Premium, Priority::Free];

    /// Occupants this priority may evict from a full buffer, cheapest first.
    pub fn eviction_candidates(self) -> impl Iterator<Item = Priority> {
        Priority::ALL
            .into_iter()
            .rev()
            .take_while(move |candidate| *candidate > self)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Corporate => "corporate",
            Priority::Premium => "premium",
            Priority::Free => "free",
        };
        write!(f, "{}", label)
    }
}

/// One value per priority class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PriorityCounts<T> {
    pub corporate: T,
    pub premium: T,
    pub free: T,
}

impl<T> PriorityCounts<T> {
    pub fn get(&self, priority: Priority) -> &T {
        match priority {
            Priority::Corporate => &self.corporate,
            Priority::Premium => &self.premium,
            Priority::Free => &self.free,
        }
    }

    pub fn get_mut(&mut self, priority: Priority) -> &mut T {
        match priority {
            Priority::Corporate => &mut self.corporate,
            Priority::Premium => &mut self.premium,
            Priority::Free => &mut self.free,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Priority, &T) -> U) -> PriorityCounts<U> {
        PriorityCounts {
            corporate: f(Priority::Corporate, &self.corporate),
            premium: f(Priority::Premium, &self.premium),
            free: f(Priority::Free, &self.free),
        }
    }
}

impl PriorityCounts<u64> {
    pub fn total(&self) -> u64 {
        self.corporate + self.premium + self.free
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimConfig {
    pub corporate_sources: usize,
    pub premium_sources: usize,
    pub free_sources: usize,
    pub servers: usize,
    /// Served-request target; also caps how many requests are generated.
    pub requests: u64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn new(
        corporate_sources: usize,
        premium_sources: usize,
        free_sources: usize,
        servers: usize,
        requests: u64,
    ) -> Self {
        Self {
            corporate_sources,
            premium_sources,
            free_sources,
            servers,
            requests,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn source_count(&self, priority: Priority) -> usize {
        match priority {
            Priority::Corporate => self.corporate_sources,
            Priority::Premium => self.premium_sources,
            Priority::Free => self.free_sources,
        }
    }

    /// Priorities of every configured source, in source-index order.
    pub fn source_priorities(&self) -> Vec<Priority> {
        Priority::ALL
            .iter()
            .flat_map(|priority| std::iter::repeat(*priority).take(self.source_count(*priority)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_rank_corporate_first() {
        let mut priorities = vec![Priority::Free, Priority::Corporate, Priority::Premium];
        priorities.sort();
        assert_eq!(
            priorities,
            vec![Priority::Corporate, Priority::Premium, Priority::Free]
        );
    }

    #[test]
    fn eviction_candidates_are_strictly_lower_priorities() {
        let corporate: Vec<Priority> = Priority::Corporate.eviction_candidates().collect();
        assert_eq!(corporate, vec![Priority::Free, Priority::Premium]);

        let premium: Vec<Priority> = Priority::Premium.eviction_candidates().collect();
        assert_eq!(premium, vec![Priority::Free]);

        assert_eq!(Priority::Free.eviction_candidates().count(), 0);
    }

    #[test]
    fn source_priorities_follow_class_order() {
        let config = SimConfig::new(1, 2, 1, 1, 10);
        assert_eq!(
            config.source_priorities(),
            vec![
                Priority::Corporate,
                Priority::Premium,
                Priority::Premium,
                Priority::Free
            ]
        );
    }

    #[test]
    fn priority_counts_total_and_index() {
        let mut counts = PriorityCounts::<u64>::default();
        *counts.get_mut(Priority::Premium) += 2;
        *counts.get_mut(Priority::Free) += 1;
        assert_eq!(*counts.get(Priority::Premium), 2);
        assert_eq!(counts.total(), 3);
    }
}
