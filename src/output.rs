use std::fmt::Write;

use crate::clock::format_time;
use crate::error::{Error, Result};
use crate::models::Priority;
use crate::state::SimulationResult;

pub trait Formatter {
    fn write(&self, result: &SimulationResult) -> Result<String>;
}

/// The full end-of-run report.
pub struct HumanFormatter;

/// Counters only.
pub struct SummaryFormatter;

pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write(&self, result: &SimulationResult) -> Result<String> {
        let mut out = String::new();
        write_counts(&mut out, result);

        let wait = &result.wait;
        let _ = writeln!(
            out,
            "Average waiting time (hours): {:.4} (~{:.2} min)",
            wait.avg_hours, wait.avg_minutes
        );
        for priority in Priority::ALL {
            let _ = writeln!(
                out,
                "  {:<10} {:.2} min",
                label(priority),
                wait.by_priority_hours.get(priority) * 60.0
            );
        }

        let _ = writeln!(out, "\nDevices utilization:");
        for device in &result.devices {
            let _ = writeln!(
                out,
                "  Device {}: busy {:.4} h, load {:.2} %",
                device.id, device.busy_hours, device.utilization_pct
            );
        }

        let _ = writeln!(
            out,
            "\nTotal simulation time: {:.4} hours (clock {})",
            result.elapsed_hours,
            format_time(result.elapsed_hours)
        );
        let _ = writeln!(out, "Stop reason: {}", result.stop_reason);
        Ok(out)
    }
}

impl Formatter for SummaryFormatter {
    fn write(&self, result: &SimulationResult) -> Result<String> {
        let mut out = String::new();
        write_counts(&mut out, result);
        Ok(out)
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, result: &SimulationResult) -> Result<String> {
        let mut out =
            serde_json::to_string_pretty(result).map_err(|err| Error::Output(err.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}

fn write_counts(out: &mut String, result: &SimulationResult) {
    let _ = writeln!(out, "--- Final statistics ---");
    let _ = writeln!(out, "Total requests generated:  {}", result.generated);
    let _ = writeln!(out, "Total requests served:     {}", result.served);
    let _ = writeln!(out, "Total rejected requests:   {}", result.rejected);
    for priority in Priority::ALL {
        let _ = writeln!(
            out,
            "Rejected {:<10} {}",
            format!("{}:", label(priority)),
            result.rejected_by_priority.get(priority)
        );
    }
}

fn label(priority: Priority) -> &'static str {
    match priority {
        Priority::Corporate => "Corporate",
        Priority::Premium => "Premium",
        Priority::Free => "Free",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriorityCounts, SimConfig};
    use crate::state::{DeviceSummary, StopReason, WaitSummary};

    fn sample_result() -> SimulationResult {
        SimulationResult {
            config: SimConfig::new(1, 1, 1, 1, 4),
            stop_reason: StopReason::TargetReached,
            generated: 6,
            served: 4,
            rejected: 1,
            served_by_priority: PriorityCounts {
                corporate: 2,
                premium: 1,
                free: 1,
            },
            rejected_by_priority: PriorityCounts {
                corporate: 0,
                premium: 0,
                free: 1,
            },
            wait: WaitSummary {
                avg_hours: 0.5,
                avg_minutes: 30.0,
                by_priority_hours: PriorityCounts {
                    corporate: 0.25,
                    premium: 0.5,
                    free: 1.0,
                },
            },
            devices: vec![DeviceSummary {
                id: 0,
                busy_hours: 2.5,
                utilization_pct: 50.0,
            }],
            elapsed_hours: 5.0,
            buffered: 1,
            in_service: 0,
            pending_arrivals: 0,
            arrivals_processed: 5,
            completions_processed: 4,
        }
    }

    #[test]
    fn summary_lists_counters() {
        let out = SummaryFormatter.write(&sample_result()).unwrap();
        let expected = concat!(
            "--- Final statistics ---\n",
            "Total requests generated:  6\n",
            "Total requests served:     4\n",
            "Total rejected requests:   1\n",
            "Rejected Corporate: 0\n",
            "Rejected Premium:   0\n",
            "Rejected Free:      1\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn human_report_includes_wait_devices_and_clock() {
        let out = HumanFormatter.write(&sample_result()).unwrap();
        assert!(out.contains("Average waiting time (hours): 0.5000 (~30.00 min)\n"));
        assert!(out.contains("  Device 0: busy 2.5000 h, load 50.00 %\n"));
        assert!(out.contains("Total simulation time: 5.0000 hours (clock 05:00)\n"));
        assert!(out.contains("Stop reason: target-reached\n"));
    }

    #[test]
    fn json_output_uses_kebab_case_enums() {
        let out = JsonFormatter.write(&sample_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["stop_reason"], "target-reached");
        assert_eq!(value["rejected_by_priority"]["free"], 1);
        assert_eq!(value["devices"][0]["utilization_pct"], 50.0);
    }
}
