// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Benchmark results.

use std::collections::BTreeMap;
use std::fmt::Write;

use easel_core::telemetry::MetricSpan;
use serde::{Deserialize, Serialize};

/// Aggregate of every closed span sharing one name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    /// Mean duration.
    pub average: f64,
    /// Shortest duration.
    pub min: f64,
    /// Longest duration.
    pub max: f64,
    /// Sum of durations.
    pub total: f64,
    /// Number of spans.
    pub count: usize,
}

impl MetricStats {
    /// Aggregates `durations`; `None` when there are none.
    pub fn from_durations(durations: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut stats: Option<Self> = None;
        for duration in durations {
            let entry = stats.get_or_insert(Self {
                average: 0.0,
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
                total: 0.0,
                count: 0,
            });
            entry.min = entry.min.min(duration);
            entry.max = entry.max.max(duration);
            entry.total += duration;
            entry.count += 1;
        }
        stats.map(|mut stats| {
            stats.average = stats.total / stats.count as f64;
            stats
        })
    }

    /// Groups closed spans by name and aggregates each group.
    pub fn from_spans<'a>(spans: impl IntoIterator<Item = &'a MetricSpan>) -> BTreeMap<String, Self> {
        let mut grouped: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for span in spans {
            if let Some(duration) = span.duration {
                grouped.entry(span.name.clone()).or_default().push(duration);
            }
        }
        grouped
            .into_iter()
            .filter_map(|(name, durations)| Some((name, Self::from_durations(durations)?)))
            .collect()
    }
}

/// Process memory before and after a scenario, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryUsage {
    /// Reading before the workload was generated.
    pub before: u64,
    /// Reading after the last operation.
    pub after: u64,
    /// `after - before`; negative when memory was released.
    pub diff: i64,
}

impl MemoryUsage {
    /// Builds a usage record from two readings.
    pub fn new(before: u64, after: u64) -> Self {
        let diff = i64::try_from(after).unwrap_or(i64::MAX) - i64::try_from(before).unwrap_or(i64::MAX);
        Self { before, after, diff }
    }
}

/// The outcome of running one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// Name of the scenario.
    pub scenario: String,
    /// Per-span-name statistics.
    pub metrics: BTreeMap<String, MetricStats>,
    /// Wall time of the whole scenario, in milliseconds.
    pub total_duration: f64,
    /// Mean of the FPS readings taken during the run.
    pub fps: Option<f64>,
    /// Memory readings, when the host reports them.
    pub memory_usage: Option<MemoryUsage>,
}

impl BenchmarkResult {
    /// One-line human readable summary.
    pub fn summary(&self) -> String {
        let mut line = format!("{}: {:.2}ms total", self.scenario, self.total_duration);
        if let Some(fps) = self.fps {
            let _ = write!(line, ", {fps:.1} fps");
        }
        if let Some(memory) = self.memory_usage {
            let _ = write!(line, ", {:+.2} MiB", memory.diff as f64 / (1024.0 * 1024.0));
        }
        for (name, stats) in &self.metrics {
            let _ = write!(line, ", {name} avg {:.3}ms x{}", stats.average, stats.count);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use easel_core::telemetry::Metadata;

    fn closed(name: &str, start: f64, end: f64) -> MetricSpan {
        let mut span = MetricSpan::open(name, start, Metadata::new());
        span.close(end);
        span
    }

    #[test]
    fn stats_cover_min_max_total() {
        let stats = MetricStats::from_durations([2.0, 6.0, 4.0]).unwrap();
        assert_eq!(stats.count, 3);
        assert_relative_eq!(stats.min, 2.0);
        assert_relative_eq!(stats.max, 6.0);
        assert_relative_eq!(stats.total, 12.0);
        assert_relative_eq!(stats.average, 4.0);
        assert_eq!(MetricStats::from_durations([]), None);
    }

    #[test]
    fn spans_are_grouped_by_name_and_open_ones_skipped() {
        let spans = vec![
            closed("benchmark.render", 0.0, 1.0),
            closed("benchmark.render", 1.0, 4.0),
            closed("benchmark.update", 4.0, 5.0),
            MetricSpan::open("benchmark.update", 5.0, Metadata::new()),
        ];

        let metrics = MetricStats::from_spans(&spans);
        assert_eq!(metrics["benchmark.render"].count, 2);
        assert_relative_eq!(metrics["benchmark.render"].average, 2.0);
        assert_eq!(metrics["benchmark.update"].count, 1);
    }

    #[test]
    fn memory_diff_can_be_negative() {
        assert_eq!(MemoryUsage::new(1000, 400).diff, -600);
        assert_eq!(MemoryUsage::new(400, 1000).diff, 600);
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = BenchmarkResult {
            scenario: "Small".to_string(),
            metrics: BTreeMap::new(),
            total_duration: 12.5,
            fps: Some(59.9),
            memory_usage: None,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["totalDuration"], 12.5);
        assert_eq!(value["fps"], 59.9);
        assert!(value["memoryUsage"].is_null());
    }

    #[test]
    fn summary_mentions_the_scenario_and_fps() {
        let result = BenchmarkResult {
            scenario: "Small".to_string(),
            metrics: BTreeMap::new(),
            total_duration: 12.5,
            fps: Some(60.0),
            memory_usage: None,
        };
        assert_eq!(result.summary(), "Small: 12.50ms total, 60.0 fps");
    }
}
