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


use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use easel_bench::{
    compare_results, BenchConfig, BenchmarkHarness, BenchmarkScenario, OperationKind,
};
use easel_core::host::{Clock, HostPorts};
use easel_telemetry::{MonitorConfig, PerformanceMonitor};

/// A clock that moves forward one millisecond every time it is read.
#[derive(Debug, Default)]
struct TickingClock {
    ticks: AtomicU64,
}

impl Clock for TickingClock {
    fn now_ms(&self) -> f64 {
        self.ticks.fetch_add(1, Ordering::SeqCst) as f64
    }
}

fn harness() -> BenchmarkHarness {
    let host = HostPorts::headless().with_clock(Arc::new(TickingClock::default()));
    let monitor = Arc::new(PerformanceMonitor::new(
        host.clock.clone(),
        MonitorConfig::without_thresholds(),
    ));
    let config = BenchConfig {
        seed: Some(2024),
        ..BenchConfig::default()
    };
    BenchmarkHarness::new(monitor, &host, config)
}

#[tokio::test]
async fn render_scenario_end_to_end() {
    let harness = harness();
    harness.add_scenario(
        BenchmarkScenario::new("Small canvas", 50).with_operation(OperationKind::Render, 5),
    );

    let results = harness.run_benchmarks().await.unwrap();
    let result = &results[0];
    let render = result.metrics["benchmark.render"];

    assert_eq!(result.scenario, "Small canvas");
    assert_eq!(render.count, 5);
    assert!(render.min <= render.average && render.average <= render.max);
    assert!(result.total_duration >= render.total);
}

#[tokio::test]
async fn comparing_two_runs_reports_every_shared_metric() {
    let harness = harness();
    harness.add_scenario(
        BenchmarkScenario::new("baseline", 100)
            .with_operation(OperationKind::Render, 3)
            .with_operation(OperationKind::Collaboration, 3),
    );
    harness.add_scenario(
        BenchmarkScenario::new("optimized", 20).with_operation(OperationKind::Render, 3),
    );

    let results = harness.run_benchmarks().await.unwrap();
    let diff = compare_results(&results[0], &results[1]);

    assert!(diff.contains_key("totalDuration"));
    assert!(diff.contains_key("benchmark.render.average"));
    assert!(diff.contains_key("benchmark.render.total"));
    assert!(!diff.contains_key("benchmark.collaboration.average"));
    assert!(!diff.contains_key("fps"));
    // Every span costs exactly one tick, so per-iteration averages match.
    assert_relative_eq!(diff["benchmark.render.average"], 0.0);
}

#[tokio::test]
async fn results_serialize_for_export() {
    let harness = harness();
    harness.add_scenario(
        BenchmarkScenario::new("export", 10).with_operation(OperationKind::Interaction, 2),
    );

    let results = harness.run_benchmarks().await.unwrap();
    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json[0]["scenario"], "export");
    assert_eq!(json[0]["metrics"]["benchmark.interaction"]["count"], 2);
}
