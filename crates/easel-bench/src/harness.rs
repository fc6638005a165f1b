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


//! The benchmark harness.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use easel_core::host::{Clock, FrameScheduler, HostPorts, MemoryProbe};
use easel_core::utils::lock;
use easel_telemetry::PerformanceMonitor;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::BenchConfig;
use crate::error::BenchmarkError;
use crate::fps::FpsSampler;
use crate::result::{BenchmarkResult, MemoryUsage, MetricStats};
use crate::scenario::BenchmarkScenario;
use crate::workload::CanvasWorkload;

/// Holds the running flag for the lifetime of one run.
struct RunGuard<'a> {
    running: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(running: &'a AtomicBool) -> Result<Self, BenchmarkError> {
        running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| BenchmarkError::AlreadyRunning)?;
        Ok(Self { running })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

/// Runs synthetic scenarios against a [`PerformanceMonitor`] and collects results.
///
/// Scenarios run one after another, in registration order. Each iteration
/// of an operation is recorded as a `benchmark.<kind>` span, and the harness
/// yields to the next host frame every few iterations so frame-driven
/// services (and the FPS sampler) keep running during a scenario.
#[derive(Debug)]
pub struct BenchmarkHarness {
    monitor: Arc<PerformanceMonitor>,
    clock: Option<Arc<dyn Clock>>,
    scheduler: Option<Arc<dyn FrameScheduler>>,
    memory: Option<Arc<dyn MemoryProbe>>,
    config: BenchConfig,
    scenarios: Mutex<Vec<BenchmarkScenario>>,
    results: Mutex<Vec<BenchmarkResult>>,
    running: AtomicBool,
}

impl BenchmarkHarness {
    /// Creates a harness recording into `monitor` and driven by the ports of `host`.
    pub fn new(monitor: Arc<PerformanceMonitor>, host: &HostPorts, config: BenchConfig) -> Self {
        Self {
            monitor,
            clock: host.clock.clone(),
            scheduler: host.scheduler.clone(),
            memory: host.memory.clone(),
            config,
            scenarios: Mutex::new(Vec::new()),
            results: Mutex::new(Vec::new()),
            running: AtomicBool::new(false),
        }
    }

    /// Appends a scenario. Duplicates are kept and run twice.
    pub fn add_scenario(&self, scenario: BenchmarkScenario) {
        lock(&self.scenarios).push(scenario);
    }

    /// The registered scenarios, in order.
    pub fn scenarios(&self) -> Vec<BenchmarkScenario> {
        lock(&self.scenarios).clone()
    }

    /// Results of the last completed run.
    pub fn results(&self) -> Vec<BenchmarkResult> {
        lock(&self.results).clone()
    }

    /// Returns `true` while a run is in progress.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Runs every registered scenario and replaces the stored results.
    ///
    /// Fails with [`BenchmarkError::AlreadyRunning`] if another run has not
    /// finished. The running flag is cleared however the run ends, including
    /// when the returned future is dropped.
    pub async fn run_benchmarks(&self) -> Result<Vec<BenchmarkResult>, BenchmarkError> {
        let _guard = RunGuard::acquire(&self.running)?;
        let scenarios = self.scenarios();
        log::info!("Running {} benchmark scenario(s).", scenarios.len());

        let mut results = Vec::with_capacity(scenarios.len());
        for scenario in &scenarios {
            let result = self.run_scenario(scenario).await?;
            log::info!("{}", result.summary());
            results.push(result);
        }

        *lock(&self.results) = results.clone();
        Ok(results)
    }

    fn now_ms(&self) -> Option<f64> {
        self.clock.as_ref().map(|clock| clock.now_ms())
    }

    fn memory_reading(&self) -> Option<u64> {
        self.memory.as_ref().and_then(|probe| probe.used_bytes())
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    async fn run_scenario(
        &self,
        scenario: &BenchmarkScenario,
    ) -> Result<BenchmarkResult, BenchmarkError> {
        log::debug!(
            "Scenario '{}': {} shape(s), {} iteration(s).",
            scenario.name,
            scenario.shape_count,
            scenario.total_iterations()
        );
        self.monitor.clear_metrics();

        let memory_before = self.memory_reading();
        let sampler = FpsSampler::new(self.scheduler.clone(), self.config.fps_window_ms);
        sampler.start();
        let started = self.now_ms();

        let outcome = self.execute(scenario).await;

        let total_duration = match (started, self.now_ms()) {
            (Some(start), Some(end)) => end - start,
            _ => 0.0,
        };
        sampler.stop();
        outcome?;

        let memory_usage = match (memory_before, self.memory_reading()) {
            (Some(before), Some(after)) => Some(MemoryUsage::new(before, after)),
            _ => None,
        };
        let report = self.monitor.generate_report();

        Ok(BenchmarkResult {
            scenario: scenario.name.clone(),
            metrics: MetricStats::from_spans(&report.metrics),
            total_duration,
            fps: sampler.average(),
            memory_usage,
        })
    }

    async fn execute(&self, scenario: &BenchmarkScenario) -> Result<(), BenchmarkError> {
        let mut workload = CanvasWorkload::generate(scenario.shape_count, self.rng());
        let yield_every = u64::from(self.config.yield_every);
        let mut iterations: u64 = 0;

        for operation in &scenario.operations {
            let metric = operation.kind.metric_name();
            for _ in 0..operation.count {
                self.monitor.measure(metric, || workload.run(operation.kind))?;
                iterations += 1;
                if yield_every > 0 && iterations % yield_every == 0 {
                    self.next_frame().await;
                }
            }
        }
        Ok(())
    }

    /// Waits for the next host frame, or just yields to the runtime when no
    /// frame can be requested.
    async fn next_frame(&self) {
        if let Some(scheduler) = self.scheduler.as_ref() {
            let (tx, rx) = tokio::sync::oneshot::channel();
            let requested = scheduler.request_frame(Box::new(move |timestamp| {
                let _ = tx.send(timestamp);
            }));
            if requested.is_ok() {
                // A scheduler closed mid-wait drops the callback, which ends the wait too.
                let _ = rx.await;
                return;
            }
        }
        tokio::task::yield_now().await;
    }
}
