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


//! The public-facing API of the Easel canvas runtime.
//!
//! [`Easel`] wires a performance monitor, a batch renderer and a benchmark
//! harness to a set of host ports. There is no global instance: create as
//! many runtimes as needed and [`Easel::dispose`] them when done.

use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::{Context, Result};
use easel_bench::BenchmarkHarness;
use easel_core::host::{Clock, HostPorts};
use easel_infra::{FrameDriver, MonotonicClock, SysinfoMemoryProbe};
use easel_render::BatchRenderer;
use easel_telemetry::{EventLogger, PerformanceMonitor};

pub mod config;

pub use config::EaselConfig;

/// Commonly used types, re-exported.
pub mod prelude {
    pub use crate::{Easel, EaselConfig};
    pub use easel_bench::{
        calculate_improvement, compare_results, BenchConfig, BenchmarkError, BenchmarkHarness,
        BenchmarkResult, BenchmarkScenario, OperationKind,
    };
    pub use easel_core::host::{Clock, FrameScheduler, HostPorts, MemoryProbe};
    pub use easel_core::{Metadata, PerformanceReport, TelemetryEvent};
    pub use easel_render::{BatchRenderer, ObserverHandle, RendererConfig};
    pub use easel_telemetry::{MonitorConfig, PerformanceMonitor, ThresholdConfig};
}

/// A running Easel instance.
#[derive(Debug)]
pub struct Easel {
    host: HostPorts,
    monitor: Arc<PerformanceMonitor>,
    renderer: BatchRenderer,
    harness: Arc<BenchmarkHarness>,
    driver: Option<Arc<FrameDriver>>,
    loggers: Vec<JoinHandle<usize>>,
}

impl Easel {
    /// Builds the services on top of the given host ports.
    ///
    /// Threshold breaches and slow flushes are logged as warnings by
    /// background [`EventLogger`]s.
    pub fn create(config: EaselConfig, host: HostPorts) -> Result<Self> {
        let monitor = Arc::new(PerformanceMonitor::new(host.clock.clone(), config.monitor));
        let renderer = BatchRenderer::with_monitor(&host, monitor.clone(), config.renderer);
        let harness = Arc::new(BenchmarkHarness::new(monitor.clone(), &host, config.bench));

        let loggers = vec![
            EventLogger::new(monitor.subscribe())
                .spawn()
                .context("failed to spawn the monitor event logger")?,
            EventLogger::new(renderer.subscribe())
                .spawn()
                .context("failed to spawn the renderer event logger")?,
        ];

        log::info!("Easel runtime created (session {}).", monitor.session_id());
        Ok(Self {
            host,
            monitor,
            renderer,
            harness,
            driver: None,
            loggers,
        })
    }

    /// Builds the services on native adapters: a monotonic clock, a frame
    /// driver ticking at `config.target_fps` and a `sysinfo` memory probe.
    ///
    /// Must be called from within a tokio runtime.
    pub fn native(config: EaselConfig) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::new());
        let driver = Arc::new(FrameDriver::new(clock.clone(), config.target_fps));
        driver.start().context("failed to start the frame driver")?;

        let host = HostPorts::headless()
            .with_clock(clock)
            .with_scheduler(driver.clone())
            .with_memory(Arc::new(SysinfoMemoryProbe::new()));

        let mut easel = Self::create(config, host)?;
        easel.driver = Some(driver);
        Ok(easel)
    }

    /// The shared performance monitor.
    pub fn monitor(&self) -> &Arc<PerformanceMonitor> {
        &self.monitor
    }

    /// The batch renderer.
    pub fn renderer(&self) -> &BatchRenderer {
        &self.renderer
    }

    /// The benchmark harness.
    pub fn harness(&self) -> &Arc<BenchmarkHarness> {
        &self.harness
    }

    /// The host ports the services were built on.
    pub fn host(&self) -> &HostPorts {
        &self.host
    }

    /// Tears the runtime down.
    ///
    /// Pending renderer updates are flushed, the native frame driver (if any)
    /// is shut down and recorded spans are discarded.
    pub fn dispose(self) {
        let flushed = self.renderer.flush_updates();
        if let Some(driver) = &self.driver {
            driver.shutdown();
        }
        self.monitor.clear_metrics();
        log::info!(
            "Easel runtime {} disposed ({flushed} pending update(s) flushed).",
            self.monitor.session_id()
        );
        // Loggers exit on their own once the last service handle is dropped.
        drop(self.loggers);
    }
}
