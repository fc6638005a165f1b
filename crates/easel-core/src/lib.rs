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

//! # Easel Core
//!
//! Foundational crate containing the host ports, event primitives and shared
//! telemetry records that the rest of the Easel canvas runtime is built on.
//!
//! Nothing in here schedules work or measures anything by itself. The
//! `easel-telemetry`, `easel-render` and `easel-bench` crates implement the
//! services, and `easel-infra` binds the ports to a real host.

#![warn(missing_docs)]

pub mod config;
pub mod event;
pub mod host;
pub mod telemetry;
pub mod utils;

pub use config::ConfigError;
pub use event::EventBus;
pub use host::{Clock, FrameCallback, FrameScheduler, HostPorts, MemoryProbe, SchedulerError};
pub use telemetry::{
    Metadata, MetricSpan, PerformanceReport, SlowFlush, SpanToken, TelemetryEvent,
    ThresholdBreach,
};
