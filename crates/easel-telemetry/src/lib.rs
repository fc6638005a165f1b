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


//! # Easel Telemetry
//!
//! The performance monitor of the Easel canvas runtime.
//!
//! A [`PerformanceMonitor`] records named timed spans, keeps a bounded rolling
//! window of recent values per name, and publishes a
//! [`TelemetryEvent::ThresholdBreached`](easel_core::TelemetryEvent) event when
//! a value exceeds the ceiling registered for its name or name prefix.
//! Attach an [`EventLogger`] to turn those events into log warnings.

#![warn(missing_docs)]

pub mod buffer;
pub mod config;
pub mod logger;
pub mod monitor;
pub mod span;
pub mod thresholds;

pub use buffer::{MetricBuffer, DEFAULT_BUFFER_SIZE};
pub use config::{MonitorConfig, ThresholdConfig};
pub use logger::EventLogger;
pub use monitor::PerformanceMonitor;
pub use span::SpanGuard;
pub use thresholds::ThresholdTable;
