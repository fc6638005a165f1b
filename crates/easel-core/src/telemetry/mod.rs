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

//! Shared telemetry records.
//!
//! This module defines the "common language" of Easel telemetry: the span
//! record produced by the performance monitor, the report snapshot handed to
//! dashboards, and the diagnostic events published by the services. All of
//! them are plain serde records so they can be shipped as JSON by whatever
//! reporting collaborator the host plugs in.

pub mod events;
pub mod report;
pub mod span;

pub use self::events::{SlowFlush, TelemetryEvent, ThresholdBreach};
pub use self::report::PerformanceReport;
pub use self::span::{Metadata, MetricSpan, SpanToken};
