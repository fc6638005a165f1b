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

//! Event types for runtime-wide telemetry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded value exceeded the ceiling configured for its metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBreach {
    /// The metric name.
    pub name: String,
    /// The recorded value (milliseconds or bytes, depending on the metric).
    pub value: f64,
    /// The ceiling it exceeded.
    pub threshold: f64,
    /// When the breach was detected.
    pub timestamp: DateTime<Utc>,
}

/// A batch flush that ran over its frame budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowFlush {
    /// How long the flush took, in milliseconds.
    pub duration_ms: f64,
    /// The configured frame budget, in milliseconds.
    pub budget_ms: f64,
    /// Number of units executed by the flush.
    pub updates: usize,
    /// When the flush finished.
    pub timestamp: DateTime<Utc>,
}

/// A diagnostic event published by an Easel service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A performance monitor threshold was exceeded.
    ThresholdBreached(ThresholdBreach),
    /// A batch renderer flush exceeded the frame budget.
    SlowFlush(SlowFlush),
}
