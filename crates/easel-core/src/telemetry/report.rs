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

//! Performance report snapshots.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::span::MetricSpan;

/// An immutable snapshot of a performance monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Closed spans recorded since the last clear, in opening order.
    pub metrics: Vec<MetricSpan>,
    /// Moving average per metric name.
    pub averages: BTreeMap<String, f64>,
    /// When the snapshot was taken (serialized as RFC 3339).
    pub timestamp: DateTime<Utc>,
    /// Identifier of the monitor instance that produced the report.
    pub session_id: String,
}

impl PerformanceReport {
    /// Iterates over the closed spans named `name`.
    pub fn spans_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MetricSpan> + 'a {
        self.metrics.iter().filter(move |span| span.name == name)
    }

    /// Serializes the report as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
