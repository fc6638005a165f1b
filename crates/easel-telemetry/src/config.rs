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

//! Monitor configuration.

use std::path::Path;

use easel_core::config::{self, ConfigError};
use serde::{Deserialize, Serialize};

use crate::buffer::DEFAULT_BUFFER_SIZE;
use crate::thresholds::ThresholdTable;

/// One threshold entry: a metric name or name prefix and its ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Metric name or prefix (e.g. "canvas.render", "collaboration.").
    pub metric: String,
    /// Ceiling in the metric's unit (milliseconds for spans, bytes for memory).
    pub value: f64,
}

impl ThresholdConfig {
    /// Creates an entry.
    pub fn new(metric: impl Into<String>, value: f64) -> Self {
        Self {
            metric: metric.into(),
            value,
        }
    }
}

/// Configuration of a performance monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Whether recording starts enabled.
    pub enabled: bool,
    /// Rolling window length per metric name.
    pub buffer_size: usize,
    /// Thresholds, in registration order.
    pub thresholds: Vec<ThresholdConfig>,
}

impl MonitorConfig {
    /// A config with no thresholds at all.
    pub fn without_thresholds() -> Self {
        Self {
            thresholds: Vec::new(),
            ..Self::default()
        }
    }

    /// Ceilings for the canvas surface's own hot paths.
    pub fn default_canvas_thresholds() -> Vec<ThresholdConfig> {
        vec![
            ThresholdConfig::new("canvas.render", 16.0),
            ThresholdConfig::new("canvas.update", 8.0),
            ThresholdConfig::new("collaboration.sync", 100.0),
            ThresholdConfig::new("memory.heap", 50.0 * 1024.0 * 1024.0),
        ]
    }

    /// Builds the threshold table described by this config.
    pub fn threshold_table(&self) -> ThresholdTable {
        let mut table = ThresholdTable::new();
        for entry in &self.thresholds {
            table.set(entry.metric.clone(), entry.value);
        }
        table
    }

    /// Load the config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        config::from_json(json)
    }

    /// Load the config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        config::from_file(path)
    }

    /// Save the config to a JSON file.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        config::to_file(self, path)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            buffer_size: DEFAULT_BUFFER_SIZE,
            thresholds: Self::default_canvas_thresholds(),
        }
    }
}
