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


//! Renderer configuration.

use std::path::Path;

use easel_core::config::{self, ConfigError};
use serde::{Deserialize, Serialize};

/// Budget of one frame at 60 Hz, in milliseconds.
pub const DEFAULT_FRAME_BUDGET_MS: f64 = 16.0;

/// Span name used for flushes when a monitor is attached.
pub const DEFAULT_FLUSH_METRIC: &str = "render.flush";

/// Configuration of a [`BatchRenderer`](crate::BatchRenderer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Flushes slower than this publish a slow-flush event.
    pub frame_budget_ms: f64,
    /// Name of the monitor span wrapping each flush. `None` disables the span.
    pub flush_metric: Option<String>,
}

impl RendererConfig {
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

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
            flush_metric: Some(DEFAULT_FLUSH_METRIC.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_sixty_hertz() {
        let config = RendererConfig::default();
        assert_eq!(config.frame_budget_ms, 16.0);
        assert_eq!(config.flush_metric.as_deref(), Some("render.flush"));
    }

    #[test]
    fn null_metric_disables_the_span() {
        let config = RendererConfig::from_json(r#"{ "flush_metric": null }"#).unwrap();
        assert_eq!(config.flush_metric, None);
        assert_eq!(config.frame_budget_ms, 16.0);
    }
}
