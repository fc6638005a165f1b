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


//! Top-level runtime configuration.

use std::path::Path;

use easel_bench::BenchConfig;
use easel_core::config::{self, ConfigError};
use easel_infra::DEFAULT_TARGET_FPS;
use easel_render::RendererConfig;
use easel_telemetry::MonitorConfig;
use serde::{Deserialize, Serialize};

/// Configuration of an [`Easel`](crate::Easel) instance.
///
/// Every section is optional in JSON; missing sections take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EaselConfig {
    /// Performance monitor settings.
    pub monitor: MonitorConfig,
    /// Batch renderer settings.
    pub renderer: RendererConfig,
    /// Benchmark harness settings.
    pub bench: BenchConfig,
    /// Frame rate of the native frame driver.
    pub target_fps: u32,
}

impl EaselConfig {
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

impl Default for EaselConfig {
    fn default() -> Self {
        Self {
            monitor: MonitorConfig::default(),
            renderer: RendererConfig::default(),
            bench: BenchConfig::default(),
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = EaselConfig::from_json(
            r#"{ "target_fps": 30, "renderer": { "frame_budget_ms": 33.0 } }"#,
        )
        .unwrap();

        assert_eq!(config.target_fps, 30);
        assert_eq!(config.renderer.frame_budget_ms, 33.0);
        assert_eq!(config.renderer.flush_metric.as_deref(), Some("render.flush"));
        assert_eq!(config.monitor, MonitorConfig::default());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("easel.json");
        let mut config = EaselConfig::default();
        config.bench.seed = Some(9);

        config.to_file(&path).unwrap();
        assert_eq!(EaselConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            EaselConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
