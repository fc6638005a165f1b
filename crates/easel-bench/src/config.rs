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


//! Harness configuration.

use std::path::Path;

use easel_core::config::{self, ConfigError};
use serde::{Deserialize, Serialize};

/// Configuration of a [`BenchmarkHarness`](crate::BenchmarkHarness).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Yield to the next frame once every this many iterations. `0` never yields.
    pub yield_every: u32,
    /// Length of one FPS sampling window, in milliseconds.
    pub fps_window_ms: f64,
    /// Seed for the synthetic workload. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl BenchConfig {
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

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            yield_every: 10,
            fps_window_ms: 1000.0,
            seed: None,
        }
    }
}
