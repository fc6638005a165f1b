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


//! # Easel Bench
//!
//! Synthetic canvas benchmarks. A [`BenchmarkHarness`] runs registered
//! [`BenchmarkScenario`]s through a shared performance monitor and produces
//! one [`BenchmarkResult`] per scenario; [`compare_results`] turns two
//! results into improvement percentages.

#![warn(missing_docs)]

pub mod compare;
pub mod config;
pub mod error;
pub mod fps;
pub mod harness;
pub mod result;
pub mod scenario;
pub mod workload;

pub use compare::{calculate_improvement, compare_results};
pub use config::BenchConfig;
pub use error::BenchmarkError;
pub use fps::{FpsSampler, DEFAULT_FPS_WINDOW_MS};
pub use harness::BenchmarkHarness;
pub use result::{BenchmarkResult, MemoryUsage, MetricStats};
pub use scenario::{BenchmarkScenario, Operation, OperationKind};
pub use workload::{CanvasWorkload, Shape};
