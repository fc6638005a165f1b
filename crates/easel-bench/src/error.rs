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

//! Benchmark errors.

use thiserror::Error;

/// Errors that can end a benchmark run.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    /// `run_benchmarks` was called while a run was still in progress.
    #[error("a benchmark run is already in progress")]
    AlreadyRunning,
    /// The collaboration workload failed to round-trip the shape list.
    #[error("failed to round-trip shapes through JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
