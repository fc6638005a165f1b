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


//! Benchmark scenario definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The synthetic operations a scenario can exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Transform and rasterise every shape's bounding box.
    Render,
    /// Mutate a random subset of shapes.
    Update,
    /// Round-trip the whole shape list through JSON.
    Collaboration,
    /// Hit-test a random point against every shape.
    Interaction,
}

impl OperationKind {
    /// All kinds, in declaration order.
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Render,
        OperationKind::Update,
        OperationKind::Collaboration,
        OperationKind::Interaction,
    ];

    /// Lowercase name, as used in JSON and metric names.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::Render => "render",
            OperationKind::Update => "update",
            OperationKind::Collaboration => "collaboration",
            OperationKind::Interaction => "interaction",
        }
    }

    /// Name of the span recorded for each iteration of this kind.
    pub fn metric_name(self) -> &'static str {
        match self {
            OperationKind::Render => "benchmark.render",
            OperationKind::Update => "benchmark.update",
            OperationKind::Collaboration => "benchmark.collaboration",
            OperationKind::Interaction => "benchmark.interaction",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared operation: run `kind` `count` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// What to run.
    #[serde(rename = "type")]
    pub kind: OperationKind,
    /// How many iterations.
    pub count: u32,
}

/// A named synthetic workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkScenario {
    /// Display name, carried into the result.
    pub name: String,
    /// Number of synthetic shapes generated for the run.
    pub shape_count: usize,
    /// Operations, executed in order.
    pub operations: Vec<Operation>,
}

impl BenchmarkScenario {
    /// Creates a scenario with no operations.
    pub fn new(name: impl Into<String>, shape_count: usize) -> Self {
        Self {
            name: name.into(),
            shape_count,
            operations: Vec::new(),
        }
    }

    /// Appends an operation.
    pub fn with_operation(mut self, kind: OperationKind, count: u32) -> Self {
        self.operations.push(Operation { kind, count });
        self
    }

    /// Total number of iterations across all operations.
    pub fn total_iterations(&self) -> u64 {
        self.operations.iter().map(|op| u64::from(op.count)).sum()
    }
}
