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


//! Comparing two benchmark results.

use std::collections::BTreeMap;

use crate::result::BenchmarkResult;

/// Percentage improvement of `optimized` over `baseline`.
///
/// Returns `0.0` when `baseline` is zero. Otherwise a positive value means
/// `optimized` is better: `(o - b) / b * 100` when higher is better and
/// `(b - o) / b * 100` when lower is better.
pub fn calculate_improvement(baseline: f64, optimized: f64, higher_is_better: bool) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    if higher_is_better {
        (optimized - baseline) / baseline * 100.0
    } else {
        (baseline - optimized) / baseline * 100.0
    }
}

/// Per-key improvement percentages of `optimized` over `baseline`.
///
/// Keys: `totalDuration`, `fps` and `memoryUsage` (the latter two only when
/// both sides have them), then `<metric>.average` and `<metric>.total` for
/// every metric present on both sides.
pub fn compare_results(
    baseline: &BenchmarkResult,
    optimized: &BenchmarkResult,
) -> BTreeMap<String, f64> {
    let mut improvements = BTreeMap::new();
    improvements.insert(
        "totalDuration".to_string(),
        calculate_improvement(baseline.total_duration, optimized.total_duration, false),
    );

    if let (Some(base), Some(opt)) = (baseline.fps, optimized.fps) {
        improvements.insert("fps".to_string(), calculate_improvement(base, opt, true));
    }

    if let (Some(base), Some(opt)) = (baseline.memory_usage, optimized.memory_usage) {
        improvements.insert(
            "memoryUsage".to_string(),
            calculate_improvement(base.diff as f64, opt.diff as f64, false),
        );
    }

    for (name, base) in &baseline.metrics {
        let Some(opt) = optimized.metrics.get(name) else {
            continue;
        };
        improvements.insert(
            format!("{name}.average"),
            calculate_improvement(base.average, opt.average, false),
        );
        improvements.insert(
            format!("{name}.total"),
            calculate_improvement(base.total, opt.total, false),
        );
    }

    improvements
}
