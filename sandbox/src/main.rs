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


// Easel Sandbox
// Runs the synthetic canvas scenarios twice and logs the comparison.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use easel_sdk::prelude::*;

fn scenarios() -> Vec<BenchmarkScenario> {
    [("Small canvas", 100), ("Medium canvas", 500), ("Large canvas", 1000)]
        .into_iter()
        .map(|(name, shapes)| {
            BenchmarkScenario::new(name, shapes)
                .with_operation(OperationKind::Render, 50)
                .with_operation(OperationKind::Update, 30)
                .with_operation(OperationKind::Collaboration, 10)
                .with_operation(OperationKind::Interaction, 40)
        })
        .collect()
}

async fn run_set(label: &str, config: EaselConfig) -> Result<Vec<BenchmarkResult>> {
    let easel = Easel::native(config).with_context(|| format!("failed to start the {label} runtime"))?;

    // A burst of writes to a handful of shapes coalesces into one flush.
    let executed = Arc::new(AtomicUsize::new(0));
    for i in 0..100 {
        let executed = executed.clone();
        easel.renderer().queue_update(format!("shape-{}", i % 5), move || {
            executed.fetch_add(1, Ordering::Relaxed);
        });
    }
    log::info!(
        "[{label}] Queued 100 updates for 5 shapes; {} pending.",
        easel.renderer().pending_count()
    );

    for scenario in scenarios() {
        easel.harness().add_scenario(scenario);
    }
    let results = easel.harness().run_benchmarks().await?;
    for result in &results {
        log::info!("[{label}] {}", result.summary());
    }

    log::info!(
        "[{label}] Renderer ran {} update(s); monitor averages: {:?}",
        executed.load(Ordering::Relaxed),
        easel.monitor().get_all_average_metrics()
    );
    easel.dispose();
    Ok(results)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => EaselConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        None => EaselConfig::default(),
    };

    let baseline = run_set("baseline", config.clone()).await?;

    // Fewer operations per frame: yield twice as often.
    let mut paced = config;
    paced.bench.yield_every = (paced.bench.yield_every / 2).max(1);
    let optimized = run_set("optimized", paced).await?;

    for (base, opt) in baseline.iter().zip(&optimized) {
        log::info!("--- {} ---", base.scenario);
        for (key, improvement) in compare_results(base, opt) {
            log::info!("  {key}: {improvement:+.1}%");
        }
    }
    Ok(())
}
