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


use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use easel_core::host::{FramePump, HostPorts, ManualClock};
use easel_sdk::prelude::*;

#[test]
fn headless_runtime_degrades_to_manual_flush() {
    let easel = Easel::create(EaselConfig::default(), HostPorts::headless()).unwrap();
    assert!(!easel.monitor().is_enabled());

    let runs = Arc::new(AtomicUsize::new(0));
    let r = runs.clone();
    easel.renderer().queue_update("shape", move || {
        r.fetch_add(1, Ordering::SeqCst);
    });
    assert!(!easel.renderer().is_flush_scheduled());

    // Disposing flushes what is still pending.
    easel.dispose();
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn independent_instances_do_not_share_state() {
    let host = HostPorts::headless().with_clock(Arc::new(ManualClock::new(0.0)));
    let a = Easel::create(EaselConfig::default(), host.clone()).unwrap();
    let b = Easel::create(EaselConfig::default(), host).unwrap();

    a.monitor().measure("canvas.render", || ());
    assert_eq!(a.monitor().generate_report().metrics.len(), 1);
    assert!(b.monitor().generate_report().metrics.is_empty());
    assert_ne!(a.monitor().session_id(), b.monitor().session_id());

    a.dispose();
    b.dispose();
}

#[test]
fn renderer_flushes_are_visible_in_the_shared_monitor() {
    let pump = Arc::new(FramePump::new());
    let host = HostPorts::headless()
        .with_clock(Arc::new(ManualClock::new(0.0)))
        .with_scheduler(pump.clone());
    let easel = Easel::create(EaselConfig::default(), host).unwrap();

    easel.renderer().queue_update("shape", || {});
    pump.pump(16.0);

    let report = easel.monitor().generate_report();
    assert_eq!(report.spans_named("render.flush").count(), 1);
    easel.dispose();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn native_runtime_runs_a_scenario() {
    let easel = Easel::native(EaselConfig::default()).unwrap();
    easel.harness().add_scenario(
        BenchmarkScenario::new("Small canvas", 50).with_operation(OperationKind::Render, 5),
    );

    let results = tokio::time::timeout(Duration::from_secs(10), easel.harness().run_benchmarks())
        .await
        .expect("benchmark finished in time")
        .unwrap();

    let result = &results[0];
    let render = result.metrics["benchmark.render"];
    assert_eq!(render.count, 5);
    assert!(result.total_duration >= render.total);

    easel.dispose();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn native_renderer_flushes_on_the_next_tick() {
    let easel = Easel::native(EaselConfig::default()).unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel();
    let tx = std::sync::Mutex::new(Some(tx));

    easel.renderer().on_after_flush(move || {
        if let Some(tx) = tx.lock().unwrap().take() {
            let _ = tx.send(());
        }
    });
    easel.renderer().queue_update("shape", || {});

    tokio::time::timeout(Duration::from_secs(2), rx)
        .await
        .expect("flush happened in time")
        .unwrap();
    assert_eq!(easel.renderer().pending_count(), 0);

    easel.dispose();
}
