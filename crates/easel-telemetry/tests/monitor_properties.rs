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


use std::sync::Arc;

use approx::assert_relative_eq;
use easel_core::host::{Clock, ManualClock};
use easel_core::TelemetryEvent;
use easel_telemetry::{EventLogger, MonitorConfig, PerformanceMonitor};
use serde_json::{json, Value};

fn setup(config: MonitorConfig) -> (Arc<ManualClock>, Arc<PerformanceMonitor>) {
    let clock = Arc::new(ManualClock::new(100.0));
    let monitor = Arc::new(PerformanceMonitor::new(
        Some(clock.clone() as Arc<dyn Clock>),
        config,
    ));
    (clock, monitor)
}

#[test]
fn default_canvas_thresholds_fire_breach_events() {
    let (clock, monitor) = setup(MonitorConfig::default());
    let events = monitor.subscribe();

    monitor.start_metric("canvas.update");
    clock.advance(8.0);
    monitor.end_metric("canvas.update");

    monitor.start_metric("canvas.update");
    clock.advance(8.01);
    monitor.end_metric("canvas.update");

    let breaches: Vec<_> = events.try_iter().collect();
    assert_eq!(breaches.len(), 1);
    let TelemetryEvent::ThresholdBreached(breach) = &breaches[0] else {
        panic!("unexpected event {:?}", breaches[0]);
    };
    assert_eq!(breach.name, "canvas.update");
    assert_relative_eq!(breach.threshold, 8.0);
}

#[test]
fn report_serializes_to_the_documented_shape() {
    let (clock, monitor) = setup(MonitorConfig::without_thresholds());
    let mut metadata = easel_core::Metadata::new();
    metadata.insert("shapes".to_string(), json!(40));

    monitor.measure_with("canvas.render", metadata, || clock.advance(3.0));

    let report = monitor.generate_report();
    let value: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(value["sessionId"], monitor.session_id());
    assert!(value["timestamp"].is_string());
    assert_eq!(value["averages"]["canvas.render"], 3.0);

    let span = &value["metrics"][0];
    assert_eq!(span["name"], "canvas.render");
    assert_eq!(span["startTime"], 100.0);
    assert_eq!(span["endTime"], 103.0);
    assert_eq!(span["duration"], 3.0);
    assert_eq!(span["metadata"]["shapes"], 40);
}

#[test]
fn session_ids_differ_between_monitors() {
    let (_, a) = setup(MonitorConfig::default());
    let (_, b) = setup(MonitorConfig::default());
    assert_ne!(a.session_id(), b.session_id());
}

#[test]
fn monitor_is_shareable_across_threads() {
    let (clock, monitor) = setup(MonitorConfig::without_thresholds());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let monitor = Arc::clone(&monitor);
            std::thread::spawn(move || {
                let name = format!("worker.{i}");
                monitor.start_metric(&name);
                name
            })
        })
        .collect();
    let names: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    clock.advance(1.0);
    for name in &names {
        assert_eq!(monitor.end_metric(name), Some(1.0));
    }
    assert_eq!(monitor.get_all_average_metrics().len(), 4);
}

#[test]
fn event_logger_drains_monitor_breaches() {
    let (clock, monitor) = setup(MonitorConfig::without_thresholds());
    monitor.set_threshold("export.", 10.0);
    let logger = EventLogger::new(monitor.subscribe());

    for _ in 0..3 {
        monitor.measure("export.png", || clock.advance(11.0));
    }

    assert_eq!(logger.drain(), 3);
}

#[test]
fn toggling_enabled_resumes_recording() {
    let (clock, monitor) = setup(MonitorConfig::without_thresholds());
    monitor.set_enabled(false);
    monitor.measure("canvas.render", || clock.advance(5.0));
    assert_eq!(monitor.get_average_metric("canvas.render"), None);

    monitor.set_enabled(true);
    monitor.measure("canvas.render", || clock.advance(7.0));
    assert_eq!(monitor.get_average_metric("canvas.render"), Some(7.0));
}
