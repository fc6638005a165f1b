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

//! The performance monitor service.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use easel_core::host::Clock;
use easel_core::telemetry::{
    Metadata, MetricSpan, PerformanceReport, SpanToken, TelemetryEvent, ThresholdBreach,
};
use easel_core::utils::lock;
use easel_core::EventBus;

use crate::buffer::MetricBuffer;
use crate::config::MonitorConfig;
use crate::span::SpanGuard;
use crate::thresholds::ThresholdTable;

#[derive(Debug)]
struct MonitorState {
    enabled: bool,
    buffer_size: usize,
    spans: Vec<MetricSpan>,
    buffers: HashMap<String, MetricBuffer>,
    thresholds: ThresholdTable,
}

impl MonitorState {
    /// Pushes `value` into the buffer for `name` and returns a breach if it
    /// exceeds the resolved ceiling.
    fn record(&mut self, name: &str, value: f64) -> Option<ThresholdBreach> {
        let buffer_size = self.buffer_size;
        self.buffers
            .entry(name.to_string())
            .or_insert_with(|| MetricBuffer::new(buffer_size))
            .push(value);

        let threshold = self.thresholds.resolve(name)?;
        (value > threshold).then(|| ThresholdBreach {
            name: name.to_string(),
            value,
            threshold,
            timestamp: Utc::now(),
        })
    }
}

/// Records timed spans, keeps a moving average per metric name and publishes
/// threshold breaches.
///
/// All methods take `&self`; the monitor is meant to be shared behind an
/// [`Arc`] between the renderer, the benchmark harness and user code. No
/// internal lock is held while measured work runs, so measured closures may
/// use the monitor themselves.
///
/// Monitoring is effectively disabled when the host provides no clock: spans
/// are then never recorded and every call is a silent no-op.
#[derive(Debug)]
pub struct PerformanceMonitor {
    clock: Option<Arc<dyn Clock>>,
    state: Mutex<MonitorState>,
    events: EventBus<TelemetryEvent>,
    session_id: String,
}

impl PerformanceMonitor {
    /// Creates a monitor reading time from `clock`.
    ///
    /// ## Arguments
    /// * `clock` - The host clock. Without one the monitor stays disabled.
    /// * `config` - Buffer size, enablement and the initial thresholds.
    ///
    /// ## Returns
    /// A monitor with a freshly generated session id.
    pub fn new(clock: Option<Arc<dyn Clock>>, config: MonitorConfig) -> Self {
        let session_id = uuid::Uuid::new_v4().to_string();
        if clock.is_none() {
            log::debug!("PerformanceMonitor {session_id} created without a clock; recording is off.");
        } else {
            log::info!("PerformanceMonitor {session_id} created.");
        }

        Self {
            clock,
            state: Mutex::new(MonitorState {
                enabled: config.enabled,
                buffer_size: config.buffer_size.max(1),
                spans: Vec::new(),
                buffers: HashMap::new(),
                thresholds: config.threshold_table(),
            }),
            events: EventBus::new(),
            session_id,
        }
    }

    /// Creates a monitor with the default configuration.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(Some(clock), MonitorConfig::default())
    }

    fn state(&self) -> MutexGuard<'_, MonitorState> {
        lock(&self.state)
    }

    /// Returns the clock reading if recording is currently possible.
    fn recording_time(&self) -> Option<f64> {
        let clock = self.clock.as_ref()?;
        self.state().enabled.then(|| clock.now_ms())
    }

    fn publish_breach(&self, breach: ThresholdBreach) {
        log::trace!(
            "Metric '{}' breached its threshold ({:.3} > {:.3}).",
            breach.name,
            breach.value,
            breach.threshold
        );
        self.events.publish(TelemetryEvent::ThresholdBreached(breach));
    }

    /// Identifier generated once for this monitor instance.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Returns `true` when spans are being recorded.
    pub fn is_enabled(&self) -> bool {
        self.clock.is_some() && self.state().enabled
    }

    /// Turns recording on or off.
    ///
    /// While disabled, start/end calls neither record nor breach. Enabling a
    /// monitor that has no clock has no visible effect.
    pub fn set_enabled(&self, enabled: bool) {
        self.state().enabled = enabled;
        log::debug!("PerformanceMonitor {} enabled: {enabled}", self.session_id);
    }

    /// Subscribes to threshold breach events.
    pub fn subscribe(&self) -> flume::Receiver<TelemetryEvent> {
        self.events.subscribe()
    }

    /// Opens a span named `name`.
    pub fn start_metric(&self, name: &str) -> SpanToken {
        self.start_metric_with(name, Metadata::new())
    }

    /// Opens a span named `name` carrying `metadata`.
    ///
    /// ## Arguments
    /// * `name` - The metric name, shared by every span of the same operation.
    /// * `metadata` - Annotations copied into the recorded span.
    ///
    /// ## Returns
    /// A token echoing `name`. Nothing is recorded while the monitor is disabled.
    pub fn start_metric_with(&self, name: &str, metadata: Metadata) -> SpanToken {
        if let Some(now) = self.recording_time() {
            let mut state = self.state();
            // Re-check: recording may have been switched off since the clock read.
            if state.enabled {
                state.spans.push(MetricSpan::open(name, now, metadata));
            }
        }
        SpanToken::new(name)
    }

    /// Closes the earliest still-open span named `name`.
    ///
    /// Same-named spans close in the order they were opened.
    ///
    /// ## Arguments
    /// * `name` - The metric name passed to `start_metric`.
    ///
    /// ## Returns
    /// The span duration in milliseconds, or `None` (with nothing changed)
    /// when no such span is open.
    pub fn end_metric(&self, name: &str) -> Option<f64> {
        let now = self.recording_time()?;
        let (duration, breach) = {
            let mut state = self.state();
            if !state.enabled {
                return None;
            }
            let span = state
                .spans
                .iter_mut()
                .find(|span| span.name == name && !span.is_closed())?;
            let duration = span.close(now)?;
            (duration, state.record(name, duration))
        };

        if let Some(breach) = breach {
            self.publish_breach(breach);
        }
        Some(duration)
    }

    /// Records a raw sample (e.g. heap bytes) for `name` without a span.
    ///
    /// ## Arguments
    /// * `name` - The metric whose rolling buffer receives the sample.
    /// * `value` - The sample, in the metric's own unit.
    ///
    /// ## Returns
    /// `true` if the sample breached its threshold.
    pub fn record_value(&self, name: &str, value: f64) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let breach = self.state().record(name, value);
        match breach {
            Some(breach) => {
                self.publish_breach(breach);
                true
            }
            None => false,
        }
    }

    /// Opens a span that is closed when the returned guard is dropped.
    pub fn span(&self, name: &str) -> SpanGuard<'_> {
        self.span_with(name, Metadata::new())
    }

    /// Like [`PerformanceMonitor::span`], with metadata.
    pub fn span_with(&self, name: &str, metadata: Metadata) -> SpanGuard<'_> {
        SpanGuard::new(self, self.start_metric_with(name, metadata))
    }

    /// Runs `f` inside a span named `name`.
    ///
    /// The span is closed whether `f` returns or unwinds, and its result
    /// (an `Err` included) is handed back untouched.
    pub fn measure<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        self.measure_with(name, Metadata::new(), f)
    }

    /// Like [`PerformanceMonitor::measure`], with metadata.
    pub fn measure_with<T>(&self, name: &str, metadata: Metadata, f: impl FnOnce() -> T) -> T {
        let _span = self.span_with(name, metadata);
        f()
    }

    /// Awaits the future produced by `f` inside a span named `name`.
    ///
    /// The span closes on completion, on error, and if the returned future is
    /// dropped before completing.
    pub async fn measure_async<F, Fut, T>(&self, name: &str, f: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.measure_async_with(name, Metadata::new(), f).await
    }

    /// Like [`PerformanceMonitor::measure_async`], with metadata.
    pub async fn measure_async_with<F, Fut, T>(&self, name: &str, metadata: Metadata, f: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let _span = self.span_with(name, metadata);
        f().await
    }

    /// Wraps `f` so that every call is measured under `name`.
    pub fn instrument<A, R, F>(self: &Arc<Self>, name: impl Into<String>, f: F) -> impl Fn(A) -> R
    where
        F: Fn(A) -> R,
    {
        let monitor = Arc::clone(self);
        let name = name.into();
        move |arg| monitor.measure(&name, || f(arg))
    }

    /// Moving average of the buffer for `name`.
    ///
    /// ## Returns
    /// The mean of the buffered samples, or `None` if none were recorded.
    pub fn get_average_metric(&self, name: &str) -> Option<f64> {
        self.state().buffers.get(name)?.average()
    }

    /// Moving averages of every metric with at least one sample.
    pub fn get_all_average_metrics(&self) -> BTreeMap<String, f64> {
        self.state()
            .buffers
            .iter()
            .filter_map(|(name, buffer)| Some((name.clone(), buffer.average()?)))
            .collect()
    }

    /// Number of samples currently buffered for `name`.
    pub fn buffered_samples(&self, name: &str) -> usize {
        self.state().buffers.get(name).map_or(0, MetricBuffer::len)
    }

    /// Registers a ceiling for a metric name or prefix.
    ///
    /// ## Arguments
    /// * `name` - An exact metric name or a prefix such as `"canvas."`.
    /// * `value` - Samples strictly above this value publish a breach.
    pub fn set_threshold(&self, name: &str, value: f64) {
        self.state().thresholds.set(name, value);
    }

    /// Resolves the ceiling applying to `name` (exact match, then first
    /// registered prefix).
    pub fn get_threshold(&self, name: &str) -> Option<f64> {
        self.state().thresholds.resolve(name)
    }

    /// Number of spans opened and not yet closed.
    pub fn open_span_count(&self) -> usize {
        self.state().spans.iter().filter(|span| !span.is_closed()).count()
    }

    /// Takes a snapshot of closed spans and current averages.
    ///
    /// ## Returns
    /// A report stamped with the session id and the current time. Open spans
    /// are left out.
    pub fn generate_report(&self) -> PerformanceReport {
        let metrics = self
            .state()
            .spans
            .iter()
            .filter(|span| span.is_closed())
            .cloned()
            .collect();

        PerformanceReport {
            metrics,
            averages: self.get_all_average_metrics(),
            timestamp: Utc::now(),
            session_id: self.session_id.clone(),
        }
    }

    /// Discards every recorded span. Rolling buffers are kept, so averages survive.
    pub fn clear_metrics(&self) {
        let mut state = self.state();
        let dropped = state.spans.len();
        state.spans.clear();
        log::trace!("Cleared {dropped} span(s).");
    }
}
