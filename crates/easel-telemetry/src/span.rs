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


//! RAII span guard.

use easel_core::telemetry::SpanToken;

use crate::monitor::PerformanceMonitor;

/// Closes a monitor span when it goes out of scope.
///
/// The span is ended on early returns and on unwinding, and when an async
/// block holding the guard is dropped before completion.
#[must_use = "the span closes as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SpanGuard<'a> {
    monitor: &'a PerformanceMonitor,
    token: Option<SpanToken>,
}

impl<'a> SpanGuard<'a> {
    pub(crate) fn new(monitor: &'a PerformanceMonitor, token: SpanToken) -> Self {
        Self {
            monitor,
            token: Some(token),
        }
    }

    /// Name of the span this guard closes.
    pub fn name(&self) -> &str {
        self.token.as_ref().map_or("", SpanToken::name)
    }

    /// Closes the span now and returns its duration.
    pub fn finish(mut self) -> Option<f64> {
        let token = self.token.take()?;
        self.monitor.end_metric(token.name())
    }
}

impl Drop for SpanGuard<'_> {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            if self.monitor.end_metric(token.name()).is_none() && self.monitor.is_enabled() {
                log::trace!("[SpanGuard] No open span named '{token}' to close.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use easel_core::host::{Clock, ManualClock};

    use crate::config::MonitorConfig;
    use crate::monitor::PerformanceMonitor;

    #[test]
    fn guard_closes_on_drop() {
        let clock = Arc::new(ManualClock::new(0.0));
        let monitor = PerformanceMonitor::new(
            Some(clock.clone() as Arc<dyn Clock>),
            MonitorConfig::without_thresholds(),
        );

        {
            let guard = monitor.span("canvas.render");
            assert_eq!(guard.name(), "canvas.render");
            assert_eq!(monitor.open_span_count(), 1);
            clock.advance(4.0);
        }

        assert_eq!(monitor.open_span_count(), 0);
        assert_eq!(monitor.get_average_metric("canvas.render"), Some(4.0));
    }

    #[test]
    fn finish_returns_duration_once() {
        let clock = Arc::new(ManualClock::new(0.0));
        let monitor = PerformanceMonitor::new(
            Some(clock.clone() as Arc<dyn Clock>),
            MonitorConfig::without_thresholds(),
        );

        let guard = monitor.span("canvas.update");
        clock.advance(2.5);
        assert_eq!(guard.finish(), Some(2.5));
        assert_eq!(monitor.generate_report().metrics.len(), 1);
    }
}
