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


//! Forwards telemetry events to the `log` facade.

use std::thread::{self, JoinHandle};

use easel_core::telemetry::TelemetryEvent;

/// Writes every [`TelemetryEvent`] it receives as a `warn` record.
///
/// This is the default reaction to threshold breaches and slow flushes: the
/// monitor and the renderer only publish, and whoever wants warnings in the
/// log attaches one of these to their event streams.
#[derive(Debug)]
pub struct EventLogger {
    receiver: flume::Receiver<TelemetryEvent>,
}

impl EventLogger {
    /// Creates a logger reading from `receiver`.
    pub fn new(receiver: flume::Receiver<TelemetryEvent>) -> Self {
        Self { receiver }
    }

    /// Writes a single event to the log.
    pub fn log_event(event: &TelemetryEvent) {
        match event {
            TelemetryEvent::ThresholdBreached(breach) => log::warn!(
                "Performance threshold exceeded for {}: {:.2} > {:.2}",
                breach.name,
                breach.value,
                breach.threshold
            ),
            TelemetryEvent::SlowFlush(flush) => log::warn!(
                "Slow render flush: {:.2}ms for {} update(s) (budget {:.2}ms)",
                flush.duration_ms,
                flush.updates,
                flush.budget_ms
            ),
        }
    }

    /// Logs every event already queued, without blocking. Returns how many were logged.
    pub fn drain(&self) -> usize {
        let mut logged = 0;
        for event in self.receiver.try_iter() {
            Self::log_event(&event);
            logged += 1;
        }
        logged
    }

    /// Moves the logger onto a background thread.
    ///
    /// The thread exits once every sender is gone (i.e. the publishing
    /// monitor or renderer was dropped) and returns the number of events logged.
    pub fn spawn(self) -> std::io::Result<JoinHandle<usize>> {
        thread::Builder::new()
            .name("easel-event-logger".to_string())
            .spawn(move || {
                let mut logged = 0;
                while let Ok(event) = self.receiver.recv() {
                    Self::log_event(&event);
                    logged += 1;
                }
                log::debug!("EventLogger stopped after {logged} event(s).");
                logged
            })
    }
}
