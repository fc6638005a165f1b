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


//! The batch renderer.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::Utc;
use easel_core::host::{Clock, FrameScheduler, HostPorts, SchedulerError};
use easel_core::telemetry::{Metadata, SlowFlush, TelemetryEvent};
use easel_core::utils::lock;
use easel_core::EventBus;
use easel_telemetry::PerformanceMonitor;

use crate::config::RendererConfig;
use crate::queue::{UpdateFn, UpdateQueue};

type ObserverFn = Arc<dyn Fn() + Send + Sync + 'static>;

#[derive(Default)]
struct RendererState {
    queue: UpdateQueue,
    scheduled: bool,
    observers: Vec<(u64, ObserverFn)>,
    next_observer_id: u64,
}

struct Shared {
    clock: Option<Arc<dyn Clock>>,
    scheduler: Option<Arc<dyn FrameScheduler>>,
    monitor: Option<Arc<PerformanceMonitor>>,
    config: RendererConfig,
    state: Mutex<RendererState>,
    events: EventBus<TelemetryEvent>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, RendererState> {
        lock(&self.state)
    }

    /// Requests one frame. The scheduled flag must already be set.
    fn schedule_flush(self: &Arc<Self>) {
        let Some(scheduler) = self.scheduler.as_ref() else {
            self.state().scheduled = false;
            return;
        };

        let frame = PendingFrame {
            shared: Arc::downgrade(self),
            delivered: false,
        };
        let result = scheduler.request_frame(Box::new(move |_timestamp| frame.deliver()));

        if let Err(error) = result {
            // Leave the flag unset so a later queue_update retries.
            self.state().scheduled = false;
            match error {
                SchedulerError::Unavailable => {
                    log::trace!("No frame scheduler; updates wait for an explicit flush.")
                }
                SchedulerError::Closed => {
                    log::debug!("Frame scheduler closed; updates wait for an explicit flush.")
                }
            }
        }
    }

    /// Drains and runs the queue. Only the delivered frame clears the
    /// scheduled flag, so a manual flush never lets a second frame be requested.
    fn process_queue(&self, frame_delivered: bool) -> usize {
        let units = {
            let mut state = self.state();
            if frame_delivered {
                state.scheduled = false;
            }
            state.queue.drain()
        };
        let updates = units.len();
        let started = self.clock.as_ref().map(|clock| clock.now_ms());

        let run = move || {
            for (_id, unit) in units {
                unit();
            }
        };
        match (&self.monitor, &self.config.flush_metric) {
            (Some(monitor), Some(metric)) => {
                let mut metadata = Metadata::new();
                metadata.insert("updates".to_string(), serde_json::Value::from(updates));
                monitor.measure_with(metric, metadata, run);
            }
            _ => run(),
        }

        if let (Some(clock), Some(started)) = (self.clock.as_ref(), started) {
            let duration_ms = clock.now_ms() - started;
            if duration_ms > self.config.frame_budget_ms {
                self.events.publish(TelemetryEvent::SlowFlush(SlowFlush {
                    duration_ms,
                    budget_ms: self.config.frame_budget_ms,
                    updates,
                    timestamp: Utc::now(),
                }));
            }
        }

        let observers: Vec<ObserverFn> = self
            .state()
            .observers
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer();
        }

        log::trace!("Flushed {updates} batched update(s).");
        updates
    }
}

/// A requested frame. Dropping it undelivered (e.g. the scheduler closed)
/// clears the scheduled flag so the next update can request a new frame.
struct PendingFrame {
    shared: Weak<Shared>,
    delivered: bool,
}

impl PendingFrame {
    fn deliver(mut self) {
        self.delivered = true;
        if let Some(shared) = self.shared.upgrade() {
            shared.process_queue(true);
        }
    }
}

impl Drop for PendingFrame {
    fn drop(&mut self) {
        if self.delivered {
            return;
        }
        if let Some(shared) = self.shared.upgrade() {
            shared.state().scheduled = false;
        }
    }
}

/// Coalesces update requests into a single flush per frame.
///
/// Each update is keyed by an id; queuing the same id again before the next
/// flush replaces the pending unit, so every id runs at most once per frame.
/// The first update queued after a flush requests one frame from the host
/// scheduler. Without a usable scheduler, updates accumulate until
/// [`BatchRenderer::flush_updates`] is called.
///
/// The renderer is a cheap handle; clones share the same queue.
#[derive(Clone)]
pub struct BatchRenderer {
    shared: Arc<Shared>,
}

impl BatchRenderer {
    /// Creates a renderer using the clock and frame scheduler of `host`.
    ///
    /// ## Arguments
    /// * `host` - Host ports; only the clock and the frame scheduler are used.
    /// * `config` - The frame budget and the flush metric name.
    pub fn new(host: &HostPorts, config: RendererConfig) -> Self {
        Self::build(host, None, config)
    }

    /// Creates a renderer whose flushes are measured by `monitor`.
    pub fn with_monitor(
        host: &HostPorts,
        monitor: Arc<PerformanceMonitor>,
        config: RendererConfig,
    ) -> Self {
        Self::build(host, Some(monitor), config)
    }

    fn build(
        host: &HostPorts,
        monitor: Option<Arc<PerformanceMonitor>>,
        config: RendererConfig,
    ) -> Self {
        log::debug!(
            "BatchRenderer created (scheduler: {}, frame budget: {}ms).",
            host.scheduler.is_some(),
            config.frame_budget_ms
        );
        Self {
            shared: Arc::new(Shared {
                clock: host.clock.clone(),
                scheduler: host.scheduler.clone(),
                monitor,
                config,
                state: Mutex::new(RendererState::default()),
                events: EventBus::new(),
            }),
        }
    }

    /// Queues `unit` under `id`, replacing any unit already pending for it.
    ///
    /// ## Arguments
    /// * `id` - Key of the update, typically a shape id.
    /// * `unit` - The work to run during the next flush.
    pub fn queue_update<F>(&self, id: impl Into<String>, unit: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let needs_frame = {
            let mut state = self.shared.state();
            let unit: UpdateFn = Box::new(unit);
            state.queue.insert(id.into(), unit);
            !std::mem::replace(&mut state.scheduled, true)
        };

        if needs_frame {
            self.shared.schedule_flush();
        }
    }

    /// Registers `observer` to run after every flush, in registration order.
    ///
    /// ## Returns
    /// A handle whose `unsubscribe` removes the observer.
    pub fn on_after_flush<F>(&self, observer: F) -> ObserverHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut state = self.shared.state();
        let id = state.next_observer_id;
        state.next_observer_id += 1;
        state.observers.push((id, Arc::new(observer)));

        ObserverHandle {
            shared: Arc::downgrade(&self.shared),
            id,
        }
    }

    /// Runs every pending update now, then the observers.
    ///
    /// A frame already requested stays requested and flushes whatever is
    /// queued by the time it arrives.
    ///
    /// ## Returns
    /// The number of updates that ran.
    pub fn flush_updates(&self) -> usize {
        self.shared.process_queue(false)
    }

    /// Number of updates waiting for the next flush.
    pub fn pending_count(&self) -> usize {
        self.shared.state().queue.len()
    }

    /// Returns `true` while a frame has been requested and not yet delivered.
    pub fn is_flush_scheduled(&self) -> bool {
        self.shared.state().scheduled
    }

    /// Subscribes to slow-flush events.
    pub fn subscribe(&self) -> flume::Receiver<TelemetryEvent> {
        self.shared.events.subscribe()
    }

    /// The active configuration.
    pub fn config(&self) -> &RendererConfig {
        &self.shared.config
    }
}

impl std::fmt::Debug for BatchRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state();
        f.debug_struct("BatchRenderer")
            .field("queue", &state.queue)
            .field("scheduled", &state.scheduled)
            .field("observers", &state.observers.len())
            .field("config", &self.shared.config)
            .finish()
    }
}

/// Registration of an after-flush observer.
///
/// Dropping the handle keeps the observer registered; call
/// [`ObserverHandle::unsubscribe`] to remove it.
#[derive(Debug, Clone)]
pub struct ObserverHandle {
    shared: Weak<Shared>,
    id: u64,
}

impl ObserverHandle {
    /// Removes the observer. Returns `false` if it was already removed.
    pub fn unsubscribe(&self) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            return false;
        };
        let mut state = shared.state();
        let before = state.observers.len();
        state.observers.retain(|(id, _)| *id != self.id);
        state.observers.len() != before
    }
}

impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared").finish_non_exhaustive()
    }
}
