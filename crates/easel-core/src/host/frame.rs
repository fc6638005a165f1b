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

use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use thiserror::Error;

use crate::utils::lock;

/// A callback run once before the next frame, receiving the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64) + Send + 'static>;

/// Why a frame could not be requested.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// The host has no frame pipeline.
    #[error("no frame pipeline is available on this host")]
    Unavailable,
    /// The scheduler was shut down and accepts no more callbacks.
    #[error("the frame scheduler has been closed")]
    Closed,
}

/// The "run once before the next paint" primitive.
pub trait FrameScheduler: Send + Sync + Debug + 'static {
    /// Queues `callback` for the next frame.
    ///
    /// On error the callback is dropped without running.
    fn request_frame(&self, callback: FrameCallback) -> Result<(), SchedulerError>;
}

/// A frame queue that delivers callbacks whenever [`FramePump::pump`] is called.
///
/// The pump is the building block of the real frame driver in `easel-infra`,
/// which calls `pump` from a ticking task. Tests call it by hand to step
/// through frames deterministically.
#[derive(Default)]
pub struct FramePump {
    pending: Mutex<Vec<FrameCallback>>,
    frames: AtomicU64,
    closed: AtomicBool,
}

impl FramePump {
    /// Creates an empty, open pump.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers one frame.
    ///
    /// Every callback requested before this call runs with `timestamp_ms`.
    /// Callbacks requested while the frame is being delivered wait for the
    /// next one. Returns the number of callbacks run.
    pub fn pump(&self, timestamp_ms: f64) -> usize {
        let batch = std::mem::take(&mut *lock(&self.pending));
        self.frames.fetch_add(1, Ordering::Relaxed);

        let delivered = batch.len();
        for callback in batch {
            callback(timestamp_ms);
        }
        if delivered > 0 {
            log::trace!("Delivered frame at {timestamp_ms:.3}ms to {delivered} callback(s).");
        }
        delivered
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Number of frames delivered so far.
    pub fn frame_count(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Refuses further requests and drops pending callbacks without running them.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        let dropped = std::mem::take(&mut *lock(&self.pending));
        if !dropped.is_empty() {
            log::debug!("Frame pump closed with {} pending callback(s).", dropped.len());
        }
    }

    /// Returns `true` once [`FramePump::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Debug for FramePump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FramePump")
            .field("pending", &self.pending())
            .field("frames", &self.frame_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl FrameScheduler for FramePump {
    fn request_frame(&self, callback: FrameCallback) -> Result<(), SchedulerError> {
        if self.is_closed() {
            return Err(SchedulerError::Closed);
        }
        lock(&self.pending).push(callback);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn pump_runs_requested_callbacks_once() {
        let pump = FramePump::new();
        let hits = Arc::new(AtomicU64::new(0));

        let counter = hits.clone();
        pump.request_frame(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .expect("open pump accepts callbacks");

        assert_eq!(pump.pending(), 1);
        assert_eq!(pump.pump(16.0), 1);
        assert_eq!(pump.pump(32.0), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(pump.frame_count(), 2);
    }

    #[test]
    fn callbacks_requested_during_a_frame_wait_for_the_next() {
        let pump = Arc::new(FramePump::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner_pump = pump.clone();
        let inner_seen = seen.clone();
        pump.request_frame(Box::new(move |t| {
            inner_seen.lock().unwrap().push(t);
            let again = inner_seen.clone();
            inner_pump
                .request_frame(Box::new(move |t| again.lock().unwrap().push(t)))
                .unwrap();
        }))
        .unwrap();

        pump.pump(1.0);
        assert_eq!(*seen.lock().unwrap(), vec![1.0]);
        pump.pump(2.0);
        assert_eq!(*seen.lock().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn closed_pump_rejects_and_drops() {
        let pump = FramePump::new();
        pump.request_frame(Box::new(|_| panic!("must never run")))
            .unwrap();
        pump.close();

        assert_eq!(pump.pending(), 0);
        assert_eq!(
            pump.request_frame(Box::new(|_| {})),
            Err(SchedulerError::Closed)
        );
        assert_eq!(pump.pump(0.0), 0);
    }
}
