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


//! A tokio-ticked frame loop.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use easel_core::host::{Clock, FrameCallback, FramePump, FrameScheduler, SchedulerError};
use easel_core::utils::lock;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Default frame rate of a [`FrameDriver`].
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Errors raised when starting a [`FrameDriver`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FrameDriverError {
    /// `start` was called outside a tokio runtime.
    #[error("the frame driver must be started from within a tokio runtime")]
    NoRuntime,
    /// The driver was shut down and cannot tick again.
    #[error("the frame driver has been shut down")]
    ShutDown,
}

/// Delivers frames to a [`FramePump`] at a fixed rate from a tokio task.
///
/// The driver is itself a [`FrameScheduler`]: requests are queued on the
/// pump and run on the next tick, stamped with the driver's clock.
#[derive(Debug)]
pub struct FrameDriver {
    pump: Arc<FramePump>,
    clock: Arc<dyn Clock>,
    target_fps: u32,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl FrameDriver {
    /// Creates a stopped driver ticking at `target_fps` (at least 1).
    pub fn new(clock: Arc<dyn Clock>, target_fps: u32) -> Self {
        Self {
            pump: Arc::new(FramePump::new()),
            clock,
            target_fps: target_fps.max(1),
            task: Mutex::new(None),
        }
    }

    /// The configured frame rate.
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Interval between two ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps))
    }

    /// Number of frames delivered so far.
    pub fn frame_count(&self) -> u64 {
        self.pump.frame_count()
    }

    /// Returns `true` while the ticking task is alive.
    pub fn is_running(&self) -> bool {
        lock(&self.task)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Spawns the ticking task on the current tokio runtime.
    ///
    /// Starting a running driver does nothing.
    pub fn start(&self) -> Result<(), FrameDriverError> {
        if self.pump.is_closed() {
            return Err(FrameDriverError::ShutDown);
        }
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| FrameDriverError::NoRuntime)?;

        let mut task = lock(&self.task);
        if task.as_ref().is_some_and(|task| !task.is_finished()) {
            return Ok(());
        }

        let pump = Arc::clone(&self.pump);
        let clock = Arc::clone(&self.clock);
        let interval = self.frame_interval();
        *task = Some(runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            while !pump.is_closed() {
                ticker.tick().await;
                pump.pump(clock.now_ms());
            }
        }));
        log::debug!("FrameDriver started at {} fps.", self.target_fps);
        Ok(())
    }

    /// Stops ticking. Pending requests stay queued until the next start.
    pub fn stop(&self) {
        if let Some(task) = lock(&self.task).take() {
            task.abort();
            log::debug!("FrameDriver stopped after {} frame(s).", self.frame_count());
        }
    }

    /// Stops ticking for good and drops every pending request.
    ///
    /// Waiters on a dropped request observe the drop (e.g. a closed channel)
    /// instead of hanging.
    pub fn shutdown(&self) {
        self.stop();
        self.pump.close();
    }
}

impl FrameScheduler for FrameDriver {
    fn request_frame(&self, callback: FrameCallback) -> Result<(), SchedulerError> {
        self.pump.request_frame(callback)
    }
}

impl Drop for FrameDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
