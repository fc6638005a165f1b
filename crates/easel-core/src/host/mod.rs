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

//! Host capability ports consumed by the Easel services.
//!
//! The runtime never talks to the host directly. It asks for three things
//! through the traits in this module:
//!
//! * a monotonic [`Clock`],
//! * a [`FrameScheduler`] that runs a callback once before the next frame,
//! * an optional [`MemoryProbe`] reporting heap usage.
//!
//! Each capability may be missing. Services degrade the features that depend
//! on a missing port and keep everything else working. `easel-infra` provides
//! the adapters bound to a real process; the manual implementations here
//! ([`ManualClock`], [`FramePump`], [`FixedMemoryProbe`]) are deterministic and
//! intended for tests and headless hosts.

mod clock;
mod frame;
mod memory;

use std::sync::Arc;

pub use self::clock::{Clock, ManualClock};
pub use self::frame::{FrameCallback, FramePump, FrameScheduler, SchedulerError};
pub use self::memory::{FixedMemoryProbe, MemoryProbe};

/// The set of host capabilities handed to the Easel services.
#[derive(Debug, Clone, Default)]
pub struct HostPorts {
    /// Monotonic time source. Without it, performance monitoring is disabled.
    pub clock: Option<Arc<dyn Clock>>,
    /// Next-frame scheduler. Without it, batched updates only run on manual flushes.
    pub scheduler: Option<Arc<dyn FrameScheduler>>,
    /// Heap telemetry. Without it, benchmark memory fields are absent.
    pub memory: Option<Arc<dyn MemoryProbe>>,
}

impl HostPorts {
    /// A host exposing no capability at all.
    pub fn headless() -> Self {
        Self::default()
    }

    /// Sets the clock port.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the frame scheduler port.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn FrameScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Sets the memory telemetry port.
    pub fn with_memory(mut self, memory: Arc<dyn MemoryProbe>) -> Self {
        self.memory = Some(memory);
        self
    }
}
