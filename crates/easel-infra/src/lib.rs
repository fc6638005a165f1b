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


//! # Easel Infra
//!
//! Concrete host adapters for running Easel natively: a monotonic clock, a
//! tokio-ticked frame driver, a `sysinfo` memory probe and a scheduler for
//! hosts with no frame loop at all.

#![warn(missing_docs)]

pub mod clock;
pub mod frame_driver;
pub mod memory;
pub mod scheduler;

pub use clock::MonotonicClock;
pub use frame_driver::{FrameDriver, FrameDriverError, DEFAULT_TARGET_FPS};
pub use memory::SysinfoMemoryProbe;
pub use scheduler::NoFrameScheduler;
