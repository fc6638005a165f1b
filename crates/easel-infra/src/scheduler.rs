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

//! A scheduler that never delivers frames.

use easel_core::host::{FrameCallback, FrameScheduler, SchedulerError};

/// A frame scheduler for hosts without any frame loop.
///
/// Every request fails with [`SchedulerError::Unavailable`], so frame-driven
/// services fall back to their manual paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFrameScheduler;

impl FrameScheduler for NoFrameScheduler {
    fn request_frame(&self, _callback: FrameCallback) -> Result<(), SchedulerError> {
        Err(SchedulerError::Unavailable)
    }
}
