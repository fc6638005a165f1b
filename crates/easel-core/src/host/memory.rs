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

use std::fmt::Debug;
use std::sync::Mutex;

use crate::utils::lock;

/// Optional heap telemetry.
pub trait MemoryProbe: Send + Sync + Debug + 'static {
    /// Returns the number of bytes currently in use, or `None` when the host
    /// cannot tell.
    fn used_bytes(&self) -> Option<u64>;
}

/// A probe that reports whatever value it was last given.
#[derive(Debug, Default)]
pub struct FixedMemoryProbe {
    value: Mutex<Option<u64>>,
}

impl FixedMemoryProbe {
    /// Creates a probe reporting `value`.
    pub fn new(value: Option<u64>) -> Self {
        Self {
            value: Mutex::new(value),
        }
    }

    /// Changes the reported value.
    pub fn set(&self, value: Option<u64>) {
        *lock(&self.value) = value;
    }
}

impl MemoryProbe for FixedMemoryProbe {
    fn used_bytes(&self) -> Option<u64> {
        *lock(&self.value)
    }
}
