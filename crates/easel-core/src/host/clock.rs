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
use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonic time source.
///
/// Successive calls never go backwards. The unit is milliseconds and the
/// origin is arbitrary, so only differences between two readings are meaningful.
pub trait Clock: Send + Sync + Debug + 'static {
    /// Returns the current time in milliseconds.
    fn now_ms(&self) -> f64;
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    // f64 bit pattern, so reads stay lock-free.
    now_bits: AtomicU64,
}

impl ManualClock {
    /// Creates a clock reading `start_ms`.
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_bits: AtomicU64::new(start_ms.to_bits()),
        }
    }

    /// Moves the clock forward by `delta_ms` and returns the new reading.
    /// Negative deltas are ignored.
    pub fn advance(&self, delta_ms: f64) -> f64 {
        let delta = delta_ms.max(0.0);
        let mut current = self.now_bits.load(Ordering::Acquire);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self.now_bits.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return f64::from_bits(next),
                Err(actual) => current = actual,
            }
        }
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        f64::from_bits(self.now_bits.load(Ordering::Acquire))
    }
}
