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

//! Bounded rolling window used for moving averages.

use std::collections::VecDeque;

/// Default number of samples kept per metric name.
pub const DEFAULT_BUFFER_SIZE: usize = 50;

/// A FIFO window of the most recent samples for one metric.
#[derive(Debug, Clone)]
pub struct MetricBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl MetricBuffer {
    /// Creates an empty buffer holding at most `capacity` samples (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample, evicting and returning the oldest one when full.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(value);
        evicted
    }

    /// Arithmetic mean of the current contents, `None` when empty.
    pub fn average(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` when no sample is held.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}

impl Default for MetricBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_buffer_has_no_average() {
        let buffer = MetricBuffer::default();
        assert!(buffer.is_empty());
        assert_eq!(buffer.average(), None);
        assert_eq!(buffer.capacity(), DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn average_of_partial_buffer() {
        let mut buffer = MetricBuffer::new(4);
        buffer.push(2.0);
        buffer.push(4.0);
        assert_relative_eq!(buffer.average().unwrap(), 3.0);
        assert_eq!(buffer.latest(), Some(4.0));
    }

    #[test]
    fn oldest_samples_are_evicted_first() {
        let mut buffer = MetricBuffer::new(3);
        assert_eq!(buffer.push(1.0), None);
        assert_eq!(buffer.push(2.0), None);
        assert_eq!(buffer.push(3.0), None);
        assert_eq!(buffer.push(4.0), Some(1.0));
        assert_eq!(buffer.push(5.0), Some(2.0));

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);
        assert_relative_eq!(buffer.average().unwrap(), 4.0);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut buffer = MetricBuffer::new(0);
        buffer.push(1.0);
        buffer.push(9.0);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.iter().collect::<Vec<_>>(), vec![9.0]);
    }
}
