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


//! Insertion-ordered update queue keyed by id.

use std::collections::{BTreeMap, HashMap};

/// A pending unit of work.
pub type UpdateFn = Box<dyn FnOnce() + Send + 'static>;

/// Pending updates in the order their ids were last queued.
///
/// Queuing an id that is already pending replaces its unit and moves it to
/// the back, so each id runs at most once per drain.
#[derive(Default)]
pub struct UpdateQueue {
    slots: HashMap<String, u64>,
    order: BTreeMap<u64, (String, UpdateFn)>,
    next_seq: u64,
}

impl UpdateQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `unit` under `id`. Returns `true` if an earlier unit was replaced.
    pub fn insert(&mut self, id: String, unit: UpdateFn) -> bool {
        let seq = self.next_seq;
        self.next_seq += 1;

        let replaced = match self.slots.insert(id.clone(), seq) {
            Some(previous) => self.order.remove(&previous).is_some(),
            None => false,
        };
        self.order.insert(seq, (id, unit));
        replaced
    }

    /// Returns `true` if a unit is pending for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Number of pending units.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Pending ids, oldest first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.values().map(|(id, _)| id.as_str())
    }

    /// Empties the queue and returns its units in order.
    pub fn drain(&mut self) -> Vec<(String, UpdateFn)> {
        self.slots.clear();
        std::mem::take(&mut self.order).into_values().collect()
    }
}

impl std::fmt::Debug for UpdateQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateQueue")
            .field("ids", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}
