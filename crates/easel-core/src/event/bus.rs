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

use std::fmt;
use std::sync::Mutex;

use crate::utils::lock;

/// A generic, thread-safe broadcast channel.
///
/// Each call to [`EventBus::subscribe`] creates an unbounded receiver.
/// Publishing clones the event into every live receiver; receivers that have
/// been dropped are pruned on the next publish.
pub struct EventBus<T: Clone + Send + 'static> {
    subscribers: Mutex<Vec<flume::Sender<T>>>,
}

impl<T: Clone + Send + 'static> EventBus<T> {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        log::debug!("Broadcast EventBus initialized.");
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&self) -> flume::Receiver<T> {
        let (sender, receiver) = flume::unbounded();
        lock(&self.subscribers).push(sender);
        receiver
    }

    /// Sends `event` to every live subscriber.
    ///
    /// ## Returns
    /// The number of subscribers the event was delivered to.
    pub fn publish(&self, event: T) -> usize {
        let mut subscribers = lock(&self.subscribers);
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        log::trace!("Published an event to {} subscriber(s).", subscribers.len());
        subscribers.len()
    }

    /// Returns the number of subscribers that were alive at the last publish.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }
}

impl<T: Clone + Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> fmt::Debug for EventBus<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
