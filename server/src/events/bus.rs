//
// Copyright 2025-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Event bus implementation

use super::types::GameEvent;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type EventHandler = Box<dyn Fn(&GameEvent) + Send + Sync>;

/// Event bus for publishing and subscribing to game events
pub struct EventBus {
    handlers: Arc<RwLock<Vec<EventHandler>>>,
    event_queue: Arc<RwLock<Vec<GameEvent>>>,
}

// A handler that panicked leaves the lock poisoned. The data is still a
// plain Vec, so keep going with it.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(Vec::new())),
            event_queue: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Subscribe to events with a handler function
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&GameEvent) + Send + Sync + 'static,
    {
        write(&self.handlers).push(Box::new(handler));
    }

    /// Publish an event to the queue
    pub fn publish(&self, event: GameEvent) {
        tracing::trace!("queued {:?}", event);
        write(&self.event_queue).push(event);
    }

    /// Deliver all queued events to every handler, in publish order
    pub fn process_events(&self) {
        let events: Vec<_> = write(&self.event_queue).drain(..).collect();

        let handlers = read(&self.handlers);
        for event in events {
            for handler in handlers.iter() {
                handler(&event);
            }
        }
    }

    /// Clear all queued events without processing
    pub fn clear(&self) {
        write(&self.event_queue).clear();
    }

    /// Get the number of queued events
    pub fn queue_len(&self) -> usize {
        read(&self.event_queue).len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            event_queue: Arc::clone(&self.event_queue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    fn learned(ability: u32) -> GameEvent {
        GameEvent::AbilityLearned {
            player: Uuid::nil(),
            ability,
        }
    }

    #[test]
    fn test_event_bus() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        bus.subscribe(move |_event| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(learned(1));
        assert_eq!(bus.queue_len(), 1);

        bus.process_events();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(bus.queue_len(), 0);
    }

    #[test]
    fn test_events_delivered_in_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        bus.subscribe(move |event| {
            if let GameEvent::AbilityLearned { ability, .. } = event {
                sink.lock().unwrap().push(*ability);
            }
        });

        bus.publish(learned(3));
        bus.publish(learned(1));
        bus.publish(learned(2));
        bus.process_events();

        assert_eq!(*seen.lock().unwrap(), vec![3, 1, 2]);
    }

    #[test]
    fn test_clones_share_queue() {
        let bus = EventBus::new();
        let other = bus.clone();

        other.publish(learned(1));
        assert_eq!(bus.queue_len(), 1);
        bus.clear();
        assert_eq!(other.queue_len(), 0);
    }
}
