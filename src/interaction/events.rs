//! Typed event subscription surface.
//!
//! The engine's public contract is a plain event enum plus a subscription
//! registry, decoupled from any specific event-dispatch mechanism. Zero
//! subscribers is a no-op, never a fault.

use serde::{Deserialize, Serialize};

/// Notifications emitted to host subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    /// The viewport domain changed through a zoom selection or a reset.
    ZoomChanged {
        domain: (i64, i64),
        zoom_active: bool,
    },
    /// The pointer resolved to a nearest data index over the main panel.
    PointerMoved { pixel: (f64, f64), index: usize },
    /// The pointer left the main panel.
    PointerLeft,
    /// The timeline strip was clicked; timestamp is floored to the second.
    TimelineClicked { timestamp: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ChartEvent) + Send>;

/// Subscriber registry. Emission order is subscription order.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ChartEvent) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns `false` when the id was already removed or never issued.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: &ChartEvent) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
