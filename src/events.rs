//! Publish/subscribe channel between the catalog and the forms.
//!
//! | Event name            | Payload                                 |
//! |-----------------------|-----------------------------------------|
//! | `estimator:setPrice`  | `{ "price": number }`                   |
//! | `lead:prefill`        | `{ "title": string, "price"?, "miles"? }` |
//!
//! Delivery is synchronous and in subscription order. Handlers only see
//! events of the kind they subscribed to.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    EstimatorSetPrice,
    LeadPrefill,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::EstimatorSetPrice => "estimator:setPrice",
            EventKind::LeadPrefill => "lead:prefill",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "estimator:setPrice" => Some(EventKind::EstimatorSetPrice),
            "lead:prefill" => Some(EventKind::LeadPrefill),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vehicle summary handed to the lead form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadPrefill {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miles: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum Event {
    #[serde(rename = "estimator:setPrice")]
    EstimatorSetPrice { price: f64 },
    #[serde(rename = "lead:prefill")]
    LeadPrefill(LeadPrefill),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::EstimatorSetPrice { .. } => EventKind::EstimatorSetPrice,
            Event::LeadPrefill(_) => EventKind::LeadPrefill,
        }
    }
}

pub type Handler = Box<dyn FnMut(&Event)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&Event) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Deliver `event` to every matching handler; returns how many ran.
    pub fn publish(&mut self, event: &Event) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for subscription in self.subscriptions.iter_mut().filter(|s| s.kind == kind) {
            (subscription.handler)(event);
            delivered += 1;
        }
        trace!(event = %kind, delivered, "published");
        delivered
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }
}
