//! Subscription lifecycle events.
//!
//! Emitted after every persisted lifecycle change. Integrations (admin audit
//! log, marketing automation) consume them off the event sink; nothing in
//! this crate reacts to them.

use crate::domain::foundation::{DomainEvent, EventEnvelope, EventId, Timestamp};
use serde::{Deserialize, Serialize};

use super::StockSubscription;

/// Events that occur during the subscription lifecycle.
///
/// Each variant carries a full snapshot of the subscription so consumers do
/// not need a read-back, which matters for `Deleted` where the row is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriptionEvent {
    /// A customer opted in to a restock notification.
    Created {
        event_id: EventId,
        subscription: StockSubscription,
        occurred_at: Timestamp,
    },

    /// An existing subscription was modified (admin tooling path).
    Updated {
        event_id: EventId,
        subscription: StockSubscription,
        occurred_at: Timestamp,
    },

    /// A subscription was removed, either explicitly or by the
    /// notify-and-purge protocol after a restock run.
    Deleted {
        event_id: EventId,
        subscription: StockSubscription,
        occurred_at: Timestamp,
    },
}

impl SubscriptionEvent {
    /// Wraps a subscription snapshot in a `Created` event.
    pub fn created(subscription: StockSubscription) -> Self {
        SubscriptionEvent::Created {
            event_id: EventId::new(),
            subscription,
            occurred_at: Timestamp::now(),
        }
    }

    /// Wraps a subscription snapshot in an `Updated` event.
    pub fn updated(subscription: StockSubscription) -> Self {
        SubscriptionEvent::Updated {
            event_id: EventId::new(),
            subscription,
            occurred_at: Timestamp::now(),
        }
    }

    /// Wraps a subscription snapshot in a `Deleted` event.
    pub fn deleted(subscription: StockSubscription) -> Self {
        SubscriptionEvent::Deleted {
            event_id: EventId::new(),
            subscription,
            occurred_at: Timestamp::now(),
        }
    }

    /// The subscription snapshot this event carries.
    pub fn subscription(&self) -> &StockSubscription {
        match self {
            SubscriptionEvent::Created { subscription, .. }
            | SubscriptionEvent::Updated { subscription, .. }
            | SubscriptionEvent::Deleted { subscription, .. } => subscription,
        }
    }

    /// Converts this event into its transport envelope.
    pub fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope::from_event(self)
    }
}

impl DomainEvent for SubscriptionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SubscriptionEvent::Created { .. } => "catalog.subscription.created",
            SubscriptionEvent::Updated { .. } => "catalog.subscription.updated",
            SubscriptionEvent::Deleted { .. } => "catalog.subscription.deleted",
        }
    }

    fn aggregate_id(&self) -> String {
        self.subscription().id.to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "StockSubscription"
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            SubscriptionEvent::Created { occurred_at, .. }
            | SubscriptionEvent::Updated { occurred_at, .. }
            | SubscriptionEvent::Deleted { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            SubscriptionEvent::Created { event_id, .. }
            | SubscriptionEvent::Updated { event_id, .. }
            | SubscriptionEvent::Deleted { event_id, .. } => event_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CustomerId, ProductId, StoreId};

    fn test_subscription() -> StockSubscription {
        StockSubscription::new(CustomerId::new(), ProductId::new(), StoreId::new())
    }

    #[test]
    fn created_event_type_is_stable() {
        let event = SubscriptionEvent::created(test_subscription());
        assert_eq!(event.event_type(), "catalog.subscription.created");
    }

    #[test]
    fn deleted_event_type_is_stable() {
        let event = SubscriptionEvent::deleted(test_subscription());
        assert_eq!(event.event_type(), "catalog.subscription.deleted");
    }

    #[test]
    fn aggregate_id_is_the_subscription_id() {
        let subscription = test_subscription();
        let event = SubscriptionEvent::updated(subscription.clone());
        assert_eq!(event.aggregate_id(), subscription.id.to_string());
    }

    #[test]
    fn envelope_carries_subscription_snapshot() {
        let subscription = test_subscription();
        let event = SubscriptionEvent::deleted(subscription.clone());

        let envelope = event.to_envelope();

        assert_eq!(envelope.event_type, "catalog.subscription.deleted");
        assert_eq!(envelope.aggregate_type, "StockSubscription");
        let restored: SubscriptionEvent = envelope.payload_as().unwrap();
        assert_eq!(restored.subscription(), &subscription);
    }

    #[test]
    fn each_event_gets_its_own_event_id() {
        let subscription = test_subscription();
        let e1 = SubscriptionEvent::created(subscription.clone());
        let e2 = SubscriptionEvent::created(subscription);
        assert_ne!(e1.event_id(), e2.event_id());
    }
}
