//! Back-in-stock subscription entity.
//!
//! A subscription is a customer's opt-in to be notified when a specific
//! product becomes available again, scoped to one store.
//!
//! # Invariants
//!
//! - `id` is globally unique
//! - `(customer_id, product_id, store_id)` is unique, enforced by the storage
//!   layer's composite key; `find_latest` tolerates pre-existing duplicates
//!   by returning the most recently created row
//! - `created_at` is UTC and never changes after creation

use crate::domain::foundation::{CustomerId, ProductId, StoreId, SubscriptionId, Timestamp};
use serde::{Deserialize, Serialize};

/// A customer's opt-in to a restock notification for one product in one store.
///
/// The entity itself carries no behavior beyond construction; reference
/// validation happens in the subscription service so that hydrated rows with
/// damaged references fail the same way fresh ones do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSubscription {
    /// Unique identifier for this subscription.
    pub id: SubscriptionId,

    /// Customer who opted in.
    pub customer_id: CustomerId,

    /// Product the customer is waiting for.
    pub product_id: ProductId,

    /// Store the opt-in was made in.
    pub store_id: StoreId,

    /// When the customer opted in (UTC).
    pub created_at: Timestamp,
}

impl StockSubscription {
    /// Creates a new subscription with a fresh id and the current time.
    pub fn new(customer_id: CustomerId, product_id: ProductId, store_id: StoreId) -> Self {
        Self {
            id: SubscriptionId::new(),
            customer_id,
            product_id,
            store_id,
            created_at: Timestamp::now(),
        }
    }

    /// Rehydrates a subscription from stored parts.
    pub fn from_parts(
        id: SubscriptionId,
        customer_id: CustomerId,
        product_id: ProductId,
        store_id: StoreId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            customer_id,
            product_id,
            store_id,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_assigns_unique_ids() {
        let customer = CustomerId::new();
        let product = ProductId::new();
        let store = StoreId::new();

        let s1 = StockSubscription::new(customer, product, store);
        let s2 = StockSubscription::new(customer, product, store);

        assert_ne!(s1.id, s2.id);
    }

    #[test]
    fn new_records_references() {
        let customer = CustomerId::new();
        let product = ProductId::new();
        let store = StoreId::new();

        let subscription = StockSubscription::new(customer, product, store);

        assert_eq!(subscription.customer_id, customer);
        assert_eq!(subscription.product_id, product);
        assert_eq!(subscription.store_id, store);
    }

    #[test]
    fn from_parts_preserves_all_fields() {
        let id = SubscriptionId::new();
        let customer = CustomerId::new();
        let product = ProductId::new();
        let store = StoreId::new();
        let created_at = Timestamp::now().minus_secs(3600);

        let subscription = StockSubscription::from_parts(id, customer, product, store, created_at);

        assert_eq!(subscription.id, id);
        assert_eq!(subscription.created_at, created_at);
    }

    #[test]
    fn serializes_to_json_and_back() {
        let subscription =
            StockSubscription::new(CustomerId::new(), ProductId::new(), StoreId::new());

        let json = serde_json::to_string(&subscription).unwrap();
        let restored: StockSubscription = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, subscription);
    }
}
