//! SubscriptionService - lifecycle and query operations for back-in-stock
//! subscriptions.
//!
//! Owns create/update/delete with reference validation and lifecycle event
//! publication, plus the listing and lookup queries the storefront and admin
//! surfaces use. The restock fan-out lives in `RestockNotifier` and drives
//! deletion through this service so purged subscriptions emit the same
//! `Deleted` events as explicit removals.

use std::sync::Arc;

use crate::domain::catalog::{StockSubscription, SubscriptionError, SubscriptionEvent};
use crate::domain::foundation::{
    CustomerId, DomainEvent, Page, PageRequest, ProductId, StoreId, SubscriptionId,
};
use crate::ports::{EventPublisher, SubscriptionStore};

/// Application service for the subscription lifecycle.
pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
    events: Arc<dyn EventPublisher>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriptionStore>, events: Arc<dyn EventPublisher>) -> Self {
        Self { store, events }
    }

    /// Persist a new subscription and announce it.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if any required reference is nil; raised before
    ///   any side effect
    /// - `Downstream` on store failure (including the composite-key
    ///   duplicate rejection)
    pub async fn create(&self, subscription: &StockSubscription) -> Result<(), SubscriptionError> {
        validate_references(subscription)?;

        self.store.insert(subscription).await?;
        self.announce(SubscriptionEvent::created(subscription.clone()))
            .await;
        Ok(())
    }

    /// Persist changes to a subscription and announce them.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if any required reference is nil
    /// - `Downstream` on store failure
    pub async fn update(&self, subscription: &StockSubscription) -> Result<(), SubscriptionError> {
        validate_references(subscription)?;

        self.store.update(subscription).await?;
        self.announce(SubscriptionEvent::updated(subscription.clone()))
            .await;
        Ok(())
    }

    /// Remove a subscription and announce the removal.
    ///
    /// Deleting a row the store no longer has is a `Downstream` error; the
    /// store defines behavior for missing rows, not this service.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if any required reference is nil
    /// - `Downstream` on store failure
    pub async fn delete(&self, subscription: &StockSubscription) -> Result<(), SubscriptionError> {
        validate_references(subscription)?;

        self.store.delete(subscription).await?;
        self.announce(SubscriptionEvent::deleted(subscription.clone()))
            .await;
        Ok(())
    }

    /// Fetch a subscription by id.
    ///
    /// The nil sentinel and unknown ids both yield `None`; absence is never
    /// an error on this path.
    pub async fn get_by_id(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<StockSubscription>, SubscriptionError> {
        if id.is_nil() {
            return Ok(None);
        }
        Ok(self.store.get_by_id(id).await?)
    }

    /// The customer's existing opt-in for a product in a store, or `None`.
    ///
    /// Storefront handlers call this before `create` to avoid presenting a
    /// duplicate opt-in; the storage layer's composite key backstops the
    /// race. When duplicate rows exist (a tolerated anomaly from before the
    /// key existed) the most recently created one wins.
    pub async fn find_active(
        &self,
        customer: &CustomerId,
        product: &ProductId,
        store: &StoreId,
    ) -> Result<Option<StockSubscription>, SubscriptionError> {
        Ok(self.store.find_latest(customer, product, store).await?)
    }

    /// Page of a customer's subscriptions, newest first.
    ///
    /// `store = None` spans all stores. Subscriptions to soft-deleted
    /// products are excluded.
    pub async fn list_by_customer(
        &self,
        customer: &CustomerId,
        store: Option<&StoreId>,
        page: PageRequest,
    ) -> Result<Page<StockSubscription>, SubscriptionError> {
        Ok(self.store.list_by_customer(customer, store, page).await?)
    }

    /// Page of a product's subscriptions, newest first.
    ///
    /// `store = None` spans all stores. Subscriptions of inactive or
    /// soft-deleted customers are excluded.
    pub async fn list_by_product(
        &self,
        product: &ProductId,
        store: Option<&StoreId>,
        page: PageRequest,
    ) -> Result<Page<StockSubscription>, SubscriptionError> {
        Ok(self.store.list_by_product(product, store, page).await?)
    }

    /// Publishes a lifecycle event to the sink.
    ///
    /// The sink is fire-and-forget: a failed publish is logged and swallowed
    /// so integrations can never fail a storefront operation.
    async fn announce(&self, event: SubscriptionEvent) {
        let envelope = event.to_envelope();
        if let Err(e) = self.events.publish(envelope).await {
            tracing::warn!(
                error = %e,
                event_type = event.event_type(),
                "Failed to publish subscription lifecycle event"
            );
        }
    }
}

/// Rejects subscriptions whose required references are nil.
///
/// Hydrated rows with damaged references fail here the same way fresh ones
/// do, before any store or sink call.
fn validate_references(subscription: &StockSubscription) -> Result<(), SubscriptionError> {
    if subscription.id.is_nil() {
        return Err(SubscriptionError::invalid_argument(
            "subscription",
            "subscription reference is nil",
        ));
    }
    if subscription.customer_id.is_nil() {
        return Err(SubscriptionError::invalid_argument(
            "subscription.customer",
            "customer reference is nil",
        ));
    }
    if subscription.product_id.is_nil() {
        return Err(SubscriptionError::invalid_argument(
            "subscription.product",
            "product reference is nil",
        ));
    }
    Ok(())
}
