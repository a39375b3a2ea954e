//! RestockNotifier - the notify-and-purge protocol.
//!
//! Triggered once per product restock by the inventory workflow. The run is
//! two-phase: first every subscriber in the snapshot is notified, then every
//! subscription in the snapshot is deleted, regardless of its individual
//! sent count.
//!
//! # Failure policy
//!
//! There is no per-subscriber error isolation. A store, attribute, or
//! dispatcher failure aborts the run at that point and propagates unmodified:
//! subscriptions not yet reached stay un-notified, and because deletion only
//! happens after the loop completes, subscriptions already notified in the
//! aborted run stay on file and may be notified again on the next restock.
//! That trade-off is deliberate; interleaving delete-per-subscriber would
//! shrink the duplicate-notification window but turn a clean snapshot walk
//! into a partially-destructive one.

use std::sync::Arc;

use crate::domain::catalog::SubscriptionError;
use crate::domain::foundation::{PageRequest, ProductId};
use crate::ports::{AttributeReader, NotificationDispatcher};

use super::SubscriptionService;

/// Executes the restock notification fan-out for one product.
pub struct RestockNotifier {
    subscriptions: Arc<SubscriptionService>,
    attributes: Arc<dyn AttributeReader>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl RestockNotifier {
    pub fn new(
        subscriptions: Arc<SubscriptionService>,
        attributes: Arc<dyn AttributeReader>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            subscriptions,
            attributes,
            dispatcher,
        }
    }

    /// Notify every active subscriber that `product` is back in stock, then
    /// purge the processed subscriptions. Returns the total number of
    /// messages sent.
    ///
    /// The snapshot spans all stores and is ordered newest first. Inactive
    /// and soft-deleted customers are already excluded by the listing
    /// contract.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the product reference is nil; no dispatch is
    ///   attempted
    /// - `Downstream` for any collaborator failure, propagated unmodified
    pub async fn notify_subscribers(
        &self,
        product: &ProductId,
    ) -> Result<u32, SubscriptionError> {
        if product.is_nil() {
            return Err(SubscriptionError::invalid_argument(
                "product",
                "product reference is nil",
            ));
        }

        // Phase 1: snapshot, then notify in snapshot order.
        let snapshot = self
            .subscriptions
            .list_by_product(product, None, PageRequest::unbounded())
            .await?;

        let mut total_sent: u32 = 0;
        for subscription in &snapshot.items {
            let language = self
                .attributes
                .preferred_language(&subscription.customer_id, Some(&subscription.store_id))
                .await?;

            let receipt = self
                .dispatcher
                .send_restock_notification(subscription, &language)
                .await?;
            total_sent += receipt.sent;
        }

        // Phase 2: purge the whole snapshot, sent or not.
        for subscription in &snapshot.items {
            self.subscriptions.delete(subscription).await?;
        }

        tracing::info!(
            product = %product,
            subscribers = snapshot.len(),
            sent = total_sent,
            "Restock notification run completed"
        );

        Ok(total_sent)
    }
}
