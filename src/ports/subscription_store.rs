//! Subscription store port (persistence boundary).
//!
//! Defines the contract for persisting and querying back-in-stock
//! subscriptions. Implementations handle the actual database operations.
//!
//! # Design
//!
//! - **Join predicates are part of the contract**: listings must exclude
//!   subscriptions whose linked product/customer fails the catalog filters
//!   (see the individual methods). The Postgres adapter expresses these as
//!   SQL joins; the in-memory adapter keeps small registries.
//! - **Uniqueness lives here**: `(customer_id, product_id, store_id)` is a
//!   composite unique key; `insert` rejects duplicates with
//!   `ValidationFailed` rather than relying on callers checking
//!   `find_latest` first.
//! - **Absence is not an error**: unknown ids yield `None`, listings with no
//!   matches yield an empty page.

use crate::domain::catalog::StockSubscription;
use crate::domain::foundation::{
    CustomerId, DomainError, Page, PageRequest, ProductId, StoreId, SubscriptionId,
};
use async_trait::async_trait;

/// Repository port for subscription persistence.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Persist a new subscription.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a subscription already exists for the same
    ///   (customer, product, store) triple
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, subscription: &StockSubscription) -> Result<(), DomainError>;

    /// Persist changes to an existing subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the row no longer exists
    /// - `DatabaseError` on persistence failure
    async fn update(&self, subscription: &StockSubscription) -> Result<(), DomainError>;

    /// Remove a subscription.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the row no longer exists
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, subscription: &StockSubscription) -> Result<(), DomainError>;

    /// Fetch a subscription by id.
    ///
    /// Returns `None` if not found. Implementations may serve this read
    /// from a keyed cache.
    async fn get_by_id(&self, id: &SubscriptionId)
        -> Result<Option<StockSubscription>, DomainError>;

    /// Most recently created subscription matching the exact triple, or
    /// `None`. When duplicate rows exist for the triple (a tolerated data
    /// anomaly), the latest `created_at` wins.
    async fn find_latest(
        &self,
        customer: &CustomerId,
        product: &ProductId,
        store: &StoreId,
    ) -> Result<Option<StockSubscription>, DomainError>;

    /// Page of a customer's subscriptions, newest first.
    ///
    /// `store = None` spans all stores. Subscriptions whose product is
    /// soft-deleted are excluded.
    async fn list_by_customer(
        &self,
        customer: &CustomerId,
        store: Option<&StoreId>,
        page: PageRequest,
    ) -> Result<Page<StockSubscription>, DomainError>;

    /// Page of a product's subscriptions, newest first.
    ///
    /// `store = None` spans all stores. Subscriptions whose customer is
    /// inactive or soft-deleted are excluded.
    async fn list_by_product(
        &self,
        product: &ProductId,
        store: Option<&StoreId>,
        page: PageRequest,
    ) -> Result<Page<StockSubscription>, DomainError>;
}
