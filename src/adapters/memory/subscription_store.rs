//! In-memory subscription store for testing.
//!
//! Deterministic, synchronous test double for the `SubscriptionStore` port.
//! Honors the full port contract including the join predicates: small
//! registries stand in for the customer and product tables so listings can
//! exclude deleted products and inactive/deleted customers.
//!
//! # Panics
//!
//! Methods may panic if internal locks are poisoned. This is acceptable for
//! test code but this adapter should NOT be used in production.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::catalog::StockSubscription;
use crate::domain::foundation::{
    CustomerId, DomainError, ErrorCode, Page, PageRequest, ProductId, StoreId, SubscriptionId,
};
use crate::ports::SubscriptionStore;

#[derive(Default)]
struct State {
    subscriptions: Vec<StockSubscription>,
    inactive_customers: HashSet<CustomerId>,
    deleted_customers: HashSet<CustomerId>,
    deleted_products: HashSet<ProductId>,
}

/// In-memory subscription store for tests.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemorySubscriptionStore::new());
/// store.insert(&subscription).await?;
/// store.mark_product_deleted(product_id);
/// assert!(store.list_by_customer(&customer, None, PageRequest::first(10)).await?.is_empty());
/// ```
pub struct InMemorySubscriptionStore {
    state: RwLock<State>,
    fail_all: AtomicBool,
}

impl InMemorySubscriptionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            fail_all: AtomicBool::new(false),
        }
    }

    /// Creates a store whose every operation fails with `DatabaseError`.
    pub fn failing() -> Self {
        let store = Self::new();
        store.fail_all.store(true, Ordering::SeqCst);
        store
    }

    /// Makes all subsequent operations fail (or recover when `false`).
    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    // === Registry helpers (stand-ins for the customer/product tables) ===

    /// Marks a customer inactive; their subscriptions drop out of
    /// `list_by_product`.
    pub fn mark_customer_inactive(&self, customer: CustomerId) {
        self.write_state().inactive_customers.insert(customer);
    }

    /// Marks a customer soft-deleted.
    pub fn mark_customer_deleted(&self, customer: CustomerId) {
        self.write_state().deleted_customers.insert(customer);
    }

    /// Marks a product soft-deleted; its subscriptions drop out of
    /// `list_by_customer`.
    pub fn mark_product_deleted(&self, product: ProductId) {
        self.write_state().deleted_products.insert(product);
    }

    // === Test helpers ===

    /// Inserts a row without the composite-key check, to reproduce the
    /// tolerated duplicate-triple anomaly in tests.
    pub fn seed(&self, subscription: StockSubscription) {
        self.write_state().subscriptions.push(subscription);
    }

    /// All rows currently stored, in insertion order.
    pub fn subscriptions(&self) -> Vec<StockSubscription> {
        self.read_state().subscriptions.clone()
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.read_state().subscriptions.len()
    }

    /// Returns true if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if a row with this id exists.
    pub fn contains(&self, id: &SubscriptionId) -> bool {
        self.read_state().subscriptions.iter().any(|s| s.id == *id)
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state
            .read()
            .expect("InMemorySubscriptionStore: state lock poisoned")
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.state
            .write()
            .expect("InMemorySubscriptionStore: state lock poisoned")
    }

    fn guard(&self) -> Result<(), DomainError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated store failure",
            ));
        }
        Ok(())
    }
}

impl Default for InMemorySubscriptionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorts newest first; ties keep their relative order (stable sort).
fn newest_first(rows: &mut [StockSubscription]) {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn insert(&self, subscription: &StockSubscription) -> Result<(), DomainError> {
        self.guard()?;
        let mut state = self.write_state();
        let duplicate = state.subscriptions.iter().any(|s| {
            s.customer_id == subscription.customer_id
                && s.product_id == subscription.product_id
                && s.store_id == subscription.store_id
        });
        if duplicate {
            return Err(DomainError::validation(
                "subscription",
                "A subscription already exists for this customer, product and store",
            ));
        }
        state.subscriptions.push(subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &StockSubscription) -> Result<(), DomainError> {
        self.guard()?;
        let mut state = self.write_state();
        match state
            .subscriptions
            .iter_mut()
            .find(|s| s.id == subscription.id)
        {
            Some(row) => {
                *row = subscription.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("Subscription not found: {}", subscription.id),
            )),
        }
    }

    async fn delete(&self, subscription: &StockSubscription) -> Result<(), DomainError> {
        self.guard()?;
        let mut state = self.write_state();
        let before = state.subscriptions.len();
        state.subscriptions.retain(|s| s.id != subscription.id);
        if state.subscriptions.len() == before {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                format!("Subscription not found: {}", subscription.id),
            ));
        }
        Ok(())
    }

    async fn get_by_id(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<StockSubscription>, DomainError> {
        self.guard()?;
        Ok(self
            .read_state()
            .subscriptions
            .iter()
            .find(|s| s.id == *id)
            .cloned())
    }

    async fn find_latest(
        &self,
        customer: &CustomerId,
        product: &ProductId,
        store: &StoreId,
    ) -> Result<Option<StockSubscription>, DomainError> {
        self.guard()?;
        let mut matches: Vec<StockSubscription> = self
            .read_state()
            .subscriptions
            .iter()
            .filter(|s| {
                s.customer_id == *customer && s.product_id == *product && s.store_id == *store
            })
            .cloned()
            .collect();
        newest_first(&mut matches);
        Ok(matches.into_iter().next())
    }

    async fn list_by_customer(
        &self,
        customer: &CustomerId,
        store: Option<&StoreId>,
        page: PageRequest,
    ) -> Result<Page<StockSubscription>, DomainError> {
        self.guard()?;
        let state = self.read_state();
        let mut matches: Vec<StockSubscription> = state
            .subscriptions
            .iter()
            .filter(|s| s.customer_id == *customer)
            .filter(|s| store.map_or(true, |id| s.store_id == *id))
            .filter(|s| !state.deleted_products.contains(&s.product_id))
            .cloned()
            .collect();
        newest_first(&mut matches);
        Ok(Page::from_full_set(matches, page))
    }

    async fn list_by_product(
        &self,
        product: &ProductId,
        store: Option<&StoreId>,
        page: PageRequest,
    ) -> Result<Page<StockSubscription>, DomainError> {
        self.guard()?;
        let state = self.read_state();
        let mut matches: Vec<StockSubscription> = state
            .subscriptions
            .iter()
            .filter(|s| s.product_id == *product)
            .filter(|s| store.map_or(true, |id| s.store_id == *id))
            .filter(|s| !state.inactive_customers.contains(&s.customer_id))
            .filter(|s| !state.deleted_customers.contains(&s.customer_id))
            .cloned()
            .collect();
        newest_first(&mut matches);
        Ok(Page::from_full_set(matches, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn subscription_at(
        customer: CustomerId,
        product: ProductId,
        store: StoreId,
        created_at: Timestamp,
    ) -> StockSubscription {
        StockSubscription::from_parts(SubscriptionId::new(), customer, product, store, created_at)
    }

    #[tokio::test]
    async fn insert_then_get_by_id_round_trips() {
        let store = InMemorySubscriptionStore::new();
        let subscription =
            StockSubscription::new(CustomerId::new(), ProductId::new(), StoreId::new());

        store.insert(&subscription).await.unwrap();

        let fetched = store.get_by_id(&subscription.id).await.unwrap();
        assert_eq!(fetched, Some(subscription));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_triple() {
        let store = InMemorySubscriptionStore::new();
        let customer = CustomerId::new();
        let product = ProductId::new();
        let shop = StoreId::new();

        store
            .insert(&StockSubscription::new(customer, product, shop))
            .await
            .unwrap();
        let err = store
            .insert(&StockSubscription::new(customer, product, shop))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn same_customer_and_product_in_another_store_is_allowed() {
        let store = InMemorySubscriptionStore::new();
        let customer = CustomerId::new();
        let product = ProductId::new();

        store
            .insert(&StockSubscription::new(customer, product, StoreId::new()))
            .await
            .unwrap();
        store
            .insert(&StockSubscription::new(customer, product, StoreId::new()))
            .await
            .unwrap();

        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = InMemorySubscriptionStore::new();
        let subscription =
            StockSubscription::new(CustomerId::new(), ProductId::new(), StoreId::new());
        store.insert(&subscription).await.unwrap();

        store.delete(&subscription).await.unwrap();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_of_missing_row_reports_not_found() {
        let store = InMemorySubscriptionStore::new();
        let subscription =
            StockSubscription::new(CustomerId::new(), ProductId::new(), StoreId::new());

        let err = store.delete(&subscription).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubscriptionNotFound);
    }

    #[tokio::test]
    async fn update_of_missing_row_reports_not_found() {
        let store = InMemorySubscriptionStore::new();
        let subscription =
            StockSubscription::new(CustomerId::new(), ProductId::new(), StoreId::new());

        let err = store.update(&subscription).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SubscriptionNotFound);
    }

    #[tokio::test]
    async fn find_latest_returns_newest_of_duplicate_triples() {
        let store = InMemorySubscriptionStore::new();
        let customer = CustomerId::new();
        let product = ProductId::new();
        let shop = StoreId::new();
        let now = Timestamp::now();

        let older = subscription_at(customer, product, shop, now.minus_secs(120));
        let newer = subscription_at(customer, product, shop, now);
        store.seed(older);
        store.seed(newer.clone());

        let found = store.find_latest(&customer, &product, &shop).await.unwrap();
        assert_eq!(found, Some(newer));
    }

    #[tokio::test]
    async fn list_by_customer_orders_newest_first() {
        let store = InMemorySubscriptionStore::new();
        let customer = CustomerId::new();
        let shop = StoreId::new();
        let now = Timestamp::now();

        let old = subscription_at(customer, ProductId::new(), shop, now.minus_secs(60));
        let new = subscription_at(customer, ProductId::new(), shop, now);
        store.seed(old.clone());
        store.seed(new.clone());

        let page = store
            .list_by_customer(&customer, None, PageRequest::first(10))
            .await
            .unwrap();

        assert_eq!(page.items, vec![new, old]);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn list_by_customer_excludes_deleted_products() {
        let store = InMemorySubscriptionStore::new();
        let customer = CustomerId::new();
        let gone = ProductId::new();

        store.seed(StockSubscription::new(customer, gone, StoreId::new()));
        store.seed(StockSubscription::new(
            customer,
            ProductId::new(),
            StoreId::new(),
        ));
        store.mark_product_deleted(gone);

        let page = store
            .list_by_customer(&customer, None, PageRequest::first(10))
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_ne!(page.items[0].product_id, gone);
    }

    #[tokio::test]
    async fn list_by_customer_filters_by_store() {
        let store = InMemorySubscriptionStore::new();
        let customer = CustomerId::new();
        let shop = StoreId::new();

        store.seed(StockSubscription::new(customer, ProductId::new(), shop));
        store.seed(StockSubscription::new(
            customer,
            ProductId::new(),
            StoreId::new(),
        ));

        let page = store
            .list_by_customer(&customer, Some(&shop), PageRequest::first(10))
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].store_id, shop);
    }

    #[tokio::test]
    async fn list_by_product_excludes_inactive_and_deleted_customers() {
        let store = InMemorySubscriptionStore::new();
        let product = ProductId::new();
        let active = CustomerId::new();
        let inactive = CustomerId::new();
        let deleted = CustomerId::new();

        store.seed(StockSubscription::new(active, product, StoreId::new()));
        store.seed(StockSubscription::new(inactive, product, StoreId::new()));
        store.seed(StockSubscription::new(deleted, product, StoreId::new()));
        store.mark_customer_inactive(inactive);
        store.mark_customer_deleted(deleted);

        let page = store
            .list_by_product(&product, None, PageRequest::first(10))
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].customer_id, active);
    }

    #[tokio::test]
    async fn list_by_product_spans_all_stores_when_unscoped() {
        let store = InMemorySubscriptionStore::new();
        let product = ProductId::new();

        store.seed(StockSubscription::new(
            CustomerId::new(),
            product,
            StoreId::new(),
        ));
        store.seed(StockSubscription::new(
            CustomerId::new(),
            product,
            StoreId::new(),
        ));

        let page = store
            .list_by_product(&product, None, PageRequest::unbounded())
            .await
            .unwrap();

        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn failing_store_errors_on_every_operation() {
        let store = InMemorySubscriptionStore::failing();
        let subscription =
            StockSubscription::new(CustomerId::new(), ProductId::new(), StoreId::new());

        assert!(store.insert(&subscription).await.is_err());
        assert!(store.get_by_id(&subscription.id).await.is_err());
        assert!(store
            .list_by_product(&subscription.product_id, None, PageRequest::first(10))
            .await
            .is_err());
    }
}
