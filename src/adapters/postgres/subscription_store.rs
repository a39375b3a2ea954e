//! PostgreSQL implementation of SubscriptionStore.
//!
//! Provides persistent storage for back-in-stock subscriptions using
//! PostgreSQL. The listing queries join against the platform's `customers`
//! and `products` tables so the port's filter contract (active, not
//! soft-deleted) holds without a second round trip.

use crate::domain::catalog::StockSubscription;
use crate::domain::foundation::{
    CustomerId, DomainError, ErrorCode, Page, PageRequest, ProductId, StoreId, SubscriptionId,
    Timestamp,
};
use crate::ports::SubscriptionStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the SubscriptionStore port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
/// The `(customer_id, product_id, store_id)` composite unique key lives in
/// the migration; `insert` maps its violation to `ValidationFailed`.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    /// Creates a new PostgresSubscriptionStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    customer_id: Uuid,
    product_id: Uuid,
    store_id: Uuid,
    created_on_utc: DateTime<Utc>,
}

impl From<SubscriptionRow> for StockSubscription {
    fn from(row: SubscriptionRow) -> Self {
        StockSubscription::from_parts(
            SubscriptionId::from_uuid(row.id),
            CustomerId::from_uuid(row.customer_id),
            ProductId::from_uuid(row.product_id),
            StoreId::from_uuid(row.store_id),
            Timestamp::from_datetime(row.created_on_utc),
        )
    }
}

const UNIQUE_TRIPLE_CONSTRAINT: &str = "stock_subscriptions_customer_product_store_key";

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn insert(&self, subscription: &StockSubscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO stock_subscriptions (id, customer_id, product_id, store_id, created_on_utc)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.customer_id.as_uuid())
        .bind(subscription.product_id.as_uuid())
        .bind(subscription.store_id.as_uuid())
        .bind(subscription.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(UNIQUE_TRIPLE_CONSTRAINT) {
                    return DomainError::validation(
                        "subscription",
                        "A subscription already exists for this customer, product and store",
                    );
                }
            }
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert subscription: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, subscription: &StockSubscription) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE stock_subscriptions SET
                customer_id = $2,
                product_id = $3,
                store_id = $4
            WHERE id = $1
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.customer_id.as_uuid())
        .bind(subscription.product_id.as_uuid())
        .bind(subscription.store_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update subscription: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                "Subscription not found",
            ));
        }

        Ok(())
    }

    async fn delete(&self, subscription: &StockSubscription) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM stock_subscriptions WHERE id = $1")
            .bind(subscription.id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete subscription: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriptionNotFound,
                "Subscription not found",
            ));
        }

        Ok(())
    }

    async fn get_by_id(
        &self,
        id: &SubscriptionId,
    ) -> Result<Option<StockSubscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, product_id, store_id, created_on_utc
            FROM stock_subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find subscription: {}", e),
            )
        })?;

        Ok(row.map(StockSubscription::from))
    }

    async fn find_latest(
        &self,
        customer: &CustomerId,
        product: &ProductId,
        store: &StoreId,
    ) -> Result<Option<StockSubscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, product_id, store_id, created_on_utc
            FROM stock_subscriptions
            WHERE customer_id = $1 AND product_id = $2 AND store_id = $3
            ORDER BY created_on_utc DESC
            LIMIT 1
            "#,
        )
        .bind(customer.as_uuid())
        .bind(product.as_uuid())
        .bind(store.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find subscription: {}", e),
            )
        })?;

        Ok(row.map(StockSubscription::from))
    }

    async fn list_by_customer(
        &self,
        customer: &CustomerId,
        store: Option<&StoreId>,
        page: PageRequest,
    ) -> Result<Page<StockSubscription>, DomainError> {
        let rows: Vec<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.customer_id, s.product_id, s.store_id, s.created_on_utc
            FROM stock_subscriptions s
            JOIN products p ON p.id = s.product_id
            WHERE s.customer_id = $1
              AND ($2::uuid IS NULL OR s.store_id = $2)
              AND NOT p.deleted
            ORDER BY s.created_on_utc DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(customer.as_uuid())
        .bind(store.map(|id| *id.as_uuid()))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list subscriptions by customer: {}", e),
            )
        })?;

        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM stock_subscriptions s
            JOIN products p ON p.id = s.product_id
            WHERE s.customer_id = $1
              AND ($2::uuid IS NULL OR s.store_id = $2)
              AND NOT p.deleted
            "#,
        )
        .bind(customer.as_uuid())
        .bind(store.map(|id| *id.as_uuid()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count subscriptions by customer: {}", e),
            )
        })?;

        Ok(Page::new(
            rows.into_iter().map(StockSubscription::from).collect(),
            page,
            total as u64,
        ))
    }

    async fn list_by_product(
        &self,
        product: &ProductId,
        store: Option<&StoreId>,
        page: PageRequest,
    ) -> Result<Page<StockSubscription>, DomainError> {
        let rows: Vec<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT s.id, s.customer_id, s.product_id, s.store_id, s.created_on_utc
            FROM stock_subscriptions s
            JOIN customers c ON c.id = s.customer_id
            WHERE s.product_id = $1
              AND ($2::uuid IS NULL OR s.store_id = $2)
              AND c.active AND NOT c.deleted
            ORDER BY s.created_on_utc DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(product.as_uuid())
        .bind(store.map(|id| *id.as_uuid()))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list subscriptions by product: {}", e),
            )
        })?;

        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM stock_subscriptions s
            JOIN customers c ON c.id = s.customer_id
            WHERE s.product_id = $1
              AND ($2::uuid IS NULL OR s.store_id = $2)
              AND c.active AND NOT c.deleted
            "#,
        )
        .bind(product.as_uuid())
        .bind(store.map(|id| *id.as_uuid()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count subscriptions by product: {}", e),
            )
        })?;

        Ok(Page::new(
            rows.into_iter().map(StockSubscription::from).collect(),
            page,
            total as u64,
        ))
    }
}
