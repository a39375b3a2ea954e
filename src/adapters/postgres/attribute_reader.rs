//! PostgreSQL implementation of AttributeReader.
//!
//! Reads the notification-language attribute from the platform's generic
//! customer attribute table. Resolution order: the store-scoped row, then
//! the store-agnostic row (`store_id IS NULL`), then the configured default.

use crate::domain::foundation::{
    CustomerId, DomainError, ErrorCode, LanguageCode, StoreId,
};
use crate::ports::AttributeReader;
use async_trait::async_trait;
use sqlx::PgPool;

/// Attribute key under which the customer module stores the language choice.
const LANGUAGE_ATTRIBUTE_KEY: &str = "notification_language";

/// PostgreSQL implementation of the AttributeReader port.
pub struct PostgresAttributeReader {
    pool: PgPool,
    default_language: LanguageCode,
}

impl PostgresAttributeReader {
    /// Creates a reader backed by the given pool, falling back to
    /// `default_language` when the attribute is absent or unparseable.
    pub fn new(pool: PgPool, default_language: LanguageCode) -> Self {
        Self {
            pool,
            default_language,
        }
    }
}

#[async_trait]
impl AttributeReader for PostgresAttributeReader {
    async fn preferred_language(
        &self,
        customer: &CustomerId,
        store: Option<&StoreId>,
    ) -> Result<LanguageCode, DomainError> {
        // NULLS LAST makes the store-scoped row win over the agnostic one.
        let row: Option<(String,)> = sqlx::query_as(
            r#"
            SELECT value
            FROM customer_attributes
            WHERE customer_id = $1
              AND attribute_key = $2
              AND (store_id = $3 OR store_id IS NULL)
            ORDER BY store_id NULLS LAST
            LIMIT 1
            "#,
        )
        .bind(customer.as_uuid())
        .bind(LANGUAGE_ATTRIBUTE_KEY)
        .bind(store.map(|id| *id.as_uuid()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to read customer language attribute: {}", e),
            )
        })?;

        match row {
            Some((value,)) => match LanguageCode::new(value) {
                Ok(language) => Ok(language),
                Err(e) => {
                    tracing::warn!(
                        customer = %customer,
                        error = %e,
                        "Stored language attribute is unusable, falling back to default"
                    );
                    Ok(self.default_language.clone())
                }
            },
            None => Ok(self.default_language.clone()),
        }
    }
}
