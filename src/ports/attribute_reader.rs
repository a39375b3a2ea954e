//! Attribute reader port - per-customer key/value attributes.
//!
//! The customer module stores free-form attributes (preferred language,
//! marketing flags) keyed by customer and optionally scoped to a store. This
//! crate only reads one of them: the notification language.

use crate::domain::foundation::{CustomerId, DomainError, LanguageCode, StoreId};
use async_trait::async_trait;

/// Port for reading customer attributes.
///
/// Implementations resolve the most specific value available: the
/// store-scoped attribute, then the store-agnostic one, then the configured
/// default. Absence of the attribute is therefore never an error.
#[async_trait]
pub trait AttributeReader: Send + Sync {
    /// The language to notify this customer in.
    ///
    /// `store` scopes the lookup; customers may prefer different languages
    /// per storefront.
    async fn preferred_language(
        &self,
        customer: &CustomerId,
        store: Option<&StoreId>,
    ) -> Result<LanguageCode, DomainError>;
}
