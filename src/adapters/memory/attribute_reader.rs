//! In-memory attribute reader for testing.
//!
//! Keyed language attributes with the same fallback chain as the Postgres
//! adapter: store-scoped value, then store-agnostic value, then the default.
//!
//! # Panics
//!
//! Methods may panic if internal locks are poisoned. This is acceptable for
//! test code but this adapter should NOT be used in production.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{CustomerId, DomainError, LanguageCode, StoreId};
use crate::ports::AttributeReader;

/// In-memory `AttributeReader` test double.
pub struct InMemoryAttributeReader {
    languages: RwLock<HashMap<(CustomerId, Option<StoreId>), LanguageCode>>,
    default_language: LanguageCode,
}

impl InMemoryAttributeReader {
    /// Creates a reader that falls back to the given default language.
    pub fn new(default_language: LanguageCode) -> Self {
        Self {
            languages: RwLock::new(HashMap::new()),
            default_language,
        }
    }

    /// Sets a customer's language, optionally scoped to one store.
    pub fn set_language(
        &self,
        customer: CustomerId,
        store: Option<StoreId>,
        language: LanguageCode,
    ) {
        self.languages
            .write()
            .expect("InMemoryAttributeReader: languages lock poisoned")
            .insert((customer, store), language);
    }
}

#[async_trait]
impl AttributeReader for InMemoryAttributeReader {
    async fn preferred_language(
        &self,
        customer: &CustomerId,
        store: Option<&StoreId>,
    ) -> Result<LanguageCode, DomainError> {
        let languages = self
            .languages
            .read()
            .expect("InMemoryAttributeReader: languages lock poisoned");

        if let Some(store_id) = store {
            if let Some(language) = languages.get(&(*customer, Some(*store_id))) {
                return Ok(language.clone());
            }
        }
        if let Some(language) = languages.get(&(*customer, None)) {
            return Ok(language.clone());
        }
        Ok(self.default_language.clone())
    }
}
