//! In-memory event bus implementation for testing.
//!
//! Provides synchronous, deterministic event capture for unit tests.
//!
//! # Panics
//!
//! Methods may panic if internal locks are poisoned. This is acceptable for
//! test code but this adapter should NOT be used in production.

use async_trait::async_trait;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

/// In-memory event bus for tests.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.publish(envelope).await?;
/// assert_eq!(bus.event_count(), 1);
/// assert!(bus.has_event("catalog.subscription.created"));
/// ```
pub struct InMemoryEventBus {
    published: RwLock<Vec<EventEnvelope>>,
    fail_publish: AtomicBool,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self {
            published: RwLock::new(Vec::new()),
            fail_publish: AtomicBool::new(false),
        }
    }

    /// Creates a bus whose every publish fails with `InternalError`.
    pub fn failing() -> Self {
        let bus = Self::new();
        bus.fail_publish.store(true, Ordering::SeqCst);
        bus
    }

    // === Test Helpers ===

    /// Returns all published events (for test assertions).
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .clone()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns count of published events.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .len()
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .iter()
            .any(|e| e.event_type == event_type)
    }

    /// Clears all published events (for test isolation).
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .clear();
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Simulated publish failure",
            ));
        }
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .push(event);
        Ok(())
    }
}
