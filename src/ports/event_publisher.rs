//! EventPublisher port - Interface for publishing domain events.
//!
//! This port defines how the domain publishes events without knowing about
//! the underlying transport mechanism (in-memory, message broker, etc.).
//!
//! Lifecycle events are a fire-and-forget side channel: the subscription
//! service logs a failed publish and carries on rather than failing the
//! operation that triggered it.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (consumers may receive duplicates)
/// - Errors are propagated to the caller; the caller decides whether the
///   failure matters
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event envelope.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}
