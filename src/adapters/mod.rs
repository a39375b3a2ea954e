//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Production persistence adapters (sqlx)
//! - `memory` - Deterministic in-memory test doubles

pub mod memory;
pub mod postgres;

pub use memory::{
    DispatchRecord, InMemoryAttributeReader, InMemoryEventBus, InMemorySubscriptionStore,
    RecordingDispatcher,
};
pub use postgres::{PostgresAttributeReader, PostgresSubscriptionStore};
