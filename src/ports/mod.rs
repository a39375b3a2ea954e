//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! ## Subscription Ports
//!
//! - `SubscriptionStore` - Persistence boundary for subscriptions
//! - `AttributeReader` - Per-customer attribute lookups (notification language)
//! - `NotificationDispatcher` - Messaging subsystem boundary
//! - `EventPublisher` - Lifecycle event sink
//!
//! ## Discount Ports
//!
//! - `EligibilityRule` - The pluggable requirement predicate shape
//! - `RoleDirectory` - Customer role membership lookups
//! - `RequirementConfigStore` - Per-requirement restriction configuration

mod attribute_reader;
mod eligibility_rule;
mod event_publisher;
mod notification_dispatcher;
mod requirement_config;
mod role_directory;
mod subscription_store;

pub use attribute_reader::AttributeReader;
pub use eligibility_rule::EligibilityRule;
pub use event_publisher::EventPublisher;
pub use notification_dispatcher::{DispatchReceipt, NotificationDispatcher};
pub use requirement_config::RequirementConfigStore;
pub use role_directory::RoleDirectory;
pub use subscription_store::SubscriptionStore;
