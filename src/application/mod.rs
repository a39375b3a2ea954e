//! Application layer - use-case services orchestrating domain and ports.

pub mod discounts;
pub mod subscriptions;

pub use discounts::{EligibilityRuleSet, ROLE_REQUIREMENT_RULE_NAME, RoleRequirementRule};
pub use subscriptions::{RestockNotifier, SubscriptionService};
