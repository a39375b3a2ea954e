//! Discount use cases: the role requirement rule and the rule registry.

mod registry;
mod role_requirement;

pub use registry::EligibilityRuleSet;
pub use role_requirement::{ROLE_REQUIREMENT_RULE_NAME, RoleRequirementRule};
