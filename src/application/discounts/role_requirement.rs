//! RoleRequirementRule - restricts a discount to customers holding a role.
//!
//! The canonical `EligibilityRule` implementation. Its collaborators are
//! constructor-injected; nothing here reaches into a global registry
//! mid-call.

use std::sync::Arc;

use crate::domain::discounts::{Eligibility, EligibilityRequest, IneligibilityReason};
use crate::domain::foundation::DomainError;
use crate::ports::{EligibilityRule, RequirementConfigStore, RoleDirectory};
use async_trait::async_trait;

/// System name this rule is registered under.
pub const ROLE_REQUIREMENT_RULE_NAME: &str = "discounts.customer-roles";

/// Grants a discount only to customers holding the configured role.
pub struct RoleRequirementRule {
    roles: Arc<dyn RoleDirectory>,
    requirements: Arc<dyn RequirementConfigStore>,
}

impl RoleRequirementRule {
    pub fn new(
        roles: Arc<dyn RoleDirectory>,
        requirements: Arc<dyn RequirementConfigStore>,
    ) -> Self {
        Self {
            roles,
            requirements,
        }
    }
}

#[async_trait]
impl EligibilityRule for RoleRequirementRule {
    /// Valid iff the request's customer currently holds the role the
    /// requirement is configured with.
    ///
    /// A guest request and an unresolvable requirement are both `Invalid`
    /// outcomes; only a nil requirement reference is an error.
    async fn check(&self, request: &EligibilityRequest) -> Result<Eligibility, DomainError> {
        if request.requirement.is_nil() {
            return Err(DomainError::invalid_argument(
                "request.requirement",
                "requirement reference is nil",
            ));
        }

        let customer = match request.customer {
            Some(customer) => customer,
            None => return Ok(Eligibility::Invalid(IneligibilityReason::NoCustomer)),
        };

        let role = match self.requirements.restricted_role(&request.requirement).await? {
            Some(role) => role,
            None => {
                return Ok(Eligibility::Invalid(
                    IneligibilityReason::UnknownRequirement,
                ))
            }
        };

        if self.roles.customer_in_role(&customer, &role).await? {
            Ok(Eligibility::Valid)
        } else {
            Ok(Eligibility::Invalid(IneligibilityReason::RoleNotHeld))
        }
    }
}
