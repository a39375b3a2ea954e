//! Discount eligibility request and outcome types.
//!
//! A discount may carry any number of configured requirements; each one is
//! evaluated by a named `EligibilityRule` implementation (see
//! `application::discounts`). This module defines the request the discount
//! engine hands to a rule and the outcome it gets back.
//!
//! Ineligibility is a normal outcome, not an error: a guest without a
//! customer record simply does not qualify.

use crate::domain::foundation::{CustomerId, RequirementId, StoreId};
use serde::{Deserialize, Serialize};

/// The discount engine's request to validate one configured requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityRequest {
    /// Customer the discount would apply to; `None` for guests.
    pub customer: Option<CustomerId>,

    /// Store the checkout is happening in; `None` when store-agnostic.
    pub store: Option<StoreId>,

    /// The configured requirement being validated.
    pub requirement: RequirementId,
}

impl EligibilityRequest {
    /// Creates a request for a known customer.
    pub fn for_customer(customer: CustomerId, requirement: RequirementId) -> Self {
        Self {
            customer: Some(customer),
            store: None,
            requirement,
        }
    }

    /// Creates a request with no customer attached (guest checkout).
    pub fn anonymous(requirement: RequirementId) -> Self {
        Self {
            customer: None,
            store: None,
            requirement,
        }
    }

    /// Scopes the request to a store.
    pub fn in_store(mut self, store: StoreId) -> Self {
        self.store = Some(store);
        self
    }
}

/// Outcome of evaluating one eligibility requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// The customer satisfies the requirement.
    Valid,
    /// The customer does not satisfy the requirement.
    Invalid(IneligibilityReason),
}

impl Eligibility {
    /// Returns true if the requirement is satisfied.
    pub fn is_valid(&self) -> bool {
        matches!(self, Eligibility::Valid)
    }
}

/// Why a requirement was not satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IneligibilityReason {
    /// The request carried no customer (guest checkout).
    NoCustomer,

    /// The requirement id does not resolve to a known restriction.
    UnknownRequirement,

    /// The customer does not hold the configured role.
    RoleNotHeld,
}

impl IneligibilityReason {
    /// Get a user-facing message for the ineligibility reason.
    pub fn user_message(&self) -> String {
        match self {
            IneligibilityReason::NoCustomer => {
                "Sign in to use this discount.".to_string()
            }
            IneligibilityReason::UnknownRequirement => {
                "This discount is not configured correctly.".to_string()
            }
            IneligibilityReason::RoleNotHeld => {
                "Your account does not qualify for this discount.".to_string()
            }
        }
    }
}

impl std::fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}
