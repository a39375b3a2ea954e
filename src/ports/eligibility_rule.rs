//! Eligibility rule port - the pluggable discount predicate shape.
//!
//! Every discount requirement kind (role-restricted, spend-threshold, ...)
//! implements this one interface. Implementations are registered by system
//! name in an `EligibilityRuleSet` assembled at startup; the discount engine
//! selects one by the name stored on the requirement.

use crate::domain::discounts::{Eligibility, EligibilityRequest};
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// A pluggable boolean predicate over (customer, store, requirement).
///
/// Rules own no state beyond their configuration lookups; given the same
/// inputs and external state they always produce the same outcome.
#[async_trait]
pub trait EligibilityRule: Send + Sync {
    /// Evaluate the requirement carried by the request.
    ///
    /// An unsatisfied requirement is a `Valid`/`Invalid` outcome;
    /// `InvalidArgument` is reserved for a request whose requirement
    /// reference is absent (nil).
    async fn check(&self, request: &EligibilityRequest) -> Result<Eligibility, DomainError>;
}
