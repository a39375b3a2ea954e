//! Role directory port - customer role membership lookups.
//!
//! Role assignment is owned by the customer module; the discount rule only
//! needs a membership check. Injected explicitly into `RoleRequirementRule`
//! rather than resolved from an ambient registry, so the dependency graph is
//! assembled once at process start.

use crate::domain::foundation::{CustomerId, DomainError, RoleId};
use async_trait::async_trait;

/// Port for querying role membership.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Returns true if the customer currently holds the role.
    ///
    /// Inactive role assignments count as not held.
    async fn customer_in_role(
        &self,
        customer: &CustomerId,
        role: &RoleId,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn role_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn RoleDirectory) {}
    }
}
