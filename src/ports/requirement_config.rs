//! Requirement configuration port.
//!
//! Each configured discount requirement stores which role it restricts the
//! discount to. The settings subsystem owns that mapping; this port exposes
//! the single lookup the rule needs.

use crate::domain::foundation::{DomainError, RequirementId, RoleId};
use async_trait::async_trait;

/// Port for resolving a requirement's configured restriction.
#[async_trait]
pub trait RequirementConfigStore: Send + Sync {
    /// The role a requirement restricts its discount to.
    ///
    /// Returns `None` when the requirement id does not resolve to a known
    /// restriction; the rule reports that as an invalid outcome, not an
    /// error.
    async fn restricted_role(
        &self,
        requirement: &RequirementId,
    ) -> Result<Option<RoleId>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn requirement_config_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn RequirementConfigStore) {}
    }
}
