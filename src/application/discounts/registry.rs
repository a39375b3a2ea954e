//! EligibilityRuleSet - named registry of discount requirement rules.
//!
//! Rules are registered by system name when the application wires its
//! dependency graph, once at process start. The discount engine then selects
//! a rule by the name stored on each configured requirement. An unknown name
//! yields `None`; the engine treats the requirement as unsatisfiable rather
//! than failing checkout.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ports::EligibilityRule;

/// Immutable-after-startup registry of named eligibility rules.
#[derive(Default)]
pub struct EligibilityRuleSet {
    rules: HashMap<String, Arc<dyn EligibilityRule>>,
}

impl EligibilityRuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Registers a rule under its system name, replacing any previous
    /// registration of the same name.
    pub fn with_rule(mut self, name: impl Into<String>, rule: Arc<dyn EligibilityRule>) -> Self {
        self.rules.insert(name.into(), rule);
        self
    }

    /// Looks up a rule by system name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn EligibilityRule>> {
        self.rules.get(name).cloned()
    }

    /// Registered system names, in no particular order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
