//! Strongly-typed identifier value objects.
//!
//! Entity references from the wider platform (customers, products, stores)
//! are represented as UUID newtypes. The nil UUID is the "absent reference"
//! sentinel carried by legacy callers; `is_nil()` is how services detect it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a back-in-stock subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Creates a new random SubscriptionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a SubscriptionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the nil sentinel id ("no subscription").
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if this is the nil sentinel.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubscriptionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Reference to a customer owned by the customer module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
    /// Creates a new random CustomerId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a CustomerId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the nil sentinel id ("no customer").
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if this is the nil sentinel.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Reference to a product owned by the catalog module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Creates a new random ProductId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ProductId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the nil sentinel id ("no product").
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if this is the nil sentinel.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Reference to a store in a multi-store deployment.
///
/// Query parameters use `Option<StoreId>` where `None` means "all stores".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(Uuid);

impl StoreId {
    /// Creates a new random StoreId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a StoreId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for StoreId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Reference to a configured discount requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementId(Uuid);

impl RequirementId {
    /// Creates a new random RequirementId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RequirementId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the nil sentinel id ("no requirement").
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if this is the nil sentinel.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequirementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequirementId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Reference to a customer role owned by the customer module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(Uuid);

impl RoleId {
    /// Creates a new random RoleId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RoleId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RoleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// IETF-style language code a customer prefers for notifications (e.g. "en").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Creates a new LanguageCode, returning error if empty.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.is_empty() {
            return Err(ValidationError::empty_field("language_code"));
        }
        Ok(Self(code))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_id_generates_unique_values() {
        let id1 = SubscriptionId::new();
        let id2 = SubscriptionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn subscription_id_nil_is_nil() {
        assert!(SubscriptionId::nil().is_nil());
        assert!(!SubscriptionId::new().is_nil());
    }

    #[test]
    fn subscription_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: SubscriptionId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn subscription_id_serializes_to_json() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: SubscriptionId = uuid_str.parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid_str));
    }

    #[test]
    fn customer_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = CustomerId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn customer_id_nil_is_nil() {
        assert!(CustomerId::nil().is_nil());
        assert!(!CustomerId::new().is_nil());
    }

    #[test]
    fn product_id_generates_unique_values() {
        let id1 = ProductId::new();
        let id2 = ProductId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn product_id_nil_is_nil() {
        assert!(ProductId::nil().is_nil());
    }

    #[test]
    fn store_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: StoreId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn requirement_id_nil_is_nil() {
        assert!(RequirementId::nil().is_nil());
        assert!(!RequirementId::new().is_nil());
    }

    #[test]
    fn role_id_generates_unique_values() {
        let id1 = RoleId::new();
        let id2 = RoleId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn language_code_accepts_non_empty_string() {
        let code = LanguageCode::new("en").unwrap();
        assert_eq!(code.as_str(), "en");
    }

    #[test]
    fn language_code_rejects_empty_string() {
        let result = LanguageCode::new("");
        assert!(result.is_err());
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "language_code"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn language_code_displays_correctly() {
        let code = LanguageCode::new("de-DE").unwrap();
        assert_eq!(format!("{}", code), "de-DE");
    }
}
