//! Notification configuration

use serde::Deserialize;

use crate::domain::foundation::LanguageCode;

use super::error::ValidationError;

/// Notification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Language used when a customer has no language attribute
    #[serde(default = "default_language")]
    pub default_language: String,
}

impl NotificationConfig {
    /// The fallback language as a domain value.
    ///
    /// Call `validate()` first; an empty configured value fails there.
    pub fn default_language_code(&self) -> Result<LanguageCode, ValidationError> {
        LanguageCode::new(self.default_language.as_str())
            .map_err(|_| ValidationError::EmptyDefaultLanguage)
    }

    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_language.is_empty() {
            return Err(ValidationError::EmptyDefaultLanguage);
        }
        Ok(())
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_english() {
        let config = NotificationConfig::default();
        assert_eq!(config.default_language, "en");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_language_code_converts() {
        let config = NotificationConfig {
            default_language: "de".to_string(),
        };
        assert_eq!(config.default_language_code().unwrap().as_str(), "de");
    }

    #[test]
    fn test_validation_rejects_empty_language() {
        let config = NotificationConfig {
            default_language: String::new(),
        };
        assert!(config.validate().is_err());
        assert!(config.default_language_code().is_err());
    }
}
