// Settings validation

use crate::{ConfigError, Result, SettingsField};

/// Validation rules for settings values
pub struct ConfigValidator;

impl ConfigValidator {
    /// Require a present, non-empty value for `field`
    pub fn required(value: Option<&str>, field: SettingsField) -> Result<&str> {
        match value {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(ConfigError::MissingField(field.option_key())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(
            ConfigValidator::required(Some("value"), SettingsField::User).unwrap(),
            "value"
        );
        assert!(ConfigValidator::required(Some(""), SettingsField::User).is_err());
        assert!(ConfigValidator::required(None, SettingsField::User).is_err());
    }

    #[test]
    fn test_required_names_the_option_key() {
        let err = ConfigValidator::required(None, SettingsField::Realm).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required setting: lianaautomation_realm"
        );
    }
}
