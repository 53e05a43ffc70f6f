//! Provider credential handling.

use std::fmt;

use crate::error::AiError;

/// Environment variable holding the Anthropic API key.
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Provider id used in error messages.
pub const ANTHROPIC_PROVIDER_ID: &str = "anthropic";

/// A non-blank API key. `Debug` never prints the secret.
#[derive(Clone)]
pub struct ApiCredential(String);

impl ApiCredential {
    /// Validate a raw value. Missing or blank keys are rejected.
    pub fn new(raw: Option<String>) -> Result<Self, AiError> {
        match raw.map(|k| k.trim().to_string()) {
            Some(key) if !key.is_empty() => Ok(Self(key)),
            _ => Err(AiError::MissingApiKey(ANTHROPIC_PROVIDER_ID.to_string())),
        }
    }

    /// Read the key from `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self, AiError> {
        Self::new(std::env::var(ANTHROPIC_API_KEY_ENV).ok())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_keys_are_rejected() {
        assert!(matches!(
            ApiCredential::new(None),
            Err(AiError::MissingApiKey(ref p)) if p == "anthropic"
        ));
        assert!(matches!(
            ApiCredential::new(Some("   ".to_string())),
            Err(AiError::MissingApiKey(_))
        ));
    }

    #[test]
    fn test_key_is_trimmed_and_redacted() {
        let credential = ApiCredential::new(Some(" sk-ant-123 \n".to_string())).unwrap();
        assert_eq!(credential.expose(), "sk-ant-123");
        assert_eq!(format!("{:?}", credential), "ApiCredential(***)");
    }
}
