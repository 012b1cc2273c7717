//! Process configuration management.
//!
//! Consolidates the secrets the authentication core needs. Both values are
//! loaded once at startup and injected into [`crate::auth::AuthManager`];
//! nothing in the core reads ambient global state afterwards.

/// Security configuration for the authentication core
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access token signing secret (required)
    pub signing_secret: String,
    /// Shared secret for trusted server-to-server calls (required)
    pub service_key: String,
}

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `AUTH_TOKEN_SECRET`: access token signing secret
    /// - `SERVICE_API_KEY`: billing integration shared secret
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        let signing_secret =
            std::env::var("AUTH_TOKEN_SECRET").map_err(|_| ConfigError::MissingRequired {
                var: "AUTH_TOKEN_SECRET".to_string(),
                hint: "Generate with: openssl rand -hex 32".to_string(),
            })?;

        let service_key =
            std::env::var("SERVICE_API_KEY").map_err(|_| ConfigError::MissingRequired {
                var: "SERVICE_API_KEY".to_string(),
                hint: "Generate with: openssl rand -hex 16".to_string(),
            })?;

        let config = Self {
            signing_secret,
            service_key,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signing_secret.len() < 32 {
            return Err(ConfigError::Invalid {
                var: "AUTH_TOKEN_SECRET".to_string(),
                reason: "Must be at least 32 characters (128-bit security)".to_string(),
            });
        }

        if self.service_key.is_empty() {
            return Err(ConfigError::Invalid {
                var: "SERVICE_API_KEY".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "AUTH_TOKEN_SECRET".to_string(),
            hint: "Use openssl".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("AUTH_TOKEN_SECRET"));
        assert!(msg.contains("Use openssl"));
    }

    #[test]
    fn test_short_signing_secret_is_rejected() {
        let config = AuthConfig {
            signing_secret: "short".to_string(),
            service_key: "key".to_string(),
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_valid_config_passes() {
        let config = AuthConfig {
            signing_secret: "a".repeat(32),
            service_key: "key".to_string(),
        };
        config.validate().unwrap();
    }
}
