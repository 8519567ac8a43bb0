//! Configuration for the authentication core.
//!
//! # Example
//!
//! ```rust
//! use authcore::config::{AuthConfig, HasherConfig};
//! use authcore::SessionConfig;
//! use chrono::Duration;
//!
//! // Use defaults
//! let config = AuthConfig::default();
//!
//! // Or customize
//! let config = AuthConfig {
//!     hasher: HasherConfig { iterations: 800_000 },
//!     session: SessionConfig {
//!         ttl: Duration::days(1),
//!         ..Default::default()
//!     },
//! };
//! assert!(config.validate().is_ok());
//! ```

use chrono::Duration;

use crate::crypto::{Pbkdf2Hasher, DEFAULT_ITERATIONS};
use crate::session::SessionConfig;
use crate::AuthError;

#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// Work factor for newly hashed passwords.
    pub hasher: HasherConfig,

    /// Session lifetime and id size.
    pub session: SessionConfig,
}

impl AuthConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheap hashing for local development and test suites.
    ///
    /// Credentials produced here still verify under any other configuration,
    /// since the work factor travels with each credential.
    pub fn development() -> Self {
        Self {
            hasher: HasherConfig { iterations: 1_000 },
            session: SessionConfig::default(),
        }
    }

    /// Higher work factor and one-day sessions.
    pub fn strict() -> Self {
        Self {
            hasher: HasherConfig {
                iterations: 1_200_000,
            },
            session: SessionConfig {
                ttl: Duration::days(1),
                id_bytes: 48,
            },
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.hasher.iterations == 0 {
            return Err(AuthError::InvalidConfig(
                "iterations must be positive".to_owned(),
            ));
        }
        self.session
            .validate()
            .map_err(|reason| AuthError::InvalidConfig(reason.to_owned()))
    }

    /// Builds the hasher described by this configuration.
    pub fn password_hasher(&self) -> Pbkdf2Hasher {
        Pbkdf2Hasher::new(self.hasher.iterations)
    }
}

#[derive(Debug, Clone)]
pub struct HasherConfig {
    /// PBKDF2 iteration count.
    ///
    /// Default: 600 000
    pub iterations: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();

        assert_eq!(config.hasher.iterations, 600_000);
        assert_eq!(config.session.ttl, Duration::days(7));
        assert_eq!(config.session.id_bytes, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = AuthConfig::strict();

        assert!(config.hasher.iterations > DEFAULT_ITERATIONS);
        assert_eq!(config.session.ttl, Duration::days(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();

        assert_eq!(config.password_hasher().iterations(), 1_000);
        assert_eq!(config.session.ttl, Duration::days(7));
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = AuthConfig {
            hasher: HasherConfig { iterations: 0 },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AuthError::InvalidConfig(_))));
    }
}
