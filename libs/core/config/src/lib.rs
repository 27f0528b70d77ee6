pub mod server;
pub mod tracing;

use std::env;
use std::num::NonZeroU64;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment (dev = local/kind, prod = full k8s)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development, // Local dev or kind cluster
    Production,  // Full k8s cluster
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Static application identity reported by the health endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Build an [`AppInfo`] from the calling crate's Cargo metadata
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load and parse environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Load an environment variable and parse it, falling back to `default` when unset
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Load an optional environment variable and parse it when present
pub fn env_parse_opt<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::ParseError {
                key: key.to_string(),
                details: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

/// Like [`env_parse_opt`] for a count that must be positive; `0` is a `ParseError`
pub fn env_parse_nonzero_opt(key: &str) -> Result<Option<u64>, ConfigError> {
    Ok(env_parse_opt::<NonZeroU64>(key)?.map(NonZeroU64::get))
}

/// Like [`env_parse_or`] for a count that must be positive; `0` is a `ParseError`
pub fn env_parse_nonzero_or(key: &str, default: u64) -> Result<u64, ConfigError> {
    Ok(env_parse_nonzero_opt(key)?.unwrap_or(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert!(Environment::from_env().is_production());
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_app_info_macro_uses_crate_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }

    #[test]
    fn test_env_or_default_without_value() {
        temp_env::with_var_unset("MISSING_VAR", || {
            assert_eq!(env_or_default("MISSING_VAR", "default_value"), "default_value");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("MISSING_REQUIRED", || {
            let err = env_required("MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_or_default_and_value() {
        temp_env::with_var_unset("PARSE_ME", || {
            assert_eq!(env_parse_or("PARSE_ME", 15u64).unwrap(), 15);
        });
        temp_env::with_var("PARSE_ME", Some(" 42 "), || {
            assert_eq!(env_parse_or("PARSE_ME", 15u64).unwrap(), 42);
        });
    }

    #[test]
    fn test_env_parse_or_invalid_names_key() {
        temp_env::with_var("PARSE_ME", Some("soon"), || {
            let err = env_parse_or("PARSE_ME", 15u64).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "PARSE_ME"));
        });
    }

    #[test]
    fn test_env_parse_opt() {
        temp_env::with_var_unset("MAYBE", || {
            assert_eq!(env_parse_opt::<u64>("MAYBE").unwrap(), None);
        });
        temp_env::with_var("MAYBE", Some("7"), || {
            assert_eq!(env_parse_opt::<u64>("MAYBE").unwrap(), Some(7));
        });
    }

    #[test]
    fn test_env_parse_nonzero_rejects_zero() {
        temp_env::with_var("TIMEOUT_SECS", Some("0"), || {
            let err = env_parse_nonzero_or("TIMEOUT_SECS", 15).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "TIMEOUT_SECS"));
            assert!(env_parse_nonzero_opt("TIMEOUT_SECS").is_err());
        });
        temp_env::with_var("TIMEOUT_SECS", Some("3"), || {
            assert_eq!(env_parse_nonzero_or("TIMEOUT_SECS", 15).unwrap(), 3);
        });
        temp_env::with_var_unset("TIMEOUT_SECS", || {
            assert_eq!(env_parse_nonzero_or("TIMEOUT_SECS", 15).unwrap(), 15);
            assert_eq!(env_parse_nonzero_opt("TIMEOUT_SECS").unwrap(), None);
        });
    }
}
