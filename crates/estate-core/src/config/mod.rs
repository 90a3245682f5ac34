//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `ESTATE__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::{AuthConfig, BootstrapAdminConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::storage::StorageConfig;

use crate::error::AppError;

/// Environment name in which development-only defaults are tolerated.
pub const DEVELOPMENT_ENV: &str = "development";

/// Root application configuration.
///
/// Built once at startup and passed explicitly to every component that needs
/// a setting; nothing reads configuration from globals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Photo upload settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Sources, lowest precedence first: compiled-in defaults,
    /// `config/default.toml`, `config/{env}.toml`, `ESTATE__*` environment
    /// variables, and finally a plain `PORT` variable for the listening port.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ESTATE")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors.allowed_origins")
                    .with_list_parse_key("storage.allowed_mime_types")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate_for(env)?;
        Ok(config)
    }

    /// [`validate`](Self::validate) plus the checks that depend on the
    /// environment name. The placeholder JWT secret is only accepted in
    /// `development`.
    pub fn validate_for(&self, env: &str) -> Result<(), AppError> {
        self.validate()?;
        if self.auth.uses_default_secret() && env != DEVELOPMENT_ENV {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret is the built-in placeholder; set ESTATE__AUTH__JWT_SECRET for the '{env}' environment"
            )));
        }
        Ok(())
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.storage.public_path.starts_with('/')
            || self.storage.public_path.trim_end_matches('/').is_empty()
        {
            return Err(AppError::configuration(format!(
                "storage.public_path must start with '/' and name a sub-path, got '{}'",
                self.storage.public_path
            )));
        }
        if self.auth.jwt_secret.len() < 16 {
            return Err(AppError::configuration(
                "auth.jwt_secret must be at least 16 bytes long",
            ));
        }
        if self.storage.max_upload_size_bytes == 0 {
            return Err(AppError::configuration(
                "storage.max_upload_size_bytes must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.storage.public_path, "/uploads");
    }

    #[test]
    fn test_relative_public_path_rejected() {
        let mut config = AppConfig::default();
        config.storage.public_path = "uploads".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_secret_only_allowed_in_development() {
        let config = AppConfig::default();
        assert!(config.auth.uses_default_secret());
        assert!(config.validate_for("development").is_ok());

        let err = config.validate_for("production").unwrap_err();
        assert!(err.message.contains("ESTATE__AUTH__JWT_SECRET"));
        assert!(config.validate_for("staging").is_err());
    }

    #[test]
    fn test_custom_secret_allowed_everywhere() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "a-real-secret-from-the-vault".to_string();
        assert!(!config.auth.uses_default_secret());
        assert!(config.validate_for("production").is_ok());
    }

    #[test]
    fn test_deserialize_partial_toml_sections() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\nport = 8081\n[database]\nhost = \"db.internal\"\nname = \"listings\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.name, "listings");
        assert_eq!(config.database.user, "postgres");
        assert!(!config.storage.remove_orphaned_photos);
    }
}
