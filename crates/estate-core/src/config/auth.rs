//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Value of the `iss` claim, checked on decode.
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    /// Token TTL in minutes.
    #[serde(default = "default_ttl")]
    pub jwt_ttl_minutes: u64,
    /// Admin account created at startup when its email is not registered yet.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_issuer: default_jwt_issuer(),
            jwt_ttl_minutes: default_ttl(),
            bootstrap_admin: None,
        }
    }
}

impl AuthConfig {
    /// Placeholder secret shipped as the compiled-in default.
    pub const DEFAULT_JWT_SECRET: &'static str = "CHANGE_ME_IN_PRODUCTION";

    /// Whether the signing secret is still the shipped placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == Self::DEFAULT_JWT_SECRET
    }
}

/// Credentials for the startup admin account.
#[derive(Clone, Serialize, Deserialize)]
pub struct BootstrapAdminConfig {
    /// Admin login email.
    pub email: String,
    /// Admin plaintext password, hashed before insert.
    pub password: String,
    /// First name.
    #[serde(default = "default_admin_name")]
    pub first_name: String,
    /// Last name.
    #[serde(default = "default_admin_name")]
    pub last_name: String,
}

impl std::fmt::Debug for BootstrapAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdminConfig")
            .field("email", &self.email)
            .field("password", &"****")
            .finish()
    }
}

fn default_jwt_secret() -> String {
    AuthConfig::DEFAULT_JWT_SECRET.to_string()
}

fn default_jwt_issuer() -> String {
    "estate-hub".to_string()
}

fn default_ttl() -> u64 {
    720
}

fn default_admin_name() -> String {
    "admin".to_string()
}
