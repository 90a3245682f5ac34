//! Response DTOs.

use serde::{Deserialize, Serialize};

use estate_entity::user::PublicProfile;

/// Plain acknowledgment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Human-readable message.
    pub message: String,
    /// Signed bearer token.
    pub token: String,
    /// Public profile of the logged-in user.
    #[serde(rename = "userData")]
    pub user_data: PublicProfile,
}

/// Profile of the token holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// Public profile of the token holder.
    #[serde(rename = "userData")]
    pub user_data: PublicProfile,
}

/// Property creation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyCreatedResponse {
    /// Human-readable message.
    pub message: String,
    /// Public URL of the stored photo, or `null`.
    #[serde(rename = "photoPath")]
    pub photo_path: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Database reachability, `up` or `down`.
    pub database: String,
    /// Upload directory usability, `up` or `down`.
    pub storage: String,
}
