//! Request DTOs with validation.
//!
//! Missing fields deserialize as empty strings so that absence and blankness
//! produce the same validation message.

use serde::{Deserialize, Serialize};
use validator::Validate;

use estate_service::RegisterUser;

/// Login request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email and password are required."))]
    pub email: String,
    /// Password.
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "Email and password are required."))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(length(min = 1, message = "All fields are required."))]
    pub email: String,
    /// Password.
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "All fields are required."))]
    pub password: String,
    /// Given name.
    #[serde(rename = "firstName", alias = "first_name")]
    #[validate(length(min = 1, message = "All fields are required."))]
    pub first_name: String,
    /// Family name.
    #[serde(rename = "lastName", alias = "last_name")]
    #[validate(length(min = 1, message = "All fields are required."))]
    pub last_name: String,
    /// `buyer` or `seller`.
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "All fields are required."))]
    pub user_type: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            user_type: req.user_type,
        }
    }
}
