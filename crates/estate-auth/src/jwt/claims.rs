//! JWT claims structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use estate_core::error::AppError;
use estate_entity::user::UserType;

/// Claims payload embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID in decimal.
    pub sub: String,
    /// Email at the time of issuance.
    pub email: String,
    /// Account type at the time of issuance.
    #[serde(rename = "type")]
    pub user_type: UserType,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issuer.
    pub iss: String,
    /// Unique token ID.
    pub jti: Uuid,
}

impl Claims {
    /// Parses the user ID from the subject claim.
    pub fn user_id(&self) -> Result<i32, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::authentication("Invalid token subject"))
    }
}
