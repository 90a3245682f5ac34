//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;
pub mod property_form;

pub use auth::AuthUser;
pub use json::ValidatedJson;
pub use path::parse_id;
pub use property_form::PropertyForm;
