//! User domain entities.

pub mod model;
pub mod user_type;

pub use model::{NewUser, PublicProfile, User};
pub use user_type::UserType;
