//! Repository implementations for Estate Hub entities.

pub mod property;
pub mod user;

pub use property::{PropertyRepository, PropertyUpdate, RemovedProperty};
pub use user::UserRepository;
