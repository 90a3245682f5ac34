//! # estate-service
//!
//! Business logic service layer for Estate Hub. Each service orchestrates
//! repositories, the storage provider, and credential handling to implement
//! one group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod property;
pub mod upload;

pub use auth::{AuthService, LoginOutcome, RegisterUser};
pub use property::PropertyService;
pub use upload::{PhotoUpload, StoredPhoto, UploadService};
