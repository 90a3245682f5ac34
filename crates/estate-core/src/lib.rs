//! # estate-core
//!
//! Core crate for Estate Hub. Contains the configuration schema and loader,
//! the unified error system, and the storage provider trait implemented by
//! `estate-storage`.
//!
//! This crate has **no** internal dependencies on other Estate Hub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
