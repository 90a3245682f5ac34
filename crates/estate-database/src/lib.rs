//! # estate-database
//!
//! PostgreSQL connection management, the idempotent schema initializer, and
//! concrete repository implementations for users and properties.

pub mod connection;
pub mod repositories;
pub mod schema;

pub use connection::DatabasePool;
