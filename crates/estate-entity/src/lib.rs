//! # estate-entity
//!
//! Domain entity models for Estate Hub. Every struct in this crate represents
//! a database table row or a write command derived from client input.
//! Database rows derive `sqlx::FromRow`.

pub mod property;
pub mod user;
