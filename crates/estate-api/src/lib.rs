//! # estate-api
//!
//! HTTP API layer for Estate Hub built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, origin guard, logging),
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
