//! Registration, login and admin bootstrap.

pub mod service;

pub use service::{AuthService, LoginOutcome, RegisterUser};
