//! Property listing use cases.

pub mod service;

pub use service::PropertyService;
