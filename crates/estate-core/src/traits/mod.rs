//! Core traits defined in `estate-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
