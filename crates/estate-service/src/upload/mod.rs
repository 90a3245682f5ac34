//! Photo upload handling.

pub mod service;

pub use service::{PhotoUpload, StoredPhoto, UploadService};
