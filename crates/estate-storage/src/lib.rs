//! # estate-storage
//!
//! Storage for uploaded listing photos: the local filesystem provider and the
//! collision-resistant naming scheme for stored files.

pub mod naming;
pub mod providers;

pub use naming::stored_file_name;
pub use providers::LocalStorageProvider;
