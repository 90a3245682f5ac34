//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use estate_auth::jwt::{JwtDecoder, JwtEncoder};
use estate_auth::password::PasswordHasher;
use estate_core::config::AppConfig;
use estate_core::traits::storage::StorageProvider;
use estate_database::DatabasePool;
use estate_database::repositories::{PropertyRepository, UserRepository};
use estate_service::{AuthService, PropertyService, UploadService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Registration, login and token resolution
    pub auth_service: Arc<AuthService>,
    /// Property listing CRUD
    pub property_service: Arc<PropertyService>,
    /// Photo storage
    pub upload_service: Arc<UploadService>,
}

impl AppState {
    /// Wire repositories and services on top of a pool and a storage backend.
    pub fn new(config: AppConfig, db: DatabasePool, storage: Arc<dyn StorageProvider>) -> Self {
        let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
        let property_repo = Arc::new(PropertyRepository::new(db.pool().clone()));

        let auth_service = Arc::new(AuthService::new(
            user_repo,
            Arc::new(PasswordHasher::new()),
            Arc::new(JwtEncoder::new(&config.auth)),
            Arc::new(JwtDecoder::new(&config.auth)),
        ));

        let upload_service = Arc::new(UploadService::new(storage, config.storage.clone()));

        let property_service = Arc::new(PropertyService::new(
            property_repo,
            Arc::clone(&upload_service),
            config.storage.remove_orphaned_photos,
        ));

        Self {
            config: Arc::new(config),
            db,
            auth_service,
            property_service,
            upload_service,
        }
    }
}
