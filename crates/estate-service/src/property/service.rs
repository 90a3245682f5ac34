//! Property listing CRUD with optional photo replacement.

use std::sync::Arc;

use tracing::{info, warn};

use estate_core::error::AppError;
use estate_database::repositories::PropertyRepository;
use estate_entity::property::{Property, RawPropertyFields};

use crate::upload::{PhotoUpload, StoredPhoto, UploadService};

/// Creates, lists, updates and deletes property listings.
#[derive(Debug, Clone)]
pub struct PropertyService {
    /// Property repository.
    property_repo: Arc<PropertyRepository>,
    /// Photo storage.
    uploads: Arc<UploadService>,
    /// Delete photo files that no listing references any more.
    remove_orphaned_photos: bool,
}

impl PropertyService {
    /// Creates a new property service.
    pub fn new(
        property_repo: Arc<PropertyRepository>,
        uploads: Arc<UploadService>,
        remove_orphaned_photos: bool,
    ) -> Self {
        Self {
            property_repo,
            uploads,
            remove_orphaned_photos,
        }
    }

    /// Insert a listing, storing its photo first when one was sent.
    pub async fn create(
        &self,
        fields: RawPropertyFields,
        photo: Option<PhotoUpload>,
    ) -> Result<Property, AppError> {
        let mut new_property = fields.into_new_property()?;

        let stored = self.store_photo(photo).await?;
        new_property.photo_url = stored.as_ref().map(|p| p.url.clone());

        match self.property_repo.create(&new_property).await {
            Ok(property) => {
                info!(
                    property_id = property.id,
                    user_id = property.user_id,
                    has_photo = property.photo_url.is_some(),
                    "Property created"
                );
                Ok(property)
            }
            Err(e) => {
                self.discard(stored).await;
                Err(e)
            }
        }
    }

    /// All listings of one owner, with read-time defaults applied.
    ///
    /// An owner without listings yields an empty list.
    pub async fn list(&self, user_id: i32) -> Result<Vec<Property>, AppError> {
        let properties = self.property_repo.find_by_owner(user_id).await?;
        Ok(properties
            .into_iter()
            .map(Property::with_read_defaults)
            .collect())
    }

    /// Replace a listing's editable fields.
    ///
    /// The stored photo is kept unless a new one is sent.
    pub async fn update(
        &self,
        id: i32,
        fields: RawPropertyFields,
        photo: Option<PhotoUpload>,
    ) -> Result<Property, AppError> {
        let mut changes = fields.into_changes();

        let stored = self.store_photo(photo).await?;
        changes.photo_url = stored.as_ref().map(|p| p.url.clone());

        let updated = match self.property_repo.update(id, &changes).await {
            Ok(Some(updated)) => updated,
            Ok(None) => {
                self.discard(stored).await;
                return Err(AppError::not_found("Property not found."));
            }
            Err(e) => {
                self.discard(stored).await;
                return Err(e);
            }
        };

        info!(
            property_id = id,
            photo_replaced = stored.is_some(),
            "Property updated"
        );

        if stored.is_some() {
            if let Some(previous) = updated.previous_photo_url.as_deref() {
                if updated.property.photo_url.as_deref() != Some(previous) {
                    self.release_photo(previous).await;
                }
            }
        }

        Ok(updated.property)
    }

    /// Delete a listing.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let removed = self
            .property_repo
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Property not found."))?;

        info!(property_id = removed.id, "Property deleted");

        if let Some(url) = removed.photo_url.as_deref() {
            self.release_photo(url).await;
        }

        Ok(())
    }

    async fn store_photo(&self, photo: Option<PhotoUpload>) -> Result<Option<StoredPhoto>, AppError> {
        match photo {
            Some(upload) if !upload.is_empty() => Ok(Some(self.uploads.store(upload).await?)),
            _ => Ok(None),
        }
    }

    /// Remove a freshly stored photo whose listing write did not happen.
    async fn discard(&self, stored: Option<StoredPhoto>) {
        let Some(stored) = stored else { return };
        if let Err(e) = self.uploads.remove(&stored.url).await {
            warn!(file_name = %stored.file_name, error = %e, "Failed to remove unused photo");
        }
    }

    /// Delete a photo no listing points at any more, when orphan removal is on.
    async fn release_photo(&self, url: &str) {
        if !self.remove_orphaned_photos {
            return;
        }

        match self.property_repo.count_photo_references(url).await {
            Ok(0) => {
                if let Err(e) = self.uploads.remove(url).await {
                    warn!(url, error = %e, "Failed to remove orphaned photo");
                }
            }
            Ok(_) => {}
            Err(e) => warn!(url, error = %e, "Could not check photo references"),
        }
    }
}
