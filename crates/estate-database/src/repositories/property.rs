//! Property repository implementation.

use sqlx::{FromRow, PgPool};

use estate_core::error::{AppError, ErrorKind};
use estate_core::result::AppResult;
use estate_entity::property::{NewProperty, Property, PropertyChanges};

/// Column list for every property read. `tax_records` is NUMERIC in storage.
const PROPERTY_COLUMNS: &str = "id, user_id, location, age, floor_plan, bedrooms, \
     additional_facilities, garden, parking, proximity_facilities, proximity_main_roads, \
     tax_records::FLOAT8 AS tax_records, photo_url";

/// Name PostgreSQL gives the `properties.user_id` foreign key.
const OWNER_FOREIGN_KEY: &str = "properties_user_id_fkey";

/// Result of an update: the row as written and the photo URL it replaced.
#[derive(Debug, Clone)]
pub struct PropertyUpdate {
    /// The updated row.
    pub property: Property,
    /// `photo_url` before the update.
    pub previous_photo_url: Option<String>,
}

/// What remains known about a deleted property.
#[derive(Debug, Clone, FromRow)]
pub struct RemovedProperty {
    /// ID of the deleted row.
    pub id: i32,
    /// Photo the row referenced.
    pub photo_url: Option<String>,
}

/// Repository for property CRUD.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    /// Create a new property repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a property and return the stored row.
    pub async fn create(&self, data: &NewProperty) -> AppResult<Property> {
        let sql = format!(
            "INSERT INTO properties \
             (user_id, location, age, floor_plan, bedrooms, additional_facilities, garden, parking, \
              proximity_facilities, proximity_main_roads, tax_records, photo_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {PROPERTY_COLUMNS}"
        );

        sqlx::query_as::<_, Property>(&sql)
            .bind(data.user_id)
            .bind(&data.location)
            .bind(&data.age)
            .bind(&data.floor_plan)
            .bind(data.bedrooms)
            .bind(&data.additional_facilities)
            .bind(data.garden)
            .bind(data.parking)
            .bind(data.proximity_facilities)
            .bind(data.proximity_main_roads)
            .bind(data.tax_records)
            .bind(&data.photo_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some(OWNER_FOREIGN_KEY) =>
                {
                    AppError::validation(format!("User {} does not exist", data.user_id))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to save property", e),
            })
    }

    /// Find a property by primary key.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Property>> {
        let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find property by id", e)
            })
    }

    /// List every property owned by a user, oldest first.
    pub async fn find_by_owner(&self, user_id: i32) -> AppResult<Vec<Property>> {
        let sql = format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE user_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, Property>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list properties", e)
            })
    }

    /// Replace a property's editable columns.
    ///
    /// The row is locked, rewritten with a single statement that keeps the
    /// stored `photo_url` when `changes.photo_url` is `None`, and returned as
    /// written, all inside one transaction. Returns `None` for an unknown id.
    pub async fn update(&self, id: i32, changes: &PropertyChanges) -> AppResult<Option<PropertyUpdate>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let previous: Option<(Option<String>,)> =
            sqlx::query_as("SELECT photo_url FROM properties WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock property", e)
                })?;

        let Some((previous_photo_url,)) = previous else {
            return Ok(None);
        };

        let sql = format!(
            "UPDATE properties \
             SET location = $1, age = $2, floor_plan = $3, bedrooms = $4, \
                 additional_facilities = $5, garden = $6, parking = $7, \
                 proximity_facilities = $8, proximity_main_roads = $9, \
                 tax_records = $10, photo_url = COALESCE($11, photo_url) \
             WHERE id = $12 \
             RETURNING {PROPERTY_COLUMNS}"
        );

        let property = sqlx::query_as::<_, Property>(&sql)
            .bind(&changes.location)
            .bind(&changes.age)
            .bind(&changes.floor_plan)
            .bind(changes.bedrooms)
            .bind(&changes.additional_facilities)
            .bind(changes.garden)
            .bind(changes.parking)
            .bind(changes.proximity_facilities)
            .bind(changes.proximity_main_roads)
            .bind(changes.tax_records)
            .bind(&changes.photo_url)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update property", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit property update", e)
        })?;

        Ok(Some(PropertyUpdate {
            property,
            previous_photo_url,
        }))
    }

    /// Delete a property by ID. Returns `None` when no row matched.
    pub async fn delete(&self, id: i32) -> AppResult<Option<RemovedProperty>> {
        sqlx::query_as::<_, RemovedProperty>(
            "DELETE FROM properties WHERE id = $1 RETURNING id, photo_url",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete property", e))
    }

    /// Count properties that still reference a photo URL.
    pub async fn count_photo_references(&self, photo_url: &str) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM properties WHERE photo_url = $1")
            .bind(photo_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count photo references", e)
            })
    }
}
