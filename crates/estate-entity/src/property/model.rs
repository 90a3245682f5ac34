//! Property entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Value reported for `age` when none was stored.
pub const DEFAULT_AGE: &str = "1";

/// Value reported for `bedrooms` when none was stored.
pub const DEFAULT_BEDROOMS: i32 = 1;

/// A real-estate listing owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Property {
    /// Server-generated identifier.
    pub id: i32,
    /// Owning user.
    pub user_id: i32,
    /// Free-text location.
    pub location: Option<String>,
    /// Text-encoded age category.
    pub age: Option<String>,
    /// Free-text floor plan description.
    pub floor_plan: Option<String>,
    /// Number of bedrooms.
    pub bedrooms: Option<i32>,
    /// Free-text list of extra facilities.
    pub additional_facilities: Option<String>,
    /// Whether the property has a garden.
    pub garden: bool,
    /// Whether the property has parking.
    pub parking: bool,
    /// Distance to (or count of) nearby facilities.
    pub proximity_facilities: Option<i32>,
    /// Distance to (or count of) nearby main roads.
    pub proximity_main_roads: Option<i32>,
    /// Tax records value, two decimal places in storage.
    pub tax_records: Option<f64>,
    /// Absolute URL of the uploaded photo.
    pub photo_url: Option<String>,
}

impl Property {
    /// Fill read-time defaults for columns that were never set.
    ///
    /// A blank `age` counts as unset. Defaults are applied to the returned
    /// value only, never written back.
    pub fn with_read_defaults(mut self) -> Self {
        if self.age.as_deref().is_none_or(|age| age.trim().is_empty()) {
            self.age = Some(DEFAULT_AGE.to_string());
        }
        if self.bedrooms.is_none() {
            self.bedrooms = Some(DEFAULT_BEDROOMS);
        }
        self
    }
}
