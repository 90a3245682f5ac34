//! Property listing handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use estate_core::error::AppError;
use estate_entity::property::Property;

use crate::dto::response::{MessageResponse, PropertyCreatedResponse};
use crate::error::ApiError;
use crate::extractors::{PropertyForm, parse_id};
use crate::state::AppState;

/// POST /api/properties
pub async fn create_property(
    State(state): State<AppState>,
    form: PropertyForm,
) -> Result<(StatusCode, Json<PropertyCreatedResponse>), ApiError> {
    let property = state
        .property_service
        .create(form.fields, form.photo)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PropertyCreatedResponse {
            message: "Property added successfully".to_string(),
            photo_path: property.photo_url,
        }),
    ))
}

/// GET /api/properties?user_id=...
pub async fn list_properties(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Property>>, ApiError> {
    let user_id = params
        .get("user_id")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation("user_id is required"))?
        .parse::<i32>()
        .map_err(|_| AppError::validation("user_id must be an integer"))?;

    let properties = state.property_service.list(user_id).await?;
    if properties.is_empty() {
        return Err(AppError::not_found("No properties found for this user.").into());
    }

    Ok(Json(properties))
}

/// PUT /api/properties/{id}
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: PropertyForm,
) -> Result<Json<Property>, ApiError> {
    let id = parse_id(&id)?;
    let property = state
        .property_service
        .update(id, form.fields, form.photo)
        .await?;
    Ok(Json(property))
}

/// DELETE /api/properties/{id}
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.property_service.delete(id).await?;
    Ok(Json(MessageResponse::new("Property deleted successfully.")))
}
