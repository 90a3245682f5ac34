//! `PropertyForm` extractor: listing fields plus an optional photo.
//!
//! Accepts `multipart/form-data` (text fields and a `photo` file part),
//! `application/json` (string, number or boolean values) and
//! `application/x-www-form-urlencoded`. A request without a body type
//! carries no fields.

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde_json::{Map, Value};

use estate_core::error::AppError;
use estate_entity::property::RawPropertyFields;
use estate_service::PhotoUpload;

use crate::error::ApiError;

/// Multipart field name carrying the listing photo.
pub const PHOTO_FIELD: &str = "photo";

/// Listing fields as sent by the client.
#[derive(Debug, Clone, Default)]
pub struct PropertyForm {
    /// Uncoerced text values.
    pub fields: RawPropertyFields,
    /// The uploaded photo, if any.
    pub photo: Option<PhotoUpload>,
}

impl<S> FromRequest<S> for PropertyForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|rejection| AppError::validation(rejection.body_text()))?;
            return Ok(read_multipart(multipart).await?);
        }

        if content_type.starts_with("application/json") {
            let Json(object) = Json::<Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::validation(rejection.body_text()))?;
            return Ok(Self {
                fields: fields_from_json(object),
                photo: None,
            });
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::validation(rejection.body_text()))?;
            let mut fields = RawPropertyFields::default();
            for (name, value) in pairs {
                fields.set(&name, value);
            }
            return Ok(Self {
                fields,
                photo: None,
            });
        }

        if content_type.is_empty() {
            return Ok(Self::default());
        }

        Err(AppError::validation(format!("Unsupported content type: {content_type}")).into())
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<PropertyForm, AppError> {
    let mut form = PropertyForm::default();
    let mut seen_photo = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or("").to_string();

        if field.file_name().is_some() {
            if name != PHOTO_FIELD {
                return Err(AppError::validation(format!("Unexpected file field: {name}")));
            }
            if seen_photo {
                return Err(AppError::validation("Only one photo may be uploaded"));
            }
            seen_photo = true;

            let file_name = field.file_name().map(String::from);
            let content_type = field.content_type().map(String::from);
            let data = field.bytes().await.map_err(|e| {
                AppError::validation(format!("Failed to read photo: {}", e.body_text()))
            })?;

            form.photo = Some(PhotoUpload {
                file_name,
                content_type,
                data,
            });
        } else {
            let value = field.text().await.map_err(|e| {
                AppError::validation(format!("Failed to read field {name}: {}", e.body_text()))
            })?;
            form.fields.set(&name, value);
        }
    }

    Ok(form)
}

fn fields_from_json(object: Map<String, Value>) -> RawPropertyFields {
    let mut fields = RawPropertyFields::default();
    for (name, value) in object {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => continue,
        };
        fields.set(&name, text);
    }
    fields
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    use super::*;

    const BOUNDARY: &str = "X-ESTATE-BOUNDARY";

    fn multipart_request(parts: &[(&str, Option<(&str, &str)>, &str)]) -> Request {
        let mut body = String::new();
        for (name, file, value) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file {
                Some((file_name, mime)) => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                    ));
                    body.push_str(&format!("Content-Type: {mime}\r\n\r\n"));
                }
                None => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                    ));
                }
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        HttpRequest::builder()
            .method("POST")
            .uri("/api/properties")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_multipart_fields_and_photo() {
        let req = multipart_request(&[
            ("user_id", None, "4"),
            ("location", None, "Riverside"),
            ("garden", None, "true"),
            ("photo", Some(("porch.png", "image/png")), "PNGDATA"),
        ]);

        let form = PropertyForm::from_request(req, &()).await.unwrap();
        assert_eq!(form.fields.user_id.as_deref(), Some("4"));
        assert_eq!(form.fields.location.as_deref(), Some("Riverside"));
        assert_eq!(form.fields.garden.as_deref(), Some("true"));

        let photo = form.photo.unwrap();
        assert_eq!(photo.file_name.as_deref(), Some("porch.png"));
        assert_eq!(photo.content_type.as_deref(), Some("image/png"));
        assert_eq!(&photo.data[..], b"PNGDATA");
    }

    #[tokio::test]
    async fn test_second_photo_rejected() {
        let req = multipart_request(&[
            ("photo", Some(("a.png", "image/png")), "A"),
            ("photo", Some(("b.png", "image/png")), "B"),
        ]);
        let err = PropertyForm::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.0.message, "Only one photo may be uploaded");
    }

    #[tokio::test]
    async fn test_file_under_other_name_rejected() {
        let req = multipart_request(&[("document", Some(("a.pdf", "application/pdf")), "A")]);
        let err = PropertyForm::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.0.message, "Unexpected file field: document");
    }

    #[tokio::test]
    async fn test_json_scalars_become_text() {
        let req = HttpRequest::builder()
            .method("PUT")
            .uri("/api/properties/1")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"bedrooms":3,"parking":true,"tax_records":"1200.50","age":null,"extra":[1]}"#,
            ))
            .unwrap();

        let form = PropertyForm::from_request(req, &()).await.unwrap();
        assert_eq!(form.fields.bedrooms.as_deref(), Some("3"));
        assert_eq!(form.fields.parking.as_deref(), Some("true"));
        assert_eq!(form.fields.tax_records.as_deref(), Some("1200.50"));
        assert_eq!(form.fields.age, None);
        assert!(form.photo.is_none());
    }

    #[tokio::test]
    async fn test_no_body_type_means_no_fields() {
        let req = HttpRequest::builder()
            .method("PUT")
            .uri("/api/properties/1")
            .body(Body::empty())
            .unwrap();
        let form = PropertyForm::from_request(req, &()).await.unwrap();
        assert_eq!(form.fields, RawPropertyFields::default());
    }
}
