//! `ValidatedJson` extractor: JSON body plus `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use estate_core::error::AppError;

use crate::error::ApiError;

/// A JSON body that passed its `Validate` rules.
///
/// Malformed bodies and rule violations are both rejected with 400.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| AppError::validation(first_message(&errors)))?;

        Ok(Self(value))
    }
}

/// The message of the first failing rule, by field name order.
fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let mut names: Vec<_> = fields.keys().collect();
    names.sort();

    names
        .into_iter()
        .filter_map(|name| fields.get(name))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, header};

    use crate::dto::request::RegisterRequest;

    use super::*;

    fn json_request(body: &str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_fields_use_rule_message() {
        let err = ValidatedJson::<RegisterRequest>::from_request(
            json_request(r#"{"email":"a@b.c"}"#),
            &(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0.message, "All fields are required.");
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let err = ValidatedJson::<RegisterRequest>::from_request(json_request("{nope"), &())
            .await
            .unwrap_err();
        assert_eq!(err.0.kind, estate_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_accepts_camel_case_names() {
        let ValidatedJson(req) = ValidatedJson::<RegisterRequest>::from_request(
            json_request(
                r#"{"email":"a@b.c","password":"pw","firstName":"A","lastName":"B","type":"buyer"}"#,
            ),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(req.first_name, "A");
        assert_eq!(req.user_type, "buyer");
    }
}
