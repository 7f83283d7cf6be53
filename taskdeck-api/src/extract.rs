/// Request extractors
///
/// This module wraps Axum's `Json` extractor so that malformed request
/// bodies (invalid JSON, missing required fields, wrong types) are rejected
/// with 400 Bad Request in the standard error body, matching the rest of
/// the validation surface, instead of Axum's default 422.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::ApiError;

/// JSON body extractor with 400 rejections
///
/// Drop-in replacement for `axum::Json` on the request side; responses
/// still use `axum::Json` directly.
#[derive(Debug, Clone, Copy)]
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        Ok(ApiJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_field_rejected_with_400() {
        let req = json_request("{}");

        let result = ApiJson::<Payload>::from_request(req, &()).await;
        let err = result.expect_err("missing field should be rejected");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_json_rejected_with_400() {
        let req = json_request("not json");

        let result = ApiJson::<Payload>::from_request(req, &()).await;
        let err = result.expect_err("invalid json should be rejected");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_valid_body_accepted() {
        let req = json_request(r#"{"name": "Website"}"#);

        let result = ApiJson::<Payload>::from_request(req, &()).await;
        assert!(result.is_ok());
    }
}
