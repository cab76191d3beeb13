//! JSON body extractor for Axum
//!
//! `JsonBody<T>` works like `axum::Json<T>`, but every decoding failure
//! (bad syntax, missing or mistyped fields, wrong content type) is answered
//! with `400 Bad Request` and an `{"error": ...}` body. Handlers therefore
//! never see a malformed request.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

use super::ErrorResponse;

/// An extractor that deserializes a JSON request body.
///
/// ```ignore
/// async fn handler(JsonBody(body): JsonBody<Reservation>) {
///     // `body` decoded successfully
/// }
/// ```
pub struct JsonBody<T>(pub T);

/// Rejection returned when the body cannot be decoded.
pub struct JsonBodyRejection(JsonRejection);

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(self.0.body_text());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(JsonBodyRejection)?;
        Ok(JsonBody(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize)]
    struct TestBody {
        #[allow(dead_code)]
        name: String,
    }

    async fn handler(JsonBody(_body): JsonBody<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/test");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn error_of(resp: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let resp = app()
            .oneshot(request(Some("application/json"), r#"{"name":"a"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn syntax_error_returns_400() {
        let resp = app()
            .oneshot(request(Some("application/json"), "not json"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(!error_of(resp).await.error.is_empty());
    }

    #[tokio::test]
    async fn missing_field_returns_400() {
        let resp = app()
            .oneshot(request(Some("application/json"), r#"{"other": 1}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(error_of(resp).await.error.contains("name"));
    }

    #[tokio::test]
    async fn missing_content_type_returns_400() {
        let resp = app().oneshot(request(None, r#"{"name":"a"}"#)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
