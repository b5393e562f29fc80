//! Request extractors shared by the API handlers.

use std::str::FromStr;

use axum::{
    Form, Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{HeaderValue, header::CONTENT_TYPE, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::Validate;

/// A validated request body, accepted as JSON or as
/// `application/x-www-form-urlencoded`.
///
/// Any content type other than a urlencoded form is parsed as JSON. The
/// media type is matched case-insensitively and parameters are ignored.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(mut req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = if is_form(&req) {
            // `Form` only recognises the lower-case spelling.
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            value
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            value
        };

        value.validate()?;
        Ok(Self(value))
    }
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

/// A typed id taken from the single `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId<T>(pub T);

impl<S, T> FromRequestParts<S> for ResourceId<T>
where
    S: Send + Sync,
    T: FromStr + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        raw.parse::<T>()
            .map(Self)
            .map_err(|_| AppError::BadRequest(format!("invalid id: {raw}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request as HttpRequest, StatusCode},
        routing::{get, post},
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    use resto_core::OrderId;

    use super::*;
    use crate::models::ValidationError;

    #[derive(Debug, Deserialize)]
    struct Greeting {
        name: String,
        times: u8,
    }

    impl Validate for Greeting {
        fn validate(&self) -> Result<(), ValidationError> {
            if self.name.is_empty() {
                return Err(ValidationError::Empty { field: "name" });
            }
            Ok(())
        }
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/greet",
                post(|Payload(g): Payload<Greeting>| async move {
                    format!("{}x{}", g.name, g.times)
                }),
            )
            .route(
                "/orders/{id}",
                get(|ResourceId(id): ResourceId<OrderId>| async move { id.to_string() }),
            )
    }

    async fn send(request: HttpRequest<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_json_body() {
        let (status, body) = send(
            HttpRequest::post("/greet")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"ayu","times":2}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ayux2");
    }

    #[tokio::test]
    async fn test_form_body() {
        let (status, body) = send(
            HttpRequest::post("/greet")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("name=ayu&times=3"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ayux3");
    }

    #[tokio::test]
    async fn test_form_content_type_is_case_insensitive() {
        for content_type in [
            "Application/X-WWW-Form-Urlencoded",
            "APPLICATION/X-WWW-FORM-URLENCODED; charset=UTF-8",
        ] {
            let (status, body) = send(
                HttpRequest::post("/greet")
                    .header(CONTENT_TYPE, content_type)
                    .body(Body::from("name=ayu&times=4"))
                    .unwrap(),
            )
            .await;
            assert_eq!(status, StatusCode::OK, "{content_type}");
            assert_eq!(body, "ayux4");
        }
    }

    #[tokio::test]
    async fn test_validation_failure_is_bad_request() {
        let (status, body) = send(
            HttpRequest::post("/greet")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"","times":1}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("name"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, _) = send(
            HttpRequest::post("/greet")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resource_id() {
        let (status, body) = send(HttpRequest::get("/orders/12").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "12");

        let (status, body) =
            send(HttpRequest::get("/orders/abc").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("invalid id: abc"));
    }
}
