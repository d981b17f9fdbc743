// src/common/extract.rs

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::common::error::AppError;

/// `Json<T>` whose rejection is reported as a validation error.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(AppPath(value))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(AppQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::error::ErrorKind, models::auth::UpdateDepartmentPayload};
    use axum::{
        body::Body,
        http::{header, Request as HttpRequest},
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Filter {
        #[allow(dead_code)]
        limit: Option<u32>,
    }

    fn json_request(body: &'static str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_field_is_a_validation_error() {
        let err = AppJson::<Payload>::from_request(json_request(r#"{"other":1}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let err = AppJson::<Payload>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn missing_content_type_is_a_validation_error() {
        let req = HttpRequest::builder().method("POST").uri("/").body(Body::from("{}")).unwrap();
        let err = AppJson::<Payload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        assert!(AppJson::<Payload>::from_request(json_request(r#"{"name":"x"}"#), &()).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_department_is_a_validation_error() {
        let req = json_request(r#"{"department":"marketing"}"#);
        let err = AppJson::<UpdateDepartmentPayload>::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn bad_query_value_is_a_validation_error() {
        let (mut parts, _) = HttpRequest::builder().uri("/?limit=many").body(()).unwrap().into_parts();
        let err = AppQuery::<Filter>::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
