// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::common::error::AppError;

const ORG_ID_HEADER: &str = "x-org-id";

#[derive(Debug, Deserialize)]
struct OrgQuery {
    org_id: Option<Uuid>,
}

/// The organization the caller asked to act on, if any.
///
/// Read from the `x-org-id` header, else the `org_id` query parameter.
/// Whether the request may use it is decided by the scope policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestedOrg(pub Option<Uuid>);

impl RequestedOrg {
    fn from_parts(parts: &Parts) -> Result<Self, AppError> {
        if let Some(value) = parts.headers.get(ORG_ID_HEADER) {
            let org_id = value
                .to_str()
                .ok()
                .and_then(|s| Uuid::parse_str(s.trim()).ok())
                .ok_or_else(|| AppError::InvalidInput("x-org-id header is not a valid UUID".into()))?;
            return Ok(RequestedOrg(Some(org_id)));
        }

        let query = Query::<OrgQuery>::try_from_uri(&parts.uri)
            .map_err(|_| AppError::InvalidInput("org_id query parameter is not a valid UUID".into()))?;
        Ok(RequestedOrg(query.0.org_id))
    }
}

impl<S> FromRequestParts<S> for RequestedOrg
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        RequestedOrg::from_parts(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(uri: &str, header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = header {
            builder = builder.header(ORG_ID_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn header_wins_over_query() {
        let header_org = Uuid::new_v4();
        let query_org = Uuid::new_v4();
        let parts = parts(&format!("/api/stock?org_id={query_org}"), Some(&header_org.to_string()));
        assert_eq!(RequestedOrg::from_parts(&parts).unwrap().0, Some(header_org));
    }

    #[test]
    fn query_parameter_is_read() {
        let org = Uuid::new_v4();
        let parts = parts(&format!("/api/stock?org_id={org}"), None);
        assert_eq!(RequestedOrg::from_parts(&parts).unwrap().0, Some(org));
    }

    #[test]
    fn absent_means_none() {
        let parts = parts("/api/stock?role=admin", None);
        assert_eq!(RequestedOrg::from_parts(&parts).unwrap().0, None);
    }

    #[test]
    fn malformed_header_is_rejected() {
        let parts = parts("/api/stock", Some("not-a-uuid"));
        assert!(matches!(RequestedOrg::from_parts(&parts), Err(AppError::InvalidInput(_))));
    }
}
