//! Request extractors.

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
    response::Response,
};
use serde::de::DeserializeOwned;
use tally_shared::AppError;

use crate::error::error_response;

/// Query-string extractor that rejects malformed filters with the JSON error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ReportQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(value)| Self(value))
            .map_err(|rejection| error_response(&AppError::Validation(rejection.body_text())))
    }
}
