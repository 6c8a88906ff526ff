//! Custom Axum extractors
//!
//! Rejections are reported as validation errors so that a bad path id or a
//! malformed body never reaches storage.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use crate::models::{ValidationError, ValidationErrors};

/// Extract an integer todo id from the path
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ValidationError::Missing { field: "id" })?;

        let id = raw.parse::<i64>().map_err(|_| ValidationError::Malformed {
            field: "id",
            reason: format!("'{}' is not a valid integer", raw),
        })?;

        Ok(Self(id))
    }
}

/// Parse a JSON body and validate it into a transfer contract
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: TryFrom<Value, Error = ValidationErrors>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::Malformed {
                field: "body",
                reason: rejection.body_text(),
            })?;

        Ok(Self(T::try_from(value)?))
    }
}
