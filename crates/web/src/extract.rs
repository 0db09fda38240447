use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;
use workout_storage::dto::common::LimitOffsetParams;

use crate::error::WebError;

/// JSON body that is parsed against a closed schema and then validated.
///
/// Unknown fields fail at parse time because every request type uses
/// `deny_unknown_fields`; constraint failures come from `Validate`. Both are
/// reported as `400 Bad Request` before a handler runs.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(Self(value))
    }
}

/// `limit`/`offset` query string, checked against the allowed page sizes.
pub struct Pagination(pub LimitOffsetParams);

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<LimitOffsetParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| WebError::BadRequest(rejection.body_text()))?;

        params.validate().map_err(WebError::BadRequest)?;

        Ok(Self(params))
    }
}
