//! Request extractors bound to the core input schemas.
//!
//! Bodies may arrive as JSON or as urlencoded HTML form data. Decoding
//! failures become validation errors (400) instead of axum's default
//! plain-text rejections.

use crate::error::ApiError;
use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap},
    Form, Json,
};
use processo_core::{ProcessoBuscaInput, ProcessoFormInput, ProcessoValidationError};

/// Raw create/update body, not yet validated.
#[derive(Debug)]
pub struct ProcessoBody(pub ProcessoFormInput);

impl<S> FromRequest<S> for ProcessoBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_urlencoded_form(req.headers()) {
            let Form(input) = Form::<ProcessoFormInput>::from_request(req, state)
                .await
                .map_err(|rejection| malformed(rejection.body_text()))?;
            return Ok(Self(input));
        }

        let Json(input) = Json::<ProcessoFormInput>::from_request(req, state)
            .await
            .map_err(|rejection| malformed(rejection.body_text()))?;
        Ok(Self(input))
    }
}

/// Raw `?numero=` query, not yet validated.
#[derive(Debug)]
pub struct ProcessoQuery(pub ProcessoBuscaInput);

impl<S> FromRequestParts<S> for ProcessoQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(input) = Query::<ProcessoBuscaInput>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| malformed(rejection.body_text()))?;
        Ok(Self(input))
    }
}

fn is_urlencoded_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

fn malformed(details: String) -> ApiError {
    ApiError::Validation(ProcessoValidationError::MalformedBody(details))
}
