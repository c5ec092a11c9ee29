use std::collections::HashMap;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::validation::RuleSet;

/// JSON body checked against `T`'s rules, then deserialized into `T`.
///
/// An empty body is validated as `{}`; a body that is not a JSON object is
/// rejected before any rule runs.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Query string checked against `T`'s rules, then deserialized into `T`.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: RuleSet + DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large(e.body_text())
            } else {
                ApiError::bad_request(e.body_text())
            }
        })?;

        let mut input = parse_body(&bytes)?;
        T::validate(&mut input).map_err(ApiError::validation_error)?;

        into_typed(input).map(ValidatedJson)
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: RuleSet + DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;

        let mut input: Map<String, Value> = raw
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        T::validate(&mut input).map_err(ApiError::validation_error)?;

        into_typed(input).map(ValidatedQuery)
    }
}

fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::bad_request("Request body must be a JSON object")),
        Err(e) => Err(ApiError::bad_request(format!("Malformed JSON body: {}", e))),
    }
}

fn into_typed<T: DeserializeOwned>(input: Map<String, Value>) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(input))
        .map_err(|e| ApiError::bad_request(format!("Unexpected field type: {}", e)))
}
