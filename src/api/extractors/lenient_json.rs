//! Lenient JSON extractor - never rejects a body for being malformed.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;

/// JSON extractor that falls back to `T::default()` instead of rejecting.
///
/// Anything that is not a JSON object deserializable into `T` (an empty
/// body, a syntax error, an array, a field of the wrong type) yields the
/// default value, so presence checks downstream report the problem in
/// their own words. The `Content-Type` header is not inspected.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use user_registration::api::extractors::LenientJson;
///
/// #[derive(Default, Deserialize)]
/// struct Payload {
///     name: Option<String>,
/// }
///
/// async fn handler(LenientJson(payload): LenientJson<Payload>) {
///     // payload.name is None for `{}`, `[]` or `not json`
/// }
/// ```
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(LenientJson(parse_or_default(&bytes)))
    }
}

/// Decode a JSON object into `T`, or return `T::default()`.
pub fn parse_or_default<T>(bytes: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!("Request body does not match expected shape: {}", e);
            T::default()
        }),
        Ok(_) => {
            tracing::debug!("Request body is not a JSON object");
            T::default()
        }
        Err(e) => {
            tracing::debug!("Request body is not valid JSON: {}", e);
            T::default()
        }
    }
}
