use axum::{
    async_trait,
    body::Bytes,
    extract::FromRequest,
    http::{header::CONTENT_TYPE, HeaderMap, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AppError;

// Raw bodies may be large; parsed JSON bodies get a much smaller cap.
pub const BODY_LIMIT: usize = 10 * 1024 * 1024;
pub const JSON_BODY_LIMIT: usize = 100 * 1024;

// Lenient JSON body. Only `application/json` bodies are parsed; anything else
// is read and dropped, leaving every field of `T` absent. Unlike `Json<T>` a
// wrong or missing content type is not a rejection.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    Bytes: FromRequest<S, B>,
    B: Send + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if !is_json {
            return Ok(JsonBody(T::default()));
        }
        parse_body(&bytes)
            .map(JsonBody)
            .map_err(IntoResponse::into_response)
    }
}

fn json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

// Top-level value must be an object or array; arrays carry no fields.
pub fn parse_body<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if bytes.len() > JSON_BODY_LIMIT {
        return Err(AppError::PayloadTooLarge(bytes.len()));
    }
    match bytes.iter().find(|byte| !byte.is_ascii_whitespace()) {
        None => return Ok(T::default()),
        Some(b'{') | Some(b'[') => {}
        Some(_) => return Err(AppError::BadRequest("body is not a JSON object")),
    }

    let value: Value =
        serde_json::from_slice(bytes).map_err(|_| AppError::BadRequest("malformed JSON body"))?;
    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|_| AppError::BadRequest("unexpected field type")),
        _ => Ok(T::default()),
    }
}
