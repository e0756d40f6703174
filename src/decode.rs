//! Response decoding
//!
//! Turns raw StrawPoll response text into JSON, surfacing the service's
//! error payloads and its plain-text `Bad Request` reply as [`Error`]s.

use serde_json::Value;

use crate::error::{ApiError, Error};

/// Plain-text body the service returns for malformed requests.
pub const BAD_REQUEST_BODY: &str = "Bad Request";

/// Decode a raw response body.
///
/// Returns the parsed JSON unchanged unless it is an error payload.
pub fn decode_response(raw: &str) -> Result<Value, Error> {
    let body = raw.trim();
    if body == BAD_REQUEST_BODY {
        tracing::warn!("StrawPoll rejected the request as malformed");
        return Err(Error::BadRequest(ApiError::from_message(body)));
    }

    let value: Value = serde_json::from_str(body)?;

    if let Some(error) = value.get("error") {
        let err = ApiError::new(value.get("code").and_then(parse_code), error_message(error));
        tracing::warn!(code = ?err.code(), message = ?err.message(), "StrawPoll returned an error");
        return Err(Error::Service(err));
    }

    Ok(value)
}

fn parse_code(code: &Value) -> Option<i64> {
    match code {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn error_message(error: &Value) -> Option<String> {
    match error {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
