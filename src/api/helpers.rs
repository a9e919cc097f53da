//! Response builders shared by the Lambda handlers.
//!
//! Every response is an API Gateway proxy object with a JSON string body and
//! permissive CORS headers.

use serde_json::{Value, json};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

#[must_use]
pub fn cors_headers() -> Value {
    json!({
        "content-type": "application/json",
        "access-control-allow-origin": "*",
        "access-control-allow-methods": "GET,POST,OPTIONS",
        "access-control-allow-headers": "content-type",
    })
}

/// Returns a response with the given status code and JSON body.
#[must_use]
pub fn json_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": cors_headers(),
        "body": body.to_string()
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}

/// Returns the opaque 500 used for any failure after validation.
#[must_use]
pub fn internal_error(request_id: &str) -> Value {
    json_response(
        500,
        &json!({ "error": INTERNAL_ERROR_MESSAGE, "request_id": request_id }),
    )
}

/// Returns the CORS preflight acknowledgement.
#[must_use]
pub fn preflight() -> Value {
    json_response(200, &json!({ "ok": true }))
}
