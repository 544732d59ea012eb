/// Centralized helpers for WebSocket and HTTP error responses.
///
/// Use these helpers to ensure all error messages are consistent, explicit, and include a code and context.
use actix_web::{HttpResponse, http::StatusCode};
use serde_json::{json, Value};

pub const INVALID_COMMAND: &str = "INVALID_COMMAND";
pub const UNKNOWN_TOOL: &str = "UNKNOWN_TOOL";
pub const OUT_OF_BOUNDS: &str = "OUT_OF_BOUNDS";
pub const INVALID_SPEED: &str = "INVALID_SPEED";
pub const INVALID_DIMENSION: &str = "INVALID_DIMENSION";
pub const SIMULATION_LIMIT: &str = "SIMULATION_LIMIT";
pub const BANNED: &str = "BANNED";

/// Formats a WebSocket error message as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "UNKNOWN_TOOL").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional context (e.g. the offending coordinates).
pub fn ws_error_message(code: &str, message: &str, context: Option<Value>) -> String {
    json!({
        "action": "Error",
        "data": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(Value::Null),
        }
    })
    .to_string()
}

/// Returns an HTTP error response with a JSON body.
///
/// # Arguments
/// - `code`: Unique error code.
/// - `message`: Human-readable error message.
/// - `context`: Optional context value.
/// - `status`: HTTP status code.
pub fn http_error_response(
    code: &str,
    message: &str,
    context: Option<Value>,
    status: StatusCode,
) -> HttpResponse {
    HttpResponse::build(status).json(json!({
        "error": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(Value::Null),
        }
    }))
}
