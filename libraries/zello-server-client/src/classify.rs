//! Response classification.
//!
//! Every API response is a JSON document with a `code` field; `"200"` means
//! success. Anything that is not JSON never reaches the API tier and is
//! reported as [`ZelloClientError::Decode`].

use crate::error::{Result, ZelloClientError};
use serde_json::Value;
use tracing::debug;

/// Code the server uses for a successful call.
pub const SUCCESS_CODE: &str = "200";

/// Outcome of a call that produced a JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Whether the payload's `code` is `"200"`
    pub succeeded: bool,
    /// Full parsed document, including error details on failure
    pub payload: Value,
}

impl ApiResponse {
    /// Status code reported by the server.
    pub fn code(&self) -> Option<String> {
        match self.payload.get("code")? {
            Value::String(code) => Some(code.clone()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }

    /// Status text, which carries the error description on failure.
    pub fn status(&self) -> Option<&str> {
        self.payload.get("status").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// String field of the payload.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }

    /// Collapse the API tier into `Result`, turning a failure code into
    /// [`ZelloClientError::Api`].
    pub fn into_result(self) -> Result<Value> {
        if self.succeeded {
            return Ok(self.payload);
        }

        Err(ZelloClientError::Api {
            code: self.code().unwrap_or_default(),
            status: self.status().unwrap_or("unknown error").to_string(),
            payload: self.payload,
        })
    }
}

/// Classify a raw response body.
pub fn classify(body: &str) -> Result<ApiResponse> {
    let payload: Value = serde_json::from_str(body).map_err(|e| ZelloClientError::Decode {
        message: e.to_string(),
        body: body.to_string(),
    })?;

    let succeeded = is_success(&payload);
    debug!(succeeded, code = ?payload.get("code"), "Classified response");

    Ok(ApiResponse { succeeded, payload })
}

fn is_success(payload: &Value) -> bool {
    match payload.get("code") {
        Some(Value::String(code)) => code == SUCCESS_CODE,
        Some(Value::Number(code)) => code.as_u64() == Some(200),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success() {
        let response = classify(r#"{"status":"OK","code":"200","sid":"abc"}"#).unwrap();
        assert!(response.succeeded);
        assert_eq!(response.code().as_deref(), Some("200"));
        assert_eq!(response.get_str("sid"), Some("abc"));
    }

    #[test]
    fn test_api_failure_keeps_payload() {
        let response = classify(r#"{"status":"Invalid password","code":"301"}"#).unwrap();
        assert!(!response.succeeded);
        assert_eq!(response.status(), Some("Invalid password"));
        assert_eq!(response.code().as_deref(), Some("301"));
        assert_eq!(response.payload["code"], json!("301"));
    }

    #[test]
    fn test_numeric_code() {
        assert!(classify(r#"{"code":200}"#).unwrap().succeeded);
        assert!(!classify(r#"{"code":500}"#).unwrap().succeeded);
    }

    #[test]
    fn test_missing_code_is_api_failure() {
        let response = classify(r#"{"status":"OK"}"#).unwrap();
        assert!(!response.succeeded);
        assert_eq!(response.code(), None);

        let response = classify("[1, 2]").unwrap();
        assert!(!response.succeeded);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        match classify("<html>502 Bad Gateway</html>") {
            Err(ZelloClientError::Decode { body, .. }) => {
                assert!(body.contains("Bad Gateway"));
            }
            other => panic!("Expected Decode error, got: {:?}", other),
        }

        assert!(matches!(
            classify(""),
            Err(ZelloClientError::Decode { .. })
        ));
    }

    #[test]
    fn test_into_result() {
        let ok = classify(r#"{"code":"200","users":[]}"#).unwrap();
        assert_eq!(ok.into_result().unwrap()["users"], json!([]));

        let failed = classify(r#"{"code":"403","status":"Access denied"}"#).unwrap();
        match failed.into_result() {
            Err(ZelloClientError::Api {
                code,
                status,
                payload,
            }) => {
                assert_eq!(code, "403");
                assert_eq!(status, "Access denied");
                assert_eq!(payload["code"], json!("403"));
            }
            other => panic!("Expected Api error, got: {:?}", other),
        }
    }
}
