use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BootstrapError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Missing service key; set BOOTSTRAP_SERVICE_KEY")]
    MissingServiceKey,

    #[error("Service key is not a valid header value")]
    InvalidServiceKey,

    #[error("table name must not be empty")]
    EmptyTableName,

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("{error}")]
    Remote { status: StatusCode, error: RemoteError },
}

impl BootstrapError {
    /// The remote-owned error body, if the failure came from the procedure endpoint.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            BootstrapError::Remote { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<figment::Error> for BootstrapError {
    fn from(e: figment::Error) -> Self {
        BootstrapError::Config(Box::new(e))
    }
}

/// Error body returned by the procedure endpoint. Every field is owned by the remote side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<Value>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            details: None,
            hint: None,
        }
    }

    /// Decode an error response body. Any JSON object with a string `message` keeps its
    /// fields as sent; anything else becomes the message text.
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        if let Ok(Value::Object(mut obj)) = serde_json::from_str::<Value>(body)
            && let Some(Value::String(message)) = obj.remove("message")
        {
            let mut field = |name: &str| obj.remove(name).filter(|v| !v.is_null());
            return Self {
                message,
                code: field("code"),
                details: field("details"),
                hint: field("hint"),
            };
        }
        let text = body.trim();
        if text.is_empty() {
            Self::new(status.canonical_reason().unwrap_or("remote procedure failed"))
        } else {
            Self::new(text)
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RemoteError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_postgrest_error_body() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"permission denied for schema public"}"#;
        let err = RemoteError::from_body(StatusCode::FORBIDDEN, body);
        assert_eq!(err.message, "permission denied for schema public");
        assert_eq!(err.code, Some(Value::from("42501")));
        assert_eq!(err.details, None);
    }

    #[test]
    fn numeric_code_is_kept_with_message() {
        let body = r#"{"code":401,"message":"Invalid JWT"}"#;
        let err = RemoteError::from_body(StatusCode::UNAUTHORIZED, body);
        assert_eq!(err.message, "Invalid JWT");
        assert_eq!(err.code, Some(Value::from(401)));
        assert_eq!(err.to_string(), "Invalid JWT");
    }

    #[test]
    fn structured_details_are_kept() {
        let body = r#"{"code":"42501","message":"permission denied","details":{"table":"transactions"}}"#;
        let err = RemoteError::from_body(StatusCode::FORBIDDEN, body);
        assert_eq!(err.message, "permission denied");
        assert_eq!(err.code, Some(Value::from("42501")));
        assert_eq!(err.details, Some(serde_json::json!({ "table": "transactions" })));
        assert_eq!(err.hint, None);
    }

    #[test]
    fn json_without_message_falls_back_to_text() {
        let err = RemoteError::from_body(StatusCode::BAD_REQUEST, r#"{"error":"bad"}"#);
        assert_eq!(err.message, r#"{"error":"bad"}"#);
        assert_eq!(err.code, None);
    }

    #[test]
    fn plain_text_body_becomes_message() {
        let err = RemoteError::from_body(StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(err, RemoteError::new("upstream down"));
    }

    #[test]
    fn empty_body_uses_status_reason() {
        let err = RemoteError::from_body(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err.message, "Service Unavailable");
    }

    #[test]
    fn remote_variant_displays_message_verbatim() {
        let err = BootstrapError::Remote {
            status: StatusCode::UNAUTHORIZED,
            error: RemoteError::new("Invalid API key"),
        };
        assert_eq!(err.to_string(), "Invalid API key");
        assert_eq!(err.remote().map(|e| e.message.as_str()), Some("Invalid API key"));
    }
}
