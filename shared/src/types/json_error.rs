use serde::{Deserialize, Serialize};

/// Error envelope returned by every failing endpoint.
///
/// `code` is stable and meant for programmatic matching; `message` is for
/// humans and may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}
