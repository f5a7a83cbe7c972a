//! API request and response types

use serde::{Deserialize, Serialize};

/// Classified message forwarded by the messenger integration
#[derive(Debug, Deserialize)]
pub struct ModelRequest {
    /// Intent token chosen by the classifier
    pub intent: String,
    #[serde(default)]
    pub msg: String,
    /// Messenger the message came from; selects the dialect of new
    /// conversations
    #[serde(default)]
    pub messenger: String,
    pub channel: String,
}

#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub text: String,
    #[serde(rename = "closeContext")]
    pub close_context: bool,
}

#[derive(Debug, Serialize)]
pub struct EvictResponse {
    pub evicted: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
