//! Classified intents
//!
//! Natural-language classification happens upstream; the engine only sees
//! the resulting token.

use crate::assertion::ExpectedType;
use serde::Deserialize;
use std::fmt;

/// HTTP methods a request-method intent can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intent attached to an inbound message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Intent {
    BeginModeling,
    Yes,
    No,
    RequestMethod(HttpMethod),
    Type(ExpectedType),
    /// Any token outside the vocabulary
    Unrecognized(String),
}

impl Intent {
    /// Map a classifier token to an intent. Never fails.
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "modeltest" => Intent::BeginModeling,
            "yes" => Intent::Yes,
            "no" => Intent::No,
            "request_method_get" => Intent::RequestMethod(HttpMethod::Get),
            "request_method_post" => Intent::RequestMethod(HttpMethod::Post),
            "request_method_put" => Intent::RequestMethod(HttpMethod::Put),
            "request_method_delete" => Intent::RequestMethod(HttpMethod::Delete),
            "type_jsonobject" => Intent::Type(ExpectedType::JsonObject),
            "type_jsonarray" => Intent::Type(ExpectedType::JsonArray),
            "type_string" => Intent::Type(ExpectedType::String),
            "type_number" => Intent::Type(ExpectedType::Number),
            "type_boolean" => Intent::Type(ExpectedType::Boolean),
            other => Intent::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Intent {
    fn from(token: String) -> Self {
        Intent::from_token(&token)
    }
}

impl From<&str> for Intent {
    fn from(token: &str) -> Self {
        Intent::from_token(token)
    }
}
