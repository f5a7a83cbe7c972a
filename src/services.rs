//! External collaborators consumed by the dialogue engine
//!
//! The engine depends only on the traits in [`traits`]; [`http`] holds the
//! production adapters and `testing` the in-memory doubles.

pub mod http;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use traits::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Project linked to a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Project {
    /// Components that can be tested, in declaration order
    pub fn microservices(&self) -> Vec<Component> {
        self.components
            .iter()
            .filter(|c| c.kind == ComponentKind::Microservice)
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Microservice,
    Frontend,
    #[serde(other)]
    Other,
}

/// Part of a project; only microservices carry a testable API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
}

/// One operation taken from a microservice's API document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub path_parameter_names: Vec<String>,
}

/// Failure of a collaborator call
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Network, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Status, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Decode, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// Connection failed or timed out
    Network,
    /// Collaborator answered with a non-success status
    Status,
    /// Response body could not be understood
    Decode,
}
