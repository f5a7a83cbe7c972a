//! Assertions attached to a test request

use super::BodyAssertionOperator;
use serde::Serialize;
use std::fmt;

/// How an actual status code is compared with the expected one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    #[default]
    Equals,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOperator::Equals => f.write_str("equals"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCodeAssertion {
    pub comparison: ComparisonOperator,
    pub status_code: u16,
}

impl StatusCodeAssertion {
    pub fn equals(status_code: u16) -> Self {
        Self {
            comparison: ComparisonOperator::Equals,
            status_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyAssertion {
    pub operator: BodyAssertionOperator,
}

impl BodyAssertion {
    pub fn new(operator: BodyAssertionOperator) -> Self {
        Self { operator }
    }
}

/// A single check on the response to a test request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestAssertion {
    StatusCode(StatusCodeAssertion),
    Body(BodyAssertion),
}

impl From<StatusCodeAssertion> for RequestAssertion {
    fn from(assertion: StatusCodeAssertion) -> Self {
        RequestAssertion::StatusCode(assertion)
    }
}

impl From<BodyAssertion> for RequestAssertion {
    fn from(assertion: BodyAssertion) -> Self {
        RequestAssertion::Body(assertion)
    }
}

impl fmt::Display for RequestAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestAssertion::StatusCode(a) => {
                write!(f, "Status code {} {}", a.comparison, a.status_code)
            }
            RequestAssertion::Body(a) => write!(f, "Response body {}", a.operator),
        }
    }
}
