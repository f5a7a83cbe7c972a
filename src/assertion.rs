//! Response assertion model
//!
//! Body assertions are chains of operator nodes; status code assertions are
//! plain comparisons. The model is descriptive only and never evaluates a
//! response.

mod operator;
mod request;

#[cfg(test)]
mod proptests;

pub use operator::{BodyAssertionOperator, ExpectedType};
pub use request::{BodyAssertion, RequestAssertion, StatusCodeAssertion};
