//! Test-modeling dialogue
//!
//! A conversation walks a fixed, dialect-specific sequence of states. Each
//! inbound message is one turn of the [`DialogueEngine`]: the answer for the
//! waiting state is consumed, then every state the conversation cascades
//! into asks its question, until one needs user input or the dialogue is
//! finished.

mod chat;
mod context;
mod engine;
mod handler;
mod intent;
mod issue;
mod messages;
mod shared;
mod state;
mod store;
mod test_model;

#[cfg(test)]
mod proptests;

pub use chat::ChatHandler;
pub use context::{BodyAssertionKind, DialogueContext, PathParameterSet};
pub use engine::{DialogueEngine, ProductionEngine};
pub use intent::Intent;
pub use issue::IssueHandler;
pub use state::{Dialect, DialogueState};
pub use store::ChannelContextStore;
pub use test_model::{TestCase, TestModel};

#[allow(unused_imports)] // Public API re-exports
pub use context::ParameterError;
#[allow(unused_imports)]
pub use engine::StepOutcome;
#[allow(unused_imports)]
pub use intent::HttpMethod;
#[allow(unused_imports)]
pub use handler::{DialogueHandler, ResponseText, Turn, ValidationError};
#[allow(unused_imports)]
pub use store::ContextGuard;
#[allow(unused_imports)]
pub use test_model::{NumberedAssertion, TestRequest};
