//! Per-channel dialogue context

use super::test_model::{NumberedAssertion, TestCase, TestModel, TestRequest};
use super::{Dialect, DialogueState};
use crate::assertion::{BodyAssertion, BodyAssertionOperator, RequestAssertion};
use crate::services::{Component, Operation, Project};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("all path parameters already have a value")]
    Complete,
}

/// Values entered for the declared path parameters of an operation.
///
/// Values are filled strictly in declaration order. Once every declared name
/// has a value the set is frozen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParameterSet {
    declared: Vec<String>,
    values: BTreeMap<String, String>,
}

impl PathParameterSet {
    pub fn new<I, S>(declared: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in declared {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Self {
            declared: names,
            values: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    #[cfg(test)]
    pub fn has_parameters(&self) -> bool {
        !self.declared.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.values.len() == self.declared.len()
    }

    /// First declared parameter that has no value yet
    pub fn next_unset(&self) -> Option<&str> {
        self.declared
            .iter()
            .find(|name| !self.values.contains_key(*name))
            .map(String::as_str)
    }

    /// Assign `value` to the next unset parameter and return its name.
    pub fn set_next(&mut self, value: impl Into<String>) -> Result<String, ParameterError> {
        let name = self
            .next_unset()
            .map(str::to_string)
            .ok_or(ParameterError::Complete)?;
        self.values.insert(name.clone(), value.into());
        Ok(name)
    }

    /// Replace every `{name}` placeholder that has a value.
    pub fn apply_to(&self, path: &str) -> String {
        self.values
            .iter()
            .fold(path.to_string(), |url, (name, value)| {
                url.replace(&format!("{{{name}}}"), value)
            })
    }
}

/// The six shapes of body assertion a user can pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyAssertionKind {
    TypeCheck,
    FieldCheck,
    AnyListEntryTypeCheck,
    AnyListEntryFieldCheck,
    AllListEntriesTypeCheck,
    AllListEntriesFieldCheck,
}

impl BodyAssertionKind {
    pub const COUNT: usize = 6;

    /// Kind for a 1-based menu choice
    pub fn from_choice(choice: usize) -> Option<Self> {
        match choice {
            1 => Some(BodyAssertionKind::TypeCheck),
            2 => Some(BodyAssertionKind::FieldCheck),
            3 => Some(BodyAssertionKind::AnyListEntryTypeCheck),
            4 => Some(BodyAssertionKind::AnyListEntryFieldCheck),
            5 => Some(BodyAssertionKind::AllListEntriesTypeCheck),
            6 => Some(BodyAssertionKind::AllListEntriesFieldCheck),
            _ => None,
        }
    }

    /// Type checks end the chain; field checks may be refined further.
    pub fn is_type_check(self) -> bool {
        matches!(
            self,
            BodyAssertionKind::TypeCheck
                | BodyAssertionKind::AnyListEntryTypeCheck
                | BodyAssertionKind::AllListEntriesTypeCheck
        )
    }

    /// Wrap a basic operator in the list quantifier this kind asks for.
    pub fn wrap(self, basic: BodyAssertionOperator) -> BodyAssertionOperator {
        match self {
            BodyAssertionKind::TypeCheck | BodyAssertionKind::FieldCheck => basic,
            BodyAssertionKind::AnyListEntryTypeCheck | BodyAssertionKind::AnyListEntryFieldCheck => {
                BodyAssertionOperator::any_list_entry(basic)
            }
            BodyAssertionKind::AllListEntriesTypeCheck
            | BodyAssertionKind::AllListEntriesFieldCheck => {
                BodyAssertionOperator::all_list_entries(basic)
            }
        }
    }
}

/// State and accumulated test model of one conversation
#[derive(Debug, Clone)]
pub struct DialogueContext {
    channel: String,
    dialect: Dialect,
    state: DialogueState,

    pub test_case_name: Option<String>,
    pub request_method: Option<String>,
    pub request_path: Option<String>,
    pub path_parameters: PathParameterSet,
    pub request_body: Option<String>,
    assertions: Vec<RequestAssertion>,

    wip_kind: Option<BodyAssertionKind>,
    wip_chain: Option<BodyAssertionOperator>,

    // Candidate lists, written by lookups and read by numbered choices
    pub projects: Vec<Project>,
    pub project: Option<Project>,
    pub microservices: Vec<Component>,
    pub microservice: Option<Component>,
    pub operations: Vec<Operation>,
}

impl DialogueContext {
    pub fn new(channel: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            channel: channel.into(),
            dialect,
            state: DialogueState::Init,
            test_case_name: None,
            request_method: None,
            request_path: None,
            path_parameters: PathParameterSet::default(),
            request_body: None,
            assertions: Vec::new(),
            wip_kind: None,
            wip_chain: None,
            projects: Vec::new(),
            project: None,
            microservices: Vec::new(),
            microservice: None,
            operations: Vec::new(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn is_final(&self) -> bool {
        self.state.is_final()
    }

    /// Move to `next`; the move must be in the dialect's transition table.
    pub fn move_to(&mut self, next: DialogueState) {
        debug_assert!(
            self.state.can_move_to(next, self.dialect),
            "illegal move {:?} -> {next:?} in {:?} dialect",
            self.state,
            self.dialect
        );
        tracing::trace!(channel = %self.channel, from = ?self.state, to = ?next, "state move");
        self.state = next;
    }

    pub fn assertions(&self) -> &[RequestAssertion] {
        &self.assertions
    }

    /// Append an assertion unless one with the same text exists.
    ///
    /// Returns whether the assertion was added.
    pub fn add_assertion(&mut self, assertion: impl Into<RequestAssertion>) -> bool {
        let assertion = assertion.into();
        let text = assertion.to_string();
        if self.assertions.iter().any(|a| a.to_string() == text) {
            return false;
        }
        self.assertions.push(assertion);
        true
    }

    pub fn wip_kind(&self) -> Option<BodyAssertionKind> {
        self.wip_kind
    }

    pub fn set_wip_kind(&mut self, kind: BodyAssertionKind) {
        self.wip_kind = Some(kind);
    }

    pub fn wip_chain(&self) -> Option<&BodyAssertionOperator> {
        self.wip_chain.as_ref()
    }

    /// Attach `operator` to the end of the in-progress chain, starting one if
    /// there is none.
    pub fn extend_wip(&mut self, operator: BodyAssertionOperator) {
        match &mut self.wip_chain {
            Some(chain) => chain.link(operator),
            None => self.wip_chain = Some(operator),
        }
    }

    /// Move the in-progress chain into the assertion list and clear all
    /// in-progress fields.
    ///
    /// Returns `None` when nothing was in progress, otherwise whether the
    /// chain was new.
    pub fn commit_wip(&mut self) -> Option<bool> {
        self.wip_kind = None;
        let chain = self.wip_chain.take()?;
        Some(self.add_assertion(BodyAssertion::new(chain)))
    }

    /// Method, path and every path parameter are known, so there is
    /// something to hand off
    pub fn request_is_complete(&self) -> bool {
        self.request_method.is_some()
            && self.request_path.is_some()
            && self.path_parameters.is_complete()
    }

    /// Request path with path parameter values filled in
    pub fn request_url(&self) -> String {
        self.request_path
            .as_deref()
            .map(|path| self.path_parameters.apply_to(path))
            .unwrap_or_default()
    }

    /// Export the accumulated test model, numbering assertions and
    /// operator nodes.
    pub fn to_test_model(&self) -> TestModel {
        let mut next_operator_id = 0;
        let assertions = self
            .assertions
            .iter()
            .cloned()
            .zip(0u32..)
            .map(|(mut assertion, id)| {
                if let RequestAssertion::Body(body) = &mut assertion {
                    body.operator.assign_ids(&mut next_operator_id);
                }
                NumberedAssertion { id, assertion }
            })
            .collect();

        let request = TestRequest {
            method: self.request_method.clone().unwrap_or_default(),
            path: self.request_path.clone().unwrap_or_default(),
            path_params: self.path_parameters.values().clone(),
            body: self.request_body.clone(),
            assertions,
        };

        TestModel {
            test_cases: vec![TestCase {
                name: self.test_case_name.clone().unwrap_or_default(),
                requests: vec![request],
            }],
        }
    }
}
