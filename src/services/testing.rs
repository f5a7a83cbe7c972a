//! In-memory collaborators for tests

use super::traits::*;
use super::{Component, ComponentKind, Operation, Project, ServiceError};
use crate::dialogue::TestCase;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

// ============================================================================
// Project directory
// ============================================================================

/// Directory answering from a fixed channel → projects map
#[derive(Default)]
pub struct MockProjectDirectory {
    projects: Mutex<HashMap<String, Vec<Project>>>,
    fail: Mutex<bool>,
    pub calls: Mutex<Vec<String>>,
}

impl MockProjectDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn link(&self, channel: &str, project: Project) {
        self.projects
            .lock()
            .unwrap()
            .entry(channel.to_string())
            .or_default()
            .push(project);
    }

    /// Make every following lookup fail
    pub fn fail(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ProjectDirectory for MockProjectDirectory {
    async fn list_projects_linked_to(&self, channel: &str) -> Result<Vec<Project>, ServiceError> {
        self.calls.lock().unwrap().push(channel.to_string());
        if *self.fail.lock().unwrap() {
            return Err(ServiceError::network("project service unreachable"));
        }
        Ok(self
            .projects
            .lock()
            .unwrap()
            .get(channel)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Spec service
// ============================================================================

#[derive(Default)]
pub struct MockSpecService {
    operations: Mutex<HashMap<i64, Vec<Operation>>>,
    fail: Mutex<bool>,
}

impl MockSpecService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&self, component_id: i64, operation: Operation) {
        self.operations
            .lock()
            .unwrap()
            .entry(component_id)
            .or_default()
            .push(operation);
    }

    pub fn fail(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl SpecService for MockSpecService {
    async fn get_operations_for(&self, component_id: i64) -> Result<Vec<Operation>, ServiceError> {
        if *self.fail.lock().unwrap() {
            return Err(ServiceError::status("spec service returned 503"));
        }
        Ok(self
            .operations
            .lock()
            .unwrap()
            .get(&component_id)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Finalizer
// ============================================================================

/// Finalizer that records every hand-off
#[derive(Default)]
pub struct RecordingFinalizer {
    pub suggestions: Mutex<Vec<TestSuggestion>>,
    pub generated: Mutex<Vec<TestCase>>,
    code: Mutex<Option<String>>,
}

impl RecordingFinalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Code returned by `generate_code`; without it generation fails
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Mutex::new(Some(code.into())),
            ..Self::default()
        }
    }

    pub fn suggestions(&self) -> Vec<TestSuggestion> {
        self.suggestions.lock().unwrap().clone()
    }

    pub fn generated(&self) -> Vec<TestCase> {
        self.generated.lock().unwrap().clone()
    }
}

#[async_trait]
impl Finalizer for RecordingFinalizer {
    async fn persist(&self, suggestion: &TestSuggestion) -> Result<(), ServiceError> {
        self.suggestions.lock().unwrap().push(suggestion.clone());
        Ok(())
    }

    async fn generate_code(&self, test_case: &TestCase) -> Result<String, ServiceError> {
        self.generated.lock().unwrap().push(test_case.clone());
        self.code
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ServiceError::status("code generation returned 500"))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn microservice(id: i64, name: &str) -> Component {
    Component {
        id,
        name: name.to_string(),
        kind: ComponentKind::Microservice,
    }
}

pub fn project(id: i64, name: &str, components: Vec<Component>) -> Project {
    Project {
        id,
        name: name.to_string(),
        components,
    }
}

pub fn operation(method: &str, path: &str, params: &[&str]) -> Operation {
    Operation {
        method: method.to_string(),
        path: path.to_string(),
        path_parameter_names: params.iter().map(|p| p.to_string()).collect(),
    }
}
