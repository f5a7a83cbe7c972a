//! Trait abstractions for collaborator I/O
//!
//! These traits let the dialogue engine run against in-memory doubles.

use super::{Operation, Project, ServiceError};
use crate::dialogue::{TestCase, TestModel};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Lookup of the projects a channel is linked to
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    async fn list_projects_linked_to(&self, channel: &str) -> Result<Vec<Project>, ServiceError>;
}

/// Access to the API documents of microservices
#[async_trait]
pub trait SpecService: Send + Sync {
    /// Operations offered by the component with `component_id`
    async fn get_operations_for(&self, component_id: i64) -> Result<Vec<Operation>, ServiceError>;
}

/// Hand-off of a finished dialogue
#[async_trait]
pub trait Finalizer: Send + Sync {
    /// Store a modeled test as a suggestion for a microservice (chat dialect)
    async fn persist(&self, suggestion: &TestSuggestion) -> Result<(), ServiceError>;

    /// Render a test case as test method source (issue dialect)
    async fn generate_code(&self, test_case: &TestCase) -> Result<String, ServiceError>;
}

/// Test model suggested for a microservice
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuggestion {
    pub component_id: i64,
    pub test_model: TestModel,
    pub description: String,
}

#[async_trait]
impl<T: ProjectDirectory + ?Sized> ProjectDirectory for Arc<T> {
    async fn list_projects_linked_to(&self, channel: &str) -> Result<Vec<Project>, ServiceError> {
        (**self).list_projects_linked_to(channel).await
    }
}

#[async_trait]
impl<T: SpecService + ?Sized> SpecService for Arc<T> {
    async fn get_operations_for(&self, component_id: i64) -> Result<Vec<Operation>, ServiceError> {
        (**self).get_operations_for(component_id).await
    }
}

#[async_trait]
impl<T: Finalizer + ?Sized> Finalizer for Arc<T> {
    async fn persist(&self, suggestion: &TestSuggestion) -> Result<(), ServiceError> {
        (**self).persist(suggestion).await
    }

    async fn generate_code(&self, test_case: &TestCase) -> Result<String, ServiceError> {
        (**self).generate_code(test_case).await
    }
}
