//! Production collaborators talking to the surrounding services over HTTP

use super::traits::*;
use super::{Component, Operation, Project, ServiceError};
use crate::dialogue::TestCase;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// HTTP methods an OpenAPI path item may define
const OPENAPI_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Shared client for all collaborators
pub fn client(timeout: Duration) -> Result<Client, ServiceError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ServiceError::network(format!("Failed to create HTTP client: {e}")))
}

/// Send `request` and return the body of a successful response.
async fn fetch(request: RequestBuilder) -> Result<String, ServiceError> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ServiceError::network(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            ServiceError::network(format!("Connection failed: {e}"))
        } else {
            ServiceError::network(format!("Request failed: {e}"))
        }
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ServiceError::network(format!("Failed to read response: {e}")))?;

    if !status.is_success() {
        return Err(ServiceError::status(format!("{status}: {body}")));
    }
    Ok(body)
}

fn base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

// ============================================================================
// Project directory
// ============================================================================

pub struct HttpProjectDirectory {
    client: Client,
    base_url: String,
}

impl HttpProjectDirectory {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base(base_url),
        }
    }
}

/// Chat type of projects whose channel is a chat room
const ROCKET_CHAT: &str = "RocketChat";

#[derive(Debug, Deserialize)]
struct ProjectList {
    projects: Vec<ProjectRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRecord {
    #[serde(default)]
    id: i64,
    name: String,
    #[serde(default)]
    metadata: ProjectMetadata,
    #[serde(default)]
    chat_info: Option<ChatInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectMetadata {
    #[serde(default)]
    components: Vec<Component>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatInfo {
    #[serde(rename = "type")]
    kind: String,
    channel_id: String,
}

impl ChatInfo {
    fn is_chat_room(&self, channel: &str) -> bool {
        self.kind == ROCKET_CHAT && self.channel_id == channel
    }
}

fn projects_linked_to(records: Vec<ProjectRecord>, channel: &str) -> Vec<Project> {
    records
        .into_iter()
        .filter(|r| r.chat_info.as_ref().is_some_and(|c| c.is_chat_room(channel)))
        .map(|r| Project {
            id: r.id,
            name: r.name,
            components: r.metadata.components,
        })
        .collect()
}

#[async_trait]
impl ProjectDirectory for HttpProjectDirectory {
    async fn list_projects_linked_to(&self, channel: &str) -> Result<Vec<Project>, ServiceError> {
        let url = format!("{}/projects", self.base_url);
        let body = fetch(self.client.get(&url)).await?;
        let list: ProjectList = serde_json::from_str(&body)
            .map_err(|e| ServiceError::decode(format!("Failed to parse projects: {e}")))?;

        let projects = projects_linked_to(list.projects, channel);
        tracing::debug!(channel, count = projects.len(), "projects linked to channel");
        Ok(projects)
    }
}

// ============================================================================
// Spec service
// ============================================================================

pub struct HttpSpecService {
    client: Client,
    base_url: String,
}

impl HttpSpecService {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base(base_url),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocResponse {
    doc_string: String,
}

/// Flatten the `paths` of an OpenAPI document into operations, in document
/// order.
fn operations_from_openapi(doc: &Value) -> Result<Vec<Operation>, ServiceError> {
    let paths = doc
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| ServiceError::decode("API document has no paths"))?;

    let mut operations = Vec::new();
    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            continue;
        };
        let shared = path_parameter_names(item.get("parameters"));

        for (method, operation) in item {
            if !OPENAPI_METHODS.contains(&method.as_str()) {
                continue;
            }
            let mut names = shared.clone();
            for name in path_parameter_names(operation.get("parameters")) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            for name in placeholders(path) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
            operations.push(Operation {
                method: method.clone(),
                path: path.clone(),
                path_parameter_names: names,
            });
        }
    }
    Ok(operations)
}

/// Names of the `in: path` entries of a parameter list
fn path_parameter_names(parameters: Option<&Value>) -> Vec<String> {
    parameters
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|p| p.get("in").and_then(Value::as_str) == Some("path"))
        .filter_map(|p| p.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// `{name}` placeholders of a path template
fn placeholders(path: &str) -> Vec<String> {
    path.split('/')
        .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl SpecService for HttpSpecService {
    async fn get_operations_for(&self, component_id: i64) -> Result<Vec<Operation>, ServiceError> {
        let url = format!("{}/docs/component/{component_id}", self.base_url);
        let body = fetch(self.client.get(&url)).await?;
        let response: DocResponse = serde_json::from_str(&body)
            .map_err(|e| ServiceError::decode(format!("Failed to parse doc response: {e}")))?;
        let doc: Value = serde_json::from_str(&response.doc_string)
            .map_err(|e| ServiceError::decode(format!("API document is no valid JSON: {e}")))?;

        let operations = operations_from_openapi(&doc)?;
        tracing::debug!(component_id, count = operations.len(), "operations loaded");
        Ok(operations)
    }
}

// ============================================================================
// Finalizer
// ============================================================================

pub struct HttpFinalizer {
    client: Client,
    persistence_url: String,
    code_generation_url: String,
}

impl HttpFinalizer {
    pub fn new(client: Client, persistence_url: &str, code_generation_url: &str) -> Self {
        Self {
            client,
            persistence_url: base(persistence_url),
            code_generation_url: base(code_generation_url),
        }
    }
}

#[async_trait]
impl Finalizer for HttpFinalizer {
    async fn persist(&self, suggestion: &TestSuggestion) -> Result<(), ServiceError> {
        let url = format!("{}/suggestions", self.persistence_url);
        fetch(self.client.post(&url).json(suggestion)).await?;
        Ok(())
    }

    async fn generate_code(&self, test_case: &TestCase) -> Result<String, ServiceError> {
        let url = format!("{}/test-method", self.code_generation_url);
        fetch(self.client.post(&url).json(test_case)).await
    }
}
