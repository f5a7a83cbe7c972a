//! Exported test model handed to the finalizer

use crate::assertion::RequestAssertion;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestModel {
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    pub name: String,
    pub requests: Vec<TestRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRequest {
    pub method: String,
    pub path: String,
    pub path_params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub assertions: Vec<NumberedAssertion>,
}

/// Assertion with the id assigned at export time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberedAssertion {
    pub id: u32,
    #[serde(flatten)]
    pub assertion: RequestAssertion,
}

impl TestRequest {
    /// Path with every known parameter value substituted. Parameters without
    /// a value stay visible as `<Enter name>`.
    pub fn url(&self) -> String {
        self.path_params
            .iter()
            .fold(self.path.clone(), |url, (name, value)| {
                let value = if value.is_empty() {
                    format!("<Enter {name}>")
                } else {
                    value.clone()
                };
                url.replace(&format!("{{{name}}}"), &value)
            })
    }

    /// Markdown summary posted to issue threads
    pub fn describe(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "**Method & Path:** `{}` `{}`", self.method, self.url());
        if let Some(body) = self.body.as_deref().filter(|b| !b.is_empty()) {
            let _ = writeln!(text, "**Body:**\n```json\n{body}\n```");
        }
        text.push_str("**Assertions:**\n");
        for numbered in &self.assertions {
            let _ = writeln!(text, "- {}", numbered.assertion);
        }
        text
    }
}
