//! Body assertion operators
//!
//! An operator is one predicate node. Nodes form a singly linked chain via
//! `followed_by`; each successor applies to the value selected by its
//! predecessor (e.g. the value of a field). Every node is owned by exactly
//! one predecessor, so a node can never be shared between two chains.

use serde::{Deserialize, Serialize};
use std::fmt;

/// JSON type a type-check operator expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpectedType {
    #[serde(rename = "JSONObject")]
    JsonObject,
    #[serde(rename = "JSONArray")]
    JsonArray,
    String,
    Number,
    Boolean,
}

impl ExpectedType {
    pub fn as_str(self) -> &'static str {
        match self {
            ExpectedType::JsonObject => "JSONObject",
            ExpectedType::JsonArray => "JSONArray",
            ExpectedType::String => "String",
            ExpectedType::Number => "Number",
            ExpectedType::Boolean => "Boolean",
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single operator node checks
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperatorKind {
    /// Value has the given JSON type
    TypeCheck { expected: ExpectedType },
    /// Value is an object containing the field
    HasField { field: String },
    /// Value is a list and at least one entry satisfies the operand
    AnyListEntry { operand: Box<BodyAssertionOperator> },
    /// Value is a list and every entry satisfies the operand
    AllListEntries { operand: Box<BodyAssertionOperator> },
}

/// One node of a body assertion chain
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyAssertionOperator {
    /// Assigned only when the finished test model is exported
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u32>,
    #[serde(flatten)]
    kind: OperatorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    followed_by: Option<Box<BodyAssertionOperator>>,
}

impl BodyAssertionOperator {
    fn new(kind: OperatorKind) -> Self {
        Self {
            id: None,
            kind,
            followed_by: None,
        }
    }

    pub fn type_check(expected: ExpectedType) -> Self {
        Self::new(OperatorKind::TypeCheck { expected })
    }

    pub fn has_field(field: impl Into<String>) -> Self {
        Self::new(OperatorKind::HasField {
            field: field.into(),
        })
    }

    pub fn any_list_entry(operand: BodyAssertionOperator) -> Self {
        Self::new(OperatorKind::AnyListEntry {
            operand: Box::new(operand),
        })
    }

    pub fn all_list_entries(operand: BodyAssertionOperator) -> Self {
        Self::new(OperatorKind::AllListEntries {
            operand: Box::new(operand),
        })
    }

    #[cfg(test)]
    pub fn kind(&self) -> &OperatorKind {
        &self.kind
    }

    #[cfg(test)]
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    #[cfg(test)]
    pub fn followed_by(&self) -> Option<&BodyAssertionOperator> {
        self.followed_by.as_deref()
    }

    /// Make `next` the successor of the last node of this chain.
    ///
    /// `next` is moved in, so it cannot already belong to another chain.
    pub fn link(&mut self, next: BodyAssertionOperator) {
        match self.followed_by {
            Some(ref mut successor) => successor.link(next),
            None => self.followed_by = Some(Box::new(next)),
        }
    }

    /// Builder form of [`link`](Self::link).
    #[cfg(test)]
    pub fn then(mut self, next: BodyAssertionOperator) -> Self {
        self.link(next);
        self
    }

    /// Last node of the chain (the node a successor would attach to)
    pub fn tail(&self) -> &BodyAssertionOperator {
        self.followed_by.as_deref().map_or(self, Self::tail)
    }

    /// Number of nodes reachable through `followed_by`, this one included
    #[cfg(test)]
    pub fn chain_len(&self) -> usize {
        1 + self.followed_by.as_deref().map_or(0, Self::chain_len)
    }

    /// Field checked by this node, looking through list quantifiers.
    pub fn field_name(&self) -> Option<&str> {
        match &self.kind {
            OperatorKind::HasField { field } => Some(field),
            OperatorKind::AnyListEntry { operand } | OperatorKind::AllListEntries { operand } => {
                operand.field_name()
            }
            OperatorKind::TypeCheck { .. } => None,
        }
    }

    /// Number every node of the chain, depth first (operand before successor).
    pub fn assign_ids(&mut self, next_id: &mut u32) {
        self.id = Some(*next_id);
        *next_id += 1;
        match &mut self.kind {
            OperatorKind::AnyListEntry { operand } | OperatorKind::AllListEntries { operand } => {
                operand.assign_ids(next_id);
            }
            OperatorKind::TypeCheck { .. } | OperatorKind::HasField { .. } => {}
        }
        if let Some(successor) = &mut self.followed_by {
            successor.assign_ids(next_id);
        }
    }
}

/// Canonical text of the whole chain starting at this node.
///
/// Used for previews and for duplicate detection.
impl fmt::Display for BodyAssertionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            OperatorKind::TypeCheck { expected } => write!(f, "has type {expected}")?,
            OperatorKind::HasField { field } => write!(f, "has field \"{field}\"")?,
            OperatorKind::AnyListEntry { operand } => {
                write!(f, "is a list where any entry {operand}")?;
            }
            OperatorKind::AllListEntries { operand } => {
                write!(f, "is a list where every entry {operand}")?;
            }
        }
        if let Some(successor) = &self.followed_by {
            write!(f, ", whose value {successor}")?;
        }
        Ok(())
    }
}
