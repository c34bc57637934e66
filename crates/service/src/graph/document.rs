use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;
use crate::graph::name::GraphName;

/// A stored graph as returned by a named lookup: `{"name": ..., "data": ...}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GraphDocument {
    pub name: String,
    pub data: Value,
}

/// Save request body. Both fields are optional at the wire level so that a
/// missing field becomes a validation error rather than a parse failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SaveGraphInput {
    pub name: Option<String>,
    /// JSON `null` deserializes to `None` and is rejected like a missing field.
    pub data: Option<Value>,
}

impl SaveGraphInput {
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        Self { name: Some(name.into()), data: Some(data) }
    }

    /// Require both fields, then check the name against the allow-list.
    pub fn validate(self) -> Result<(GraphName, Value), ServiceError> {
        let (name, data) = match (self.name, self.data) {
            (Some(name), Some(data)) if !name.is_empty() && !data.is_null() => (name, data),
            _ => return Err(ServiceError::Validation("Invalid graph data".into())),
        };
        Ok((GraphName::parse(&name)?, data))
    }
}
