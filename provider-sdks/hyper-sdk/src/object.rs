//! Structured-output (JSON-schema-constrained) request/response pair.
//!
//! Used for single-shot model calls that want a typed result back instead of
//! free-form text or tool calls, e.g. an LLM-assisted correction pass.

use crate::messages::Message;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Request for a structured-output generation constrained to a JSON schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRequest {
    /// Messages in the conversation.
    pub messages: Vec<Message>,
    /// JSON schema the response must conform to.
    pub schema: serde_json::Value,
    /// Name given to the schema, if the provider's API requires one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,
}

impl ObjectRequest {
    /// Create a new structured-output request.
    pub fn new(messages: Vec<Message>, schema: serde_json::Value) -> Self {
        Self {
            messages,
            schema,
            schema_name: None,
            max_tokens: None,
        }
    }

    /// Set the schema name.
    pub fn schema_name(mut self, name: impl Into<String>) -> Self {
        self.schema_name = Some(name.into());
        self
    }

    /// Set the maximum tokens to generate.
    pub fn max_tokens(mut self, n: i32) -> Self {
        self.max_tokens = Some(n);
        self
    }
}

/// Response from a structured-output generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectResponse {
    /// Unique response ID.
    pub id: String,
    /// Model that generated the response.
    pub model: String,
    /// The parsed JSON object returned by the model.
    pub object: serde_json::Value,
}

impl ObjectResponse {
    /// Create a new response wrapping a raw JSON object.
    pub fn new(id: impl Into<String>, model: impl Into<String>, object: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            object,
        }
    }

    /// Deserialize the response object into `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.object.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[test]
    fn test_parse_object_response() {
        let response = ObjectResponse::new("id-1", "test-model", serde_json::json!({"x": 1, "y": 2}));
        let point: Point = response.parse().expect("parse");
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_object_request_builder() {
        let request = ObjectRequest::new(vec![Message::user("hi")], serde_json::json!({"type": "object"}))
            .schema_name("Foo")
            .max_tokens(100);
        assert_eq!(request.schema_name.as_deref(), Some("Foo"));
        assert_eq!(request.max_tokens, Some(100));
    }
}
