//! Wire types for the Model Context Protocol (MCP), shared by the tool
//! registry and any MCP client integration.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// The MCP protocol version this workspace speaks.
pub const MCP_SCHEMA_VERSION: &str = "2025-06-18";

/// JSON schema describing a tool's input, as reported by an MCP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInputSchema {
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

/// Behavioral hints an MCP server can attach to a tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolAnnotations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destructive_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotent_hint: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_world_hint: Option<bool>,
}

/// Identifies the client implementation during MCP initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

/// Capabilities a client advertises during MCP initialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roots: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elicitation: Option<Value>,
}

/// Parameters sent in the MCP `initialize` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeRequestParams {
    pub protocol_version: String,
    pub capabilities: ClientCapabilities,
    pub client_info: Implementation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_input_schema_round_trips() {
        let schema = ToolInputSchema {
            r#type: "object".to_string(),
            properties: Some(serde_json::json!({"arg1": {"type": "string"}})),
            required: Some(vec!["arg1".to_string()]),
        };
        let json = serde_json::to_string(&schema).unwrap();
        let back: ToolInputSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, back);
    }
}
