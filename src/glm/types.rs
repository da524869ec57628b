//! GLM chat-completions wire types
//!
//! OpenAI-compatible request/response shapes for the Zhipu open platform.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Conversation message
///
/// Tagged by role so each variant carries only the fields valid for it:
/// tool invocation requests live on `Assistant`, the answering call id on
/// `Tool`. Serializes to the flat `{role, content, ...}` wire form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },
    Tool {
        content: String,
        tool_call_id: String,
    },
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    pub fn tool(content: impl Into<String>, tool_call_id: impl Into<String>) -> Self {
        Self::Tool {
            content: content.into(),
            tool_call_id: tool_call_id.into(),
        }
    }
}

/// Tool invocation request emitted by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

/// Function call details within a [`ToolCall`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Raw argument payload, a serialized JSON object
    pub arguments: String,
}

// === Tool descriptor (advertised to the model) ===

/// Tool descriptor wire shape:
/// `{type: "function", function: {name, description, parameters}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    #[serde(rename = "type")]
    pub descriptor_type: String,
    pub function: FunctionSpec,
}

/// Function declaration within a [`ToolDescriptor`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: FunctionParameters,
}

/// JSON-schema-like description of the expected argument object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionParameters {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: HashMap<String, ParameterSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// A single parameter within a function's schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub param_type: String,
    pub description: String,
}

// === Chat completions request / response ===

/// Chat completions request body
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<String>,
}

/// Chat completions response body
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

/// One of the choices returned by the model
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_serializes_with_role_tag() {
        let msg = ChatMessage::system("你好");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "你好");
    }

    #[test]
    fn test_tool_message_carries_call_id() {
        let msg = ChatMessage::tool("4094152", "call_1");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["tool_call_id"], "call_1");
    }

    #[test]
    fn test_assistant_without_tool_calls_omits_field() {
        let msg = ChatMessage::assistant("回复");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(!json.contains("tool_calls"));
    }

    #[test]
    fn test_deserialize_assistant_tool_call_response() {
        let body = r#"{
            "choices": [{
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "calculator",
                            "arguments": "{\"expression\": \"1999*2048\"}"
                        }
                    }]
                }
            }]
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let ChatMessage::Assistant {
            content,
            tool_calls,
        } = &response.choices[0].message
        else {
            panic!("expected assistant message");
        };
        assert!(content.is_none());
        let calls = tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.name, "calculator");
        assert_eq!(calls[0].id, "call_abc");
    }
}
