//! Tool registry and execution
//!
//! Declares the static `calculator` tool advertised to the model and turns
//! the model's tool invocation requests into `tool` messages. Evaluation
//! failures become error text in the result so the model can see and react
//! to them; they never abort the conversation.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::calculator;
use crate::glm::types::{
    ChatMessage, FunctionParameters, FunctionSpec, ParameterSpec, ToolCall, ToolDescriptor,
};

/// Name of the only registered tool
pub const CALCULATOR_TOOL: &str = "calculator";

static REGISTRY: LazyLock<Vec<ToolDescriptor>> = LazyLock::new(|| vec![calculator_descriptor()]);

/// The static tool registry, identical on every call
pub fn list_tools() -> &'static [ToolDescriptor] {
    &REGISTRY
}

fn calculator_descriptor() -> ToolDescriptor {
    let mut properties = HashMap::new();
    properties.insert(
        "expression".to_string(),
        ParameterSpec {
            param_type: "string".to_string(),
            description: "要计算的数学表达式，例如 '2 + 3 * 4' 或 '129032910921*188231'"
                .to_string(),
        },
    );

    ToolDescriptor {
        descriptor_type: "function".to_string(),
        function: FunctionSpec {
            name: CALCULATOR_TOOL.to_string(),
            description: "一个简单的计算器，支持加减乘除、括号、小数点和幂运算。当用户询问计算问题时使用此工具。"
                .to_string(),
            parameters: FunctionParameters {
                schema_type: "object".to_string(),
                properties,
                required: vec!["expression".to_string()],
            },
        },
    }
}

/// Argument object the model sends for the calculator tool
#[derive(Debug, Deserialize)]
struct CalculatorArgs {
    #[serde(default)]
    expression: String,
}

/// Execute the model's tool invocation requests
///
/// Returns one `tool` message per recognized call, tagged with the call id
/// it answers. Unrecognized tool names are logged and skipped.
pub fn execute_tool_calls(tool_calls: &[ToolCall]) -> Vec<ChatMessage> {
    let mut results = Vec::new();

    for call in tool_calls {
        if call.function.name != CALCULATOR_TOOL {
            tracing::warn!(
                tool = %call.function.name,
                call_id = %call.id,
                "Unrecognized tool requested, skipping"
            );
            continue;
        }

        let content = match serde_json::from_str::<CalculatorArgs>(&call.function.arguments) {
            Ok(args) => {
                tracing::info!(expression = %args.expression, "Calculator tool invoked");
                match calculator::evaluate(&args.expression) {
                    Ok(value) => calculator::format_number(value),
                    Err(e) => format!("计算错误: {}", e),
                }
            }
            Err(e) => format!("计算错误: 参数解析失败: {}", e),
        };

        results.push(ChatMessage::tool(content, call.id.clone()));
    }

    results
}
