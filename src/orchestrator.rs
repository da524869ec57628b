//! Chat orchestration loop
//!
//! Sends a conversation to the model, executes any tool invocation the
//! model requests, feeds the result back, and returns the final answer.
//! At most two provider round-trips per turn: the second one never
//! re-advertises the tools.

use crate::glm::provider::GlmProvider;
use crate::glm::types::ChatMessage;
use crate::tools;

/// System prompt for plain conversation (tools disabled)
pub const CHAT_SYSTEM_PROMPT: &str =
    "你是一个乐于解答各种问题的助手，你的任务是为用户提供专业、准确、有见地的建议。";

/// System prompt for tool-augmented calculation
pub const CALC_SYSTEM_PROMPT: &str = "你是一个有用的AI助手，当涉及到复杂数值计算时，你会使用计算器工具而不是自己计算。对于代数方程、微积分等推理性问题，你应直接解答并给出计算过程。当输入的问题不是数学问题时，不可以做出解答，并直接输出“请提出数学问题”。";

/// Run one conversation turn, optionally with the calculator tool
///
/// Returns the assistant's reply and the history extended with this turn's
/// user prompt and final reply. Provider failures propagate to the caller;
/// tool execution failures do not (they are fed back to the model as tool
/// result text).
pub async fn converse(
    provider: &GlmProvider,
    prompt: &str,
    mut history: Vec<ChatMessage>,
    tools_enabled: bool,
) -> anyhow::Result<(String, Vec<ChatMessage>)> {
    let system_prompt = if tools_enabled {
        CALC_SYSTEM_PROMPT
    } else {
        CHAT_SYSTEM_PROMPT
    };

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(history.iter().cloned());
    messages.push(ChatMessage::user(prompt));

    let advertised = tools_enabled.then(tools::list_tools);
    let assistant = provider.chat(messages.clone(), advertised).await?;

    let reply = match &assistant {
        ChatMessage::Assistant {
            tool_calls: Some(calls),
            ..
        } if !calls.is_empty() => {
            tracing::info!(count = calls.len(), "Model requested tool calls");
            let results = tools::execute_tool_calls(calls);

            // Replay the assistant's request and the tool results, then ask
            // for the final natural-language answer without tools
            messages.push(assistant.clone());
            messages.extend(results);

            let second = provider.chat(messages, None).await?;
            message_text(&second)
        }
        _ => message_text(&assistant),
    };

    history.push(ChatMessage::user(prompt));
    history.push(ChatMessage::assistant(reply.clone()));
    Ok((reply, history))
}

fn message_text(message: &ChatMessage) -> String {
    match message {
        ChatMessage::Assistant { content, .. } => content.clone().unwrap_or_default(),
        ChatMessage::System { content }
        | ChatMessage::User { content }
        | ChatMessage::Tool { content, .. } => content.clone(),
    }
}
