//! Budgeted assembly of the model-facing context payload.

use crate::constants::{
    FILE_CONTEXT_BUDGET, MAX_HISTORY_MESSAGES, MAX_OPEN_FILES, PRIMARY_CONTEXT_BUDGET,
};
use crate::models::{ChatMessage, ConversationMessage, OpenFileContext};

use super::truncate::truncate;

/// The composed prompt payload for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledContext {
    /// Primary code context plus labeled open-file sections plus any
    /// truncation notices, in that order.
    pub enhanced_context: String,
    /// The most recent history messages, reduced to `{role, content}`.
    pub limited_history: Vec<ChatMessage>,
}

/// Compose the selected-code context, a bounded set of open files, and
/// the recent history into one payload.
///
/// Open files keep their original order; files past [`MAX_OPEN_FILES`]
/// are dropped with a notice. Each retained file is truncated
/// independently and marked `[truncated]` inline next to its label;
/// only the primary context and the dropped-file count queue notices,
/// which land at the very end of the payload.
///
/// Deterministic and side-effect-free: inputs are never mutated.
pub fn assemble(
    code_context: &str,
    open_files: &[OpenFileContext],
    history: &[ConversationMessage],
) -> AssembledContext {
    let mut notes: Vec<String> = Vec::new();

    let primary = truncate(code_context, PRIMARY_CONTEXT_BUDGET);
    if primary.truncated {
        tracing::warn!(
            chars = code_context.chars().count(),
            budget = PRIMARY_CONTEXT_BUDGET,
            "selected code exceeds the primary context budget"
        );
        notes.push(
            "Note: the selected code was truncated to fit the request. \
             Focus your review on the visible portion."
                .to_string(),
        );
    }

    if open_files.len() > MAX_OPEN_FILES {
        let omitted = open_files.len() - MAX_OPEN_FILES;
        tracing::debug!(omitted, "dropping open files past the per-request cap");
        notes.push(format!(
            "Note: {omitted} additional open file(s) were omitted to keep the request within budget."
        ));
    }

    let mut enhanced_context = primary.text;

    for file in open_files.iter().take(MAX_OPEN_FILES) {
        let body = truncate(&file.content, FILE_CONTEXT_BUDGET);
        let marker = if body.truncated { " [truncated]" } else { "" };
        enhanced_context.push_str(&format!(
            "\n\n--- Open file: {name} ({language}){marker} ---\n```{language}\n{content}\n```",
            name = file.name,
            language = file.language,
            content = body.text,
        ));
    }

    for note in &notes {
        enhanced_context.push_str("\n\n");
        enhanced_context.push_str(note);
    }

    let start = history.len().saturating_sub(MAX_HISTORY_MESSAGES);
    let limited_history = history[start..]
        .iter()
        .map(ConversationMessage::to_chat_message)
        .collect();

    AssembledContext {
        enhanced_context,
        limited_history,
    }
}
