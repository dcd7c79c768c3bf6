//! Conversation threads scoped to a code selection.

use serde::{Deserialize, Serialize};

use super::message::ConversationMessage;

/// An editor selection range, 1-indexed and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
}

/// A conversation about one code selection (or a general chat when
/// `range` is `None`).
///
/// `code_context` is a point-in-time snapshot taken at creation, never
/// re-read from the editor, and messages are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    id: String,
    range: Option<SelectionRange>,
    messages: Vec<ConversationMessage>,
    code_context: String,
}

impl Thread {
    /// Create a thread with a fresh unique id.
    pub fn new(range: Option<SelectionRange>, code_context: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            range,
            messages: Vec::new(),
            code_context: code_context.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    /// The code snapshot this thread was created over.
    pub fn code_context(&self) -> &str {
        &self.code_context
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Append a message. The only mutation a thread supports.
    pub fn append(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    /// `true` when the thread is scoped to a selection rather than a
    /// general chat.
    pub fn is_scoped(&self) -> bool {
        self.range.is_some()
    }
}
