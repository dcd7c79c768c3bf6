//! Auxiliary open-file context.

use serde::{Deserialize, Serialize};

/// A file the user has open, offered to the model as cross-file context.
///
/// Not owned by any thread; added and removed independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenFileContext {
    pub id: String,
    pub name: String,
    pub content: String,
    pub language: String,
}

impl OpenFileContext {
    /// Create an open-file entry with a fresh unique id.
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            content: content.into(),
            language: language.into(),
        }
    }
}
