//! In-memory ownership of threads and open files.
//!
//! The store is the single owner of conversation state. The dispatch
//! pipeline never reads it; callers snapshot what a request needs
//! (open files, a thread's history and code context) before invoking
//! [`ChatClient::send_message`].
//!
//! [`ChatClient::send_message`]: crate::dispatch::ChatClient::send_message

use indexmap::IndexMap;

use crate::models::{ConversationMessage, OpenFileContext, SelectionRange, Thread};

/// Owner of all threads and open-file contexts.
#[derive(Debug, Default)]
pub struct ThreadStore {
    threads: IndexMap<String, Thread>,
    open_files: IndexMap<String, OpenFileContext>,
    active: Option<String>,
}

impl ThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Threads ─────────────────────────────────────────────────────

    /// Create a thread over a code snapshot and make it active.
    /// Returns the new thread's id.
    pub fn create_thread(
        &mut self,
        range: Option<SelectionRange>,
        code_context: impl Into<String>,
    ) -> String {
        let thread = Thread::new(range, code_context);
        let id = thread.id().to_string();
        self.threads.insert(id.clone(), thread);
        self.active = Some(id.clone());
        id
    }

    pub fn thread(&self, id: &str) -> Option<&Thread> {
        self.threads.get(id)
    }

    /// Append a message to a thread. Returns `false` for unknown ids.
    ///
    /// Appends land in the order calls resolve; when multiple requests
    /// for one thread are in flight, responses may arrive out of send
    /// order and are recorded as they come.
    pub fn append_message(&mut self, id: &str, message: ConversationMessage) -> bool {
        match self.threads.get_mut(id) {
            Some(thread) => {
                thread.append(message);
                true
            }
            None => false,
        }
    }

    /// Remove a thread. Clears the active marker when it pointed here.
    pub fn remove_thread(&mut self, id: &str) -> bool {
        let removed = self.threads.shift_remove(id).is_some();
        if removed && self.active.as_deref() == Some(id) {
            self.active = None;
        }
        removed
    }

    /// Mark a thread as the displayed one. Returns `false` for unknown ids.
    pub fn set_active(&mut self, id: &str) -> bool {
        if self.threads.contains_key(id) {
            self.active = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn active_thread(&self) -> Option<&Thread> {
        self.active.as_deref().and_then(|id| self.threads.get(id))
    }

    pub fn threads(&self) -> impl Iterator<Item = &Thread> {
        self.threads.values()
    }

    // ── Open files ──────────────────────────────────────────────────

    /// Register an open file. Returns its id.
    pub fn add_open_file(&mut self, file: OpenFileContext) -> String {
        let id = file.id.clone();
        self.open_files.insert(id.clone(), file);
        id
    }

    pub fn remove_open_file(&mut self, id: &str) -> bool {
        self.open_files.shift_remove(id).is_some()
    }

    /// Snapshot the open files in insertion order, for request building.
    pub fn open_files(&self) -> Vec<OpenFileContext> {
        self.open_files.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn create_thread_makes_it_active() {
        let mut store = ThreadStore::new();
        let id = store.create_thread(None, "fn main() {}");

        assert_eq!(store.active_thread().map(|t| t.id().to_string()), Some(id));
    }

    #[test]
    fn append_message_unknown_thread_is_rejected() {
        let mut store = ThreadStore::new();
        assert!(!store.append_message("missing", ConversationMessage::new(Role::User, "q")));
    }

    #[test]
    fn append_message_records_in_resolution_order() {
        let mut store = ThreadStore::new();
        let id = store.create_thread(None, "");

        store.append_message(&id, ConversationMessage::new(Role::User, "second send"));
        store.append_message(&id, ConversationMessage::new(Role::User, "first send"));

        let contents: Vec<&str> = store
            .thread(&id)
            .unwrap()
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, ["second send", "first send"]);
    }

    #[test]
    fn remove_thread_clears_active_marker() {
        let mut store = ThreadStore::new();
        let first = store.create_thread(None, "");
        let second = store.create_thread(None, "");

        assert!(store.remove_thread(&second));
        assert!(store.active_thread().is_none());

        assert!(store.set_active(&first));
        assert_eq!(
            store.active_thread().map(|t| t.id().to_string()),
            Some(first)
        );
    }

    #[test]
    fn remove_unknown_thread_is_a_noop() {
        let mut store = ThreadStore::new();
        let id = store.create_thread(None, "");
        assert!(!store.remove_thread("missing"));
        assert!(store.thread(&id).is_some());
    }

    #[test]
    fn open_files_keep_insertion_order() {
        let mut store = ThreadStore::new();
        store.add_open_file(OpenFileContext::new("first.rs", "", "rust"));
        store.add_open_file(OpenFileContext::new("second.rs", "", "rust"));
        store.add_open_file(OpenFileContext::new("third.rs", "", "rust"));

        let names: Vec<String> = store.open_files().iter().map(|f| f.name.clone()).collect();
        assert_eq!(names, ["first.rs", "second.rs", "third.rs"]);
    }

    #[test]
    fn remove_open_file_by_id() {
        let mut store = ThreadStore::new();
        let id = store.add_open_file(OpenFileContext::new("gone.rs", "", "rust"));
        assert!(store.remove_open_file(&id));
        assert!(store.open_files().is_empty());
        assert!(!store.remove_open_file(&id));
    }

    #[test]
    fn snapshots_are_decoupled_from_the_store() {
        let mut store = ThreadStore::new();
        store.add_open_file(OpenFileContext::new("a.rs", "fn a() {}", "rust"));

        let snapshot = store.open_files();
        store.add_open_file(OpenFileContext::new("b.rs", "fn b() {}", "rust"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.open_files().len(), 2);
    }
}
