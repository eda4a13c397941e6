//! Named chat session management.

use std::collections::HashMap;

use super::ChatSession;

/// Holds multiple named sessions, each with its own agent and history.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<String, ChatSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a session by ID, creating it with `create` if absent.
    pub fn get_or_create_with(
        &mut self,
        session_id: &str,
        create: impl FnOnce() -> ChatSession,
    ) -> &mut ChatSession {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(create)
    }

    /// Get an existing session.
    pub fn get(&self, session_id: &str) -> Option<&ChatSession> {
        self.sessions.get(session_id)
    }

    /// Get an existing session mutably.
    pub fn get_mut(&mut self, session_id: &str) -> Option<&mut ChatSession> {
        self.sessions.get_mut(session_id)
    }

    /// Remove a session.
    pub fn remove(&mut self, session_id: &str) -> Option<ChatSession> {
        self.sessions.remove(session_id)
    }

    /// List session IDs.
    pub fn session_ids(&self) -> Vec<&str> {
        self.sessions.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
