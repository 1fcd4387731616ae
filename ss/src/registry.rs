//! Conversation-keyed registry of sessions

use std::collections::HashMap;

use tracing::debug;

use crate::session::Session;

/// Owns one [`Session`] per conversation id
///
/// The registry itself is synchronous; callers are responsible for
/// serializing access per conversation (turns of the same conversation must
/// not interleave).
#[derive(Debug)]
pub struct SessionRegistry<S, P> {
    sessions: HashMap<String, Session<S, P>>,
}

impl<S, P> Default for SessionRegistry<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, P> SessionRegistry<S, P> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Get or create the session for a conversation
    pub fn session_mut(&mut self, conversation_id: &str) -> &mut Session<S, P> {
        if !self.sessions.contains_key(conversation_id) {
            debug!(%conversation_id, "SessionRegistry::session_mut: creating session");
        }
        self.sessions.entry(conversation_id.to_string()).or_default()
    }

    /// Look up an existing session without creating one
    pub fn get(&self, conversation_id: &str) -> Option<&Session<S, P>> {
        self.sessions.get(conversation_id)
    }

    /// Drop a conversation's session entirely
    pub fn remove(&mut self, conversation_id: &str) -> Option<Session<S, P>> {
        debug!(%conversation_id, "SessionRegistry::remove: called");
        self.sessions.remove(conversation_id)
    }

    /// Number of tracked conversations
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether any conversations are tracked
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_isolated_per_conversation() {
        let mut registry: SessionRegistry<u32, String> = SessionRegistry::new();

        registry.session_mut("conv-a").commit(1);
        registry.session_mut("conv-a").commit(2);
        registry.session_mut("conv-b").commit(10);

        assert_eq!(registry.get("conv-a").unwrap().current(), Some(&2));
        assert_eq!(registry.get("conv-b").unwrap().current(), Some(&10));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_forgets_conversation() {
        let mut registry: SessionRegistry<u32, String> = SessionRegistry::new();
        registry.session_mut("conv-a").commit(1);

        assert!(registry.remove("conv-a").is_some());
        assert!(registry.get("conv-a").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_session_mut_creates_on_demand() {
        let mut registry: SessionRegistry<u32, String> = SessionRegistry::new();
        assert!(registry.get("conv-a").is_none());
        assert_eq!(registry.session_mut("conv-a").current(), None);
        assert!(registry.get("conv-a").is_some());
    }
}
