//! In-Memory Session Store
//!
//! Maps session ids to live interview sessions. Each session sits behind its
//! own async mutex so calls on one interview are serialized while different
//! interviews proceed independently.

use chrono::{DateTime, Utc};
use interviewer_core::InterviewSession;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

/// A session handle as kept by the store.
#[derive(Clone)]
pub struct StoredSession {
    pub session: Arc<Mutex<InterviewSession>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, StoredSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session under a fresh id.
    pub async fn create(&self, session: InterviewSession) -> (Uuid, StoredSession) {
        let id = Uuid::new_v4();
        let stored = StoredSession {
            session: Arc::new(Mutex::new(session)),
            created_at: Utc::now(),
        };
        self.sessions.write().await.insert(id, stored.clone());
        info!(session_id = %id, "Session registered");
        (id, stored)
    }

    pub async fn get(&self, id: Uuid) -> Option<StoredSession> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Removes a session. Returns whether it existed.
    pub async fn evict(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session evicted");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use interviewer_core::{
        SessionConfig, StyleKind, llm_client::CompletionClient, prompts::PromptSet,
    };

    struct Silent;

    #[async_trait]
    impl CompletionClient for Silent {
        async fn complete(&self, _prompt: String) -> Result<String> {
            Ok(String::new())
        }
    }

    fn session(role: &str) -> InterviewSession {
        InterviewSession::new(
            SessionConfig::new(StyleKind::Behavioral, role),
            Arc::new(Silent),
            Arc::new(PromptSet::builtin()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_get_evict() {
        let store = SessionStore::new();
        assert!(store.is_empty().await);

        let (id, _) = store.create(session("designer")).await;
        assert_eq!(store.len().await, 1);

        let stored = store.get(id).await.expect("session should exist");
        assert_eq!(stored.session.lock().await.role(), "designer");

        assert!(store.evict(id).await);
        assert!(!store.evict(id).await);
        assert!(store.get(id).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new();
        let (a, _) = store.create(session("designer")).await;
        let (b, _) = store.create(session("recruiter")).await;
        assert_ne!(a, b);

        let first = store.get(a).await.unwrap();
        first.session.lock().await.ask_question().await.unwrap();

        let second = store.get(b).await.unwrap();
        assert_eq!(first.session.lock().await.current_round(), 1);
        assert_eq!(second.session.lock().await.current_round(), 0);
    }

    #[tokio::test]
    async fn test_handles_share_state() {
        let store = SessionStore::new();
        let (id, created) = store.create(session("designer")).await;
        created.session.lock().await.ask_question().await.unwrap();

        let fetched = store.get(id).await.unwrap();
        assert_eq!(fetched.session.lock().await.current_round(), 1);
        assert_eq!(fetched.created_at, created.created_at);
    }
}
