//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the session store and completion client.

use crate::{config::Config, store::SessionStore};
use interviewer_core::{feedback::FeedbackGenerator, llm_client::CompletionClient, prompts::PromptSet};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub completion: Arc<dyn CompletionClient>,
    pub prompts: Arc<PromptSet>,
    pub feedback: Arc<FeedbackGenerator>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        config: Config,
        completion: Arc<dyn CompletionClient>,
        prompts: Arc<PromptSet>,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            feedback: Arc::new(FeedbackGenerator::new(completion.clone(), prompts.clone())),
            completion,
            prompts,
            config: Arc::new(config),
        }
    }
}
