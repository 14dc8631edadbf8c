//! Interview Session
//!
//! The round-by-round state machine. A session is seeded with its style's
//! opening question, hands out one question per round and records one answer
//! per question until the round limit is reached.
//!
//! ```text
//! NotStarted --ask--> InProgress --ask--> ... --ask--> Complete
//! ```
//!
//! Each round after the first consults [`TopicMemory`] for recently covered
//! topics, asks the [`DecisionPolicy`] for a label and the
//! [`QuestionGenerator`] for the question text.

use crate::decision::DecisionPolicy;
use crate::error::{InterviewError, Result};
use crate::label::Label;
use crate::llm_client::CompletionClient;
use crate::prompts::{PromptSet, truncate_chars};
use crate::question::QuestionGenerator;
use crate::style::{StyleKind, StyleProfile, TurnContext};
use crate::topic_memory::TopicMemory;
use crate::turn::Turn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Upper bound on the rounds a single session may run.
pub const MAX_ROUNDS: usize = 20;
/// Resume characters retained by a session.
pub const SESSION_RESUME_CHARS: usize = 1500;

/// Validated-on-construction settings for a session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionConfig {
    pub style: StyleKind,
    /// Target job role, used only as prompt context.
    pub role: String,
    pub round_limit: usize,
    /// Resume text or JSON; consulted by the technical style.
    pub resume: Option<String>,
}

impl SessionConfig {
    /// A config using the style's default round count and no resume.
    pub fn new(style: StyleKind, role: impl Into<String>) -> Self {
        Self {
            style,
            role: role.into(),
            round_limit: StyleProfile::for_kind(style).default_rounds,
            resume: None,
        }
    }

    pub fn with_rounds(mut self, round_limit: usize) -> Self {
        self.round_limit = round_limit;
        self
    }

    pub fn with_resume(mut self, resume: impl Into<String>) -> Self {
        self.resume = Some(resume.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.role.trim().is_empty() {
            return Err(InterviewError::InvalidConfig(
                "role must not be empty".to_string(),
            ));
        }
        if self.round_limit == 0 {
            return Err(InterviewError::InvalidConfig(
                "round limit must be at least 1".to_string(),
            ));
        }
        if self.round_limit > MAX_ROUNDS {
            return Err(InterviewError::InvalidConfig(format!(
                "round limit must not exceed {}",
                MAX_ROUNDS
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Complete,
}

/// What [`InterviewSession::provide_answer`] did with an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// The open turn received its answer.
    Recorded,
    /// The latest turn already had an answer, which was replaced.
    Overwritten,
    /// No question has been asked yet, so there was nothing to answer.
    Ignored,
}

pub struct InterviewSession {
    profile: StyleProfile,
    role: String,
    resume: Option<String>,
    round_limit: usize,
    current_round: usize,
    history: Vec<Turn>,
    topic_memory: TopicMemory,
    decision: DecisionPolicy,
    generator: QuestionGenerator,
}

impl std::fmt::Debug for InterviewSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterviewSession")
            .field("style", &self.profile.kind)
            .field("role", &self.role)
            .field("round_limit", &self.round_limit)
            .field("current_round", &self.current_round)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl InterviewSession {
    /// Creates a session seeded with its style's opening question.
    ///
    /// Fails if the configuration is invalid or if the prompt set lacks a
    /// template the style needs, so no session can start in a state it
    /// cannot finish.
    pub fn new(
        config: SessionConfig,
        client: Arc<dyn CompletionClient>,
        prompts: Arc<PromptSet>,
    ) -> Result<Self> {
        config.validate()?;
        let profile = StyleProfile::for_kind(config.style);
        prompts.get(profile.decision_prompt)?;
        prompts.get(profile.question_prompt)?;

        let resume = config
            .resume
            .as_deref()
            .map(|text| truncate_chars(text.trim(), SESSION_RESUME_CHARS).to_string())
            .filter(|text| !text.is_empty());

        info!(
            style = %profile.kind,
            role = %config.role,
            round_limit = config.round_limit,
            has_resume = resume.is_some(),
            "Interview session created"
        );

        Ok(Self {
            history: vec![Turn::open(profile.opening_question)],
            profile,
            role: config.role,
            resume,
            round_limit: config.round_limit,
            current_round: 0,
            topic_memory: TopicMemory::default(),
            decision: DecisionPolicy::new(client.clone(), prompts.clone()),
            generator: QuestionGenerator::new(client, prompts),
        })
    }

    /// Replaces the topic memory, e.g. to plug in a different keyword extractor.
    pub fn with_topic_memory(mut self, topic_memory: TopicMemory) -> Self {
        self.topic_memory = topic_memory;
        self
    }

    pub fn style(&self) -> StyleKind {
        self.profile.kind
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn round_limit(&self) -> usize {
        self.round_limit
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn phase(&self) -> SessionPhase {
        if self.current_round >= self.round_limit {
            SessionPhase::Complete
        } else if self.current_round == 0 {
            SessionPhase::NotStarted
        } else {
            SessionPhase::InProgress
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_round >= self.round_limit
    }

    /// The turn currently waiting for an answer, if any.
    pub fn open_turn(&self) -> Option<&Turn> {
        if self.current_round == 0 {
            return None;
        }
        self.history.last().filter(|turn| !turn.is_answered())
    }

    /// The full question/answer history, in conversation order.
    pub fn summary(&self) -> &[Turn] {
        &self.history
    }

    /// Issues the next question.
    ///
    /// Returns `Ok(None)` once the session is complete. On error the session
    /// is left exactly as it was, so the call can simply be retried.
    #[instrument(
        name = "ask_question",
        skip(self),
        fields(style = %self.profile.kind, role = %self.role, round = self.current_round)
    )]
    pub async fn ask_question(&mut self) -> Result<Option<String>> {
        match self.phase() {
            SessionPhase::Complete => {
                debug!("Session complete, no further questions");
                Ok(None)
            }
            SessionPhase::NotStarted => {
                self.current_round = 1;
                info!(round = self.current_round, "Issued opening question");
                Ok(self.history.first().map(|turn| turn.question.clone()))
            }
            SessionPhase::InProgress => {
                let (label, question) = self.next_question().await?;
                // A skipped turn is closed with an empty answer so only the
                // new turn remains open.
                if let Some(last) = self.history.last_mut() {
                    last.answer.get_or_insert_with(String::new);
                }
                self.history.push(Turn::open(question.clone()));
                self.current_round += 1;
                info!(%label, round = self.current_round, "Issued next question");
                Ok(Some(question))
            }
        }
    }

    /// Decides on and generates the next question without touching state.
    async fn next_question(&self) -> Result<(Label, String)> {
        let Some(last) = self.history.last() else {
            return Err(InterviewError::InvalidConfig(
                "session history is empty".to_string(),
            ));
        };
        let recent_topics = self.topic_memory.recent_topics(&self.history);
        let ctx = TurnContext {
            role: &self.role,
            previous_question: &last.question,
            answer: last.answer_or_empty(),
            resume: self.resume.as_deref(),
            recent_topics: &recent_topics,
        };

        let label = self.decision.decide(&self.profile, &ctx).await;
        let question = self.generator.generate(&self.profile, label, &ctx).await?;
        Ok((label, question))
    }

    /// Records the candidate's answer to the latest question.
    ///
    /// Before the first question is asked this is a no-op. Answering the same
    /// question again replaces the earlier answer; history never grows here.
    pub fn provide_answer(&mut self, answer: impl Into<String>) -> AnswerOutcome {
        if self.current_round == 0 {
            warn!("Answer received before any question was asked, ignoring");
            return AnswerOutcome::Ignored;
        }
        let Some(turn) = self.history.last_mut() else {
            return AnswerOutcome::Ignored;
        };

        let outcome = if turn.is_answered() {
            AnswerOutcome::Overwritten
        } else {
            AnswerOutcome::Recorded
        };
        turn.answer = Some(answer.into());
        debug!(round = self.current_round, ?outcome, "Answer stored");
        outcome
    }
}
