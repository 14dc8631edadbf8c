//! API Models
//!
//! Request and response bodies for the interview endpoints, annotated with
//! `utoipa` so they appear in the generated OpenAPI document.

use chrono::{DateTime, Utc};
use interviewer_core::{AnswerOutcome, InterviewSession, SessionPhase, StyleKind, Turn};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
pub struct CreateSessionPayload {
    #[schema(example = "backend developer")]
    pub role: String,
    #[schema(value_type = String, example = "technical")]
    pub style: StyleKind,
    /// Number of questions; defaults to 3 for technical and 5 for behavioral.
    #[schema(example = 3)]
    pub rounds: Option<usize>,
    /// Resume text or JSON, used by technical interviews.
    pub resume: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct SessionView {
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    #[schema(value_type = String, example = "technical")]
    pub style: StyleKind,
    pub role: String,
    #[schema(value_type = String, example = "in_progress")]
    pub phase: SessionPhase,
    pub current_round: usize,
    pub round_limit: usize,
    pub created_at: DateTime<Utc>,
}

impl SessionView {
    pub fn new(id: Uuid, created_at: DateTime<Utc>, session: &InterviewSession) -> Self {
        Self {
            id,
            style: session.style(),
            role: session.role().to_string(),
            phase: session.phase(),
            current_round: session.current_round(),
            round_limit: session.round_limit(),
            created_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct QuestionResponse {
    /// The next question, or `null` once the interview is complete.
    pub question: Option<String>,
    pub round: usize,
    pub round_limit: usize,
    pub complete: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct AnswerPayload {
    #[schema(example = "I built a payment service in Rust.")]
    pub answer: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AnswerResponse {
    #[schema(value_type = String, example = "recorded")]
    pub outcome: AnswerOutcome,
    pub round: usize,
    pub complete: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct TurnView {
    pub question: String,
    pub answer: Option<String>,
}

impl From<&Turn> for TurnView {
    fn from(turn: &Turn) -> Self {
        Self {
            question: turn.question.clone(),
            answer: turn.answer.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct TranscriptResponse {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
    pub turns: Vec<TurnView>,
    pub complete: bool,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct FeedbackResponse {
    #[schema(value_type = String, format = Uuid)]
    pub session_id: Uuid,
    pub feedback: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}
