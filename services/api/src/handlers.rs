//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for interview sessions.
//! It uses `utoipa` doc comments to generate OpenAPI documentation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use interviewer_core::{InterviewError, InterviewSession, SessionConfig, Turn};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    models::{
        AnswerPayload, AnswerResponse, CreateSessionPayload, ErrorResponse, FeedbackResponse,
        QuestionResponse, SessionView, TranscriptResponse, TurnView,
    },
    state::AppState,
    store::StoredSession,
};

pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    ServiceUnavailable(String),
    InternalServerError(anyhow::Error),
}

impl ApiError {
    /// Maps engine errors onto HTTP semantics. Transient failures leave the
    /// session untouched, so the client is told to retry.
    pub fn from_interview(err: InterviewError) -> Self {
        if err.is_transient() {
            warn!(error = %err, "Transient interview failure");
            return ApiError::ServiceUnavailable(err.to_string());
        }
        match err {
            InterviewError::InvalidConfig(message) => ApiError::BadRequest(message),
            other => ApiError::InternalServerError(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
            ApiError::Conflict(message) => {
                (StatusCode::CONFLICT, Json(ErrorResponse { message })).into_response()
            }
            ApiError::ServiceUnavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse { message }),
            )
                .into_response(),
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

async fn find_session(state: &AppState, id: Uuid) -> Result<StoredSession, ApiError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Session with id '{}' not found", id)))
}

/// Turns the candidate has actually been shown.
fn asked_turns(session: &InterviewSession) -> &[Turn] {
    let history = session.summary();
    &history[..session.current_round().min(history.len())]
}

/// Start a new interview session.
#[utoipa::path(
    post,
    path = "/sessions",
    request_body = CreateSessionPayload,
    responses(
        (status = 201, description = "Session created successfully", body = SessionView),
        (status = 400, description = "Invalid session configuration", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateSessionPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let mut config = SessionConfig::new(payload.style, payload.role);
    if let Some(rounds) = payload.rounds {
        config = config.with_rounds(rounds);
    }
    if let Some(resume) = payload.resume {
        config = config.with_resume(resume);
    }

    let session = InterviewSession::new(config, state.completion.clone(), state.prompts.clone())
        .map_err(ApiError::from_interview)?;
    let (id, stored) = state.sessions.create(session).await;

    let view = SessionView::new(id, stored.created_at, &*stored.session.lock().await);
    info!(session_id = %id, style = %view.style, rounds = view.round_limit, "Created interview session");
    Ok((StatusCode::CREATED, Json(view)))
}

/// Get the current state of a session.
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    responses(
        (status = 200, description = "Session details", body = SessionView),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let stored = find_session(&state, id).await?;
    let session = stored.session.lock().await;
    Ok(Json(SessionView::new(id, stored.created_at, &session)))
}

/// Ask the next question. Returns a null question once the interview is complete.
#[utoipa::path(
    post,
    path = "/sessions/{id}/question",
    responses(
        (status = 200, description = "Next question", body = QuestionResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 503, description = "Completion service unavailable, retry later", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let stored = find_session(&state, id).await?;
    let mut session = stored.session.lock().await;

    let question = session
        .ask_question()
        .await
        .map_err(ApiError::from_interview)?;

    Ok(Json(QuestionResponse {
        complete: question.is_none(),
        question,
        round: session.current_round(),
        round_limit: session.round_limit(),
    }))
}

/// Record the candidate's answer to the latest question.
#[utoipa::path(
    post,
    path = "/sessions/{id}/answer",
    request_body = AnswerPayload,
    responses(
        (status = 200, description = "Answer recorded", body = AnswerResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn provide_answer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerPayload>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let stored = find_session(&state, id).await?;
    let mut session = stored.session.lock().await;

    let outcome = session.provide_answer(payload.answer);
    Ok(Json(AnswerResponse {
        outcome,
        round: session.current_round(),
        complete: session.is_complete(),
    }))
}

/// Get the question/answer transcript so far.
#[utoipa::path(
    get,
    path = "/sessions/{id}/transcript",
    responses(
        (status = 200, description = "Session transcript", body = TranscriptResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn get_transcript(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let stored = find_session(&state, id).await?;
    let session = stored.session.lock().await;

    Ok(Json(TranscriptResponse {
        session_id: id,
        turns: asked_turns(&session).iter().map(TurnView::from).collect(),
        complete: session.is_complete(),
    }))
}

/// Generate written feedback for a completed interview.
#[utoipa::path(
    get,
    path = "/sessions/{id}/feedback",
    responses(
        (status = 200, description = "Interview feedback", body = FeedbackResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 409, description = "Interview still in progress", body = ErrorResponse),
        (status = 503, description = "Completion service unavailable, retry later", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn get_feedback(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let stored = find_session(&state, id).await?;

    let (style, role, history) = {
        let session = stored.session.lock().await;
        if !session.is_complete() {
            return Err(ApiError::Conflict(format!(
                "Session '{}' is still in progress ({}/{} questions asked)",
                id,
                session.current_round(),
                session.round_limit()
            )));
        }
        (
            session.style(),
            session.role().to_string(),
            session.summary().to_vec(),
        )
    };

    let feedback = state
        .feedback
        .generate(style, &role, &history)
        .await
        .map_err(ApiError::from_interview)?;

    Ok(Json(FeedbackResponse {
        session_id: id,
        feedback,
    }))
}

/// End a session and discard its state.
#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "Session ID")
    )
)]
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.evict(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!(
            "Session with id '{}' not found",
            id
        )))
    }
}
