//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        AnswerPayload, AnswerResponse, CreateSessionPayload, ErrorResponse, FeedbackResponse,
        QuestionResponse, SessionView, TranscriptResponse, TurnView,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::create_session,
        handlers::get_session,
        handlers::ask_question,
        handlers::provide_answer,
        handlers::get_transcript,
        handlers::get_feedback,
        handlers::delete_session,
    ),
    components(
        schemas(
            CreateSessionPayload,
            SessionView,
            QuestionResponse,
            AnswerPayload,
            AnswerResponse,
            TurnView,
            TranscriptResponse,
            FeedbackResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Interviewer API", description = "Adaptive mock interview sessions")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/sessions/{id}/question", post(handlers::ask_question))
        .route("/sessions/{id}/answer", post(handlers::provide_answer))
        .route("/sessions/{id}/transcript", get(handlers::get_transcript))
        .route("/sessions/{id}/feedback", get(handlers::get_feedback))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
