use thiserror::Error;

/// Errors surfaced by the interview engine.
///
/// Classification problems never appear here: the decision policy always
/// degrades to its fallback label instead.
#[derive(Debug, Error)]
pub enum InterviewError {
    /// The session was configured with values it cannot run with.
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),
    /// The completion service answered, but with no usable question text.
    #[error("Completion service returned an empty question")]
    EmptyQuestion,
    /// The completion service answered, but with no feedback text.
    #[error("Completion service returned empty feedback")]
    EmptyFeedback,
    /// The completion service could not be reached or failed mid-request.
    #[error("Completion service unavailable: {0}")]
    CompletionUnavailable(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
    /// A prompt template required by the active style is not registered.
    #[error("Missing prompt template: '{0}'")]
    MissingPrompt(String),
}

impl InterviewError {
    /// Wraps a transport-level failure from the completion service.
    pub fn unavailable(err: anyhow::Error) -> Self {
        Self::CompletionUnavailable(err.into())
    }

    /// Whether retrying the same call may succeed without any caller change.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuestion | Self::EmptyFeedback | Self::CompletionUnavailable(_)
        )
    }
}

pub type Result<T, E = InterviewError> = std::result::Result<T, E>;
