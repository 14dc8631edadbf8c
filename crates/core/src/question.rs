//! Question Generator
//!
//! Turns a decided label plus the turn context into the next question text.

use crate::error::{InterviewError, Result};
use crate::label::Label;
use crate::llm_client::CompletionClient;
use crate::prompts::PromptSet;
use crate::style::{StyleProfile, TurnContext, as_pairs};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Resume characters included in a generation request.
pub const QUESTION_RESUME_CHARS: usize = 1200;

pub struct QuestionGenerator {
    client: Arc<dyn CompletionClient>,
    prompts: Arc<PromptSet>,
}

impl QuestionGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, prompts: Arc<PromptSet>) -> Self {
        Self { client, prompts }
    }

    /// Generates the next question for `label`.
    ///
    /// The response is trimmed and otherwise taken as-is. An empty response
    /// or an unreachable service is an error the caller may retry.
    #[instrument(name = "generate_question", skip_all, fields(style = %profile.kind, %label))]
    pub async fn generate(
        &self,
        profile: &StyleProfile,
        label: Label,
        ctx: &TurnContext<'_>,
    ) -> Result<String> {
        let mut vars = profile.context(ctx, QUESTION_RESUME_CHARS);
        vars.push(("label", label.as_str().to_string()));
        let prompt = self.prompts.render(profile.question_prompt, &as_pairs(&vars))?;

        let raw = self
            .client
            .complete(prompt)
            .await
            .map_err(InterviewError::unavailable)?;

        let question = raw.trim();
        if question.is_empty() {
            return Err(InterviewError::EmptyQuestion);
        }
        debug!(chars = question.len(), "Question generated");
        Ok(question.to_string())
    }
}
