//! Feedback Generation
//!
//! Produces a written evaluation from a finished interview transcript.

use crate::error::{InterviewError, Result};
use crate::llm_client::CompletionClient;
use crate::prompts::{self, PromptSet};
use crate::style::StyleKind;
use crate::turn::Turn;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct FeedbackGenerator {
    client: Arc<dyn CompletionClient>,
    prompts: Arc<PromptSet>,
}

impl FeedbackGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, prompts: Arc<PromptSet>) -> Self {
        Self { client, prompts }
    }

    #[instrument(name = "generate_feedback", skip_all, fields(%style, role = %role, turns = history.len()))]
    pub async fn generate(&self, style: StyleKind, role: &str, history: &[Turn]) -> Result<String> {
        let transcript = render_transcript(history);
        let style = style.to_string();
        let prompt = self.prompts.render(
            prompts::FEEDBACK,
            &[
                ("style", style.as_str()),
                ("role", role),
                ("transcript", transcript.as_str()),
            ],
        )?;

        let feedback = self
            .client
            .complete(prompt)
            .await
            .map_err(InterviewError::unavailable)?;
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return Err(InterviewError::EmptyFeedback);
        }
        info!("Feedback generated");
        Ok(feedback.to_string())
    }
}

/// Numbered question/answer listing used in the feedback prompt.
pub fn render_transcript(history: &[Turn]) -> String {
    let mut out = String::new();
    for (i, turn) in history.iter().enumerate() {
        let answer = match turn.answer.as_deref().map(str::trim) {
            Some(answer) if !answer.is_empty() => answer,
            _ => "(no answer)",
        };
        // Writing to a String cannot fail.
        let _ = writeln!(out, "Q{n}: {}\nA{n}: {}", turn.question, answer, n = i + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::MockCompletionClient;
    use std::sync::Mutex;

    fn history() -> Vec<Turn> {
        vec![
            Turn {
                question: "Tell me about yourself.".to_string(),
                answer: Some("I lead a small platform team.".to_string()),
            },
            Turn {
                question: "Describe a conflict you resolved.".to_string(),
                answer: Some("".to_string()),
            },
            Turn::open("What motivates you?"),
        ]
    }

    #[test]
    fn test_render_transcript() {
        let transcript = render_transcript(&history());
        assert_eq!(
            transcript,
            "Q1: Tell me about yourself.\nA1: I lead a small platform team.\n\
             Q2: Describe a conflict you resolved.\nA2: (no answer)\n\
             Q3: What motivates you?\nA3: (no answer)\n"
        );
    }

    #[tokio::test]
    async fn test_generate_feedback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut mock = MockCompletionClient::new();
        mock.expect_complete().times(1).returning(move |prompt| {
            sink.lock().unwrap().push(prompt);
            Ok("  Strengths: clear communication.  ".to_string())
        });

        let generator = FeedbackGenerator::new(Arc::new(mock), Arc::new(PromptSet::builtin()));
        let feedback = generator
            .generate(StyleKind::Behavioral, "product manager", &history())
            .await
            .unwrap();

        assert_eq!(feedback, "Strengths: clear communication.");
        let prompts = seen.lock().unwrap();
        assert!(prompts[0].contains("behavioral interview for the role of product manager"));
        assert!(prompts[0].contains("Q1: Tell me about yourself."));
    }

    #[tokio::test]
    async fn test_generate_feedback_rejects_empty() {
        let mut mock = MockCompletionClient::new();
        mock.expect_complete().returning(|_| Ok(String::new()));

        let generator = FeedbackGenerator::new(Arc::new(mock), Arc::new(PromptSet::builtin()));
        let err = generator
            .generate(StyleKind::Technical, "backend developer", &history())
            .await
            .unwrap_err();
        assert!(matches!(err, InterviewError::EmptyFeedback));
    }
}
