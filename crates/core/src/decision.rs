//! Decision Policy
//!
//! Chooses the interviewer's next action after each answer. The completion
//! service does the classification; this module renders the request and
//! treats the response as untrusted.

use crate::label::Label;
use crate::llm_client::CompletionClient;
use crate::prompts::PromptSet;
use crate::style::{StyleProfile, TurnContext, as_pairs};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Resume characters included in a classification request.
pub const DECISION_RESUME_CHARS: usize = 1000;

/// Maps raw classifier output onto the style's vocabulary.
///
/// The first whitespace-delimited token is lowercased and stripped of
/// surrounding punctuation. Anything that is not one of the style's labels
/// becomes the style's fallback. Total over all inputs.
pub fn sanitize_label(profile: &StyleProfile, raw: &str) -> Label {
    let token = raw
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();
    let token = token.trim_matches(|c: char| !(c.is_alphanumeric() || c == '_'));

    match token.parse::<Label>() {
        Ok(label) if profile.accepts(label) => label,
        _ => profile.fallback,
    }
}

pub struct DecisionPolicy {
    client: Arc<dyn CompletionClient>,
    prompts: Arc<PromptSet>,
}

impl DecisionPolicy {
    pub fn new(client: Arc<dyn CompletionClient>, prompts: Arc<PromptSet>) -> Self {
        Self { client, prompts }
    }

    /// Decides the next action. Never fails: any problem along the way
    /// resolves to the style's fallback label.
    #[instrument(name = "decide", skip_all, fields(style = %profile.kind))]
    pub async fn decide(&self, profile: &StyleProfile, ctx: &TurnContext<'_>) -> Label {
        let vars = profile.context(ctx, DECISION_RESUME_CHARS);
        let prompt = match self.prompts.render(profile.decision_prompt, &as_pairs(&vars)) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!(error = %e, fallback = %profile.fallback, "Cannot render decision prompt");
                return profile.fallback;
            }
        };

        match self.client.complete(prompt).await {
            Ok(raw) => {
                let label = sanitize_label(profile, &raw);
                if label == profile.fallback && !raw.to_lowercase().contains(label.as_str()) {
                    warn!(raw = %raw.trim(), fallback = %label, "Unrecognized decision, using fallback");
                } else {
                    debug!(%label, "Decision made");
                }
                label
            }
            Err(e) => {
                warn!(error = %e, fallback = %profile.fallback, "Decision request failed, using fallback");
                profile.fallback
            }
        }
    }
}
