//! Interview Styles
//!
//! Behavioral and technical interviews run on the same state machine. What
//! differs is captured here: the label vocabulary, the fallback label, the
//! opening question, the prompt templates and which context reaches them.

use crate::label::{BEHAVIORAL_LABELS, Label, TECHNICAL_LABELS};
use crate::prompts::{self, truncate_chars};
use crate::topic_memory::render_topics;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    /// HR-style questions about experience and behavior.
    #[serde(alias = "hr")]
    Behavioral,
    /// Resume- and role-driven technical questions.
    Technical,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleKind::Behavioral => write!(f, "behavioral"),
            StyleKind::Technical => write!(f, "technical"),
        }
    }
}

/// The inputs available when deciding on and generating the next question.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub role: &'a str,
    pub previous_question: &'a str,
    pub answer: &'a str,
    pub resume: Option<&'a str>,
    pub recent_topics: &'a BTreeSet<String>,
}

/// Named values substituted into a prompt template.
pub type PromptVars = Vec<(&'static str, String)>;

/// Builds prompt variables from a turn context. The second argument caps the
/// resume excerpt length in characters.
pub type ContextBuilder = fn(&TurnContext<'_>, usize) -> PromptVars;

/// Borrowed view of prompt variables, as [`prompts::PromptSet::render`] takes them.
pub fn as_pairs(vars: &PromptVars) -> Vec<(&str, &str)> {
    vars.iter().map(|(key, value)| (*key, value.as_str())).collect()
}

/// Everything that distinguishes one interview style from another.
#[derive(Clone)]
pub struct StyleProfile {
    pub kind: StyleKind,
    pub labels: &'static [Label],
    pub fallback: Label,
    pub opening_question: &'static str,
    pub default_rounds: usize,
    pub decision_prompt: &'static str,
    pub question_prompt: &'static str,
    pub build_context: ContextBuilder,
}

impl fmt::Debug for StyleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleProfile")
            .field("kind", &self.kind)
            .field("labels", &self.labels)
            .field("fallback", &self.fallback)
            .field("default_rounds", &self.default_rounds)
            .finish_non_exhaustive()
    }
}

impl StyleProfile {
    pub fn behavioral() -> Self {
        Self {
            kind: StyleKind::Behavioral,
            labels: BEHAVIORAL_LABELS,
            fallback: Label::Probe,
            opening_question: "Welcome to the HR round of your interview. Tell me about yourself.",
            default_rounds: 5,
            decision_prompt: prompts::BEHAVIORAL_DECISION,
            question_prompt: prompts::BEHAVIORAL_QUESTION,
            build_context: behavioral_context,
        }
    }

    pub fn technical() -> Self {
        Self {
            kind: StyleKind::Technical,
            labels: TECHNICAL_LABELS,
            fallback: Label::FollowUpQuestion,
            opening_question: "Can you briefly describe one technical project from your resume and the technologies you used?",
            default_rounds: 3,
            decision_prompt: prompts::TECHNICAL_DECISION,
            question_prompt: prompts::TECHNICAL_QUESTION,
            build_context: technical_context,
        }
    }

    pub fn for_kind(kind: StyleKind) -> Self {
        match kind {
            StyleKind::Behavioral => Self::behavioral(),
            StyleKind::Technical => Self::technical(),
        }
    }

    pub fn accepts(&self, label: Label) -> bool {
        self.labels.contains(&label)
    }

    /// Renders the prompt variables for this style.
    pub fn context(&self, ctx: &TurnContext<'_>, resume_limit: usize) -> PromptVars {
        (self.build_context)(ctx, resume_limit)
    }
}

fn behavioral_context(ctx: &TurnContext<'_>, _resume_limit: usize) -> PromptVars {
    vec![
        ("role", ctx.role.to_string()),
        ("previous_question", ctx.previous_question.to_string()),
        ("answer", ctx.answer.to_string()),
    ]
}

fn technical_context(ctx: &TurnContext<'_>, resume_limit: usize) -> PromptVars {
    let resume = match ctx.resume.map(str::trim) {
        Some(text) if !text.is_empty() => truncate_chars(text, resume_limit).to_string(),
        _ => "not provided".to_string(),
    };
    vec![
        ("role", ctx.role.to_string()),
        ("previous_question", ctx.previous_question.to_string()),
        ("answer", ctx.answer.to_string()),
        ("resume", resume),
        ("recent_topics", render_topics(ctx.recent_topics)),
    ]
}
