//! Interviewer action labels.
//!
//! A label is the decision taken after each answer. Behavioral and technical
//! interviews draw from different vocabularies, but both live in one enum so
//! the session machinery can stay style-agnostic.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    // Behavioral vocabulary.
    Probe,
    Clarify,
    Example,
    NextTopic,
    BehaviorCheck,
    // Technical vocabulary.
    DepthProbe,
    ConceptClarification,
    EdgeCase,
    FollowUpQuestion,
    TopicTransition,
    CodingTest,
}

/// Labels a behavioral (HR) interviewer may choose from.
pub const BEHAVIORAL_LABELS: &[Label] = &[
    Label::Probe,
    Label::Clarify,
    Label::Example,
    Label::NextTopic,
    Label::BehaviorCheck,
];

/// Labels a technical interviewer may choose from. `CodingTest` is reserved:
/// accepted when returned, never used as a fallback.
pub const TECHNICAL_LABELS: &[Label] = &[
    Label::DepthProbe,
    Label::ConceptClarification,
    Label::EdgeCase,
    Label::FollowUpQuestion,
    Label::TopicTransition,
    Label::CodingTest,
];

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Probe => "probe",
            Label::Clarify => "clarify",
            Label::Example => "example",
            Label::NextTopic => "next_topic",
            Label::BehaviorCheck => "behavior_check",
            Label::DepthProbe => "depth_probe",
            Label::ConceptClarification => "concept_clarification",
            Label::EdgeCase => "edge_case",
            Label::FollowUpQuestion => "follow_up_question",
            Label::TopicTransition => "topic_transition",
            Label::CodingTest => "coding_test",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown label: '{0}'")]
pub struct UnknownLabel(pub String);

impl FromStr for Label {
    type Err = UnknownLabel;

    /// Exact, case-sensitive match on the canonical name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BEHAVIORAL_LABELS
            .iter()
            .chain(TECHNICAL_LABELS)
            .find(|label| label.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownLabel(s.to_string()))
    }
}
