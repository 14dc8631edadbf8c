use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single question/answer exchange in an interview.
///
/// The question is fixed when the turn is created. The answer stays `None`
/// until the candidate responds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Turn {
    pub question: String,
    pub answer: Option<String>,
}

impl Turn {
    /// Creates a new turn that is still waiting for an answer.
    pub fn open(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: None,
        }
    }

    /// Checks whether the candidate has responded to this turn.
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }

    /// The recorded answer, or an empty string for a skipped turn.
    pub fn answer_or_empty(&self) -> &str {
        self.answer.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_turn_has_no_answer() {
        let turn = Turn::open("Tell me about yourself.");
        assert_eq!(turn.question, "Tell me about yourself.");
        assert!(!turn.is_answered());
        assert_eq!(turn.answer_or_empty(), "");
    }

    #[test]
    fn test_turn_serialization() {
        let turn = Turn {
            question: "What is a mutex?".to_string(),
            answer: Some("A lock.".to_string()),
        };
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"question":"What is a mutex?","answer":"A lock."}"#);

        let open: Turn = serde_json::from_str(r#"{"question":"Q","answer":null}"#).unwrap();
        assert_eq!(open, Turn::open("Q"));
    }
}
