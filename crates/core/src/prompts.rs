//! Prompt Templates
//!
//! Every request to the completion service is rendered from a named template
//! with `{placeholder}` slots. Built-in templates ship with the crate and can
//! be replaced one by one, e.g. from a directory of `.md` files.

use crate::error::{InterviewError, Result};
use std::collections::HashMap;

pub const BEHAVIORAL_DECISION: &str = "behavioral_decision";
pub const TECHNICAL_DECISION: &str = "technical_decision";
pub const BEHAVIORAL_QUESTION: &str = "behavioral_question";
pub const TECHNICAL_QUESTION: &str = "technical_question";
pub const FEEDBACK: &str = "feedback";

const BUILTIN: &[(&str, &str)] = &[
    (BEHAVIORAL_DECISION, include_str!("../prompts/behavioral_decision.md")),
    (TECHNICAL_DECISION, include_str!("../prompts/technical_decision.md")),
    (BEHAVIORAL_QUESTION, include_str!("../prompts/behavioral_question.md")),
    (TECHNICAL_QUESTION, include_str!("../prompts/technical_question.md")),
    (FEEDBACK, include_str!("../prompts/feedback.md")),
];

/// A named collection of prompt templates.
#[derive(Debug, Clone)]
pub struct PromptSet {
    templates: HashMap<String, String>,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PromptSet {
    /// The templates bundled with the crate.
    pub fn builtin() -> Self {
        Self {
            templates: BUILTIN
                .iter()
                .map(|(key, body)| (key.to_string(), body.to_string()))
                .collect(),
        }
    }

    /// A set containing only the given templates.
    pub fn from_map(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    /// Replaces templates by key, keeping any that are not overridden.
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.templates.extend(overrides);
        self
    }

    pub fn get(&self, key: &str) -> Result<&str> {
        self.templates
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| InterviewError::MissingPrompt(key.to_string()))
    }

    /// Renders the template `key`, filling each `{name}` slot from `vars`.
    pub fn render(&self, key: &str, vars: &[(&str, &str)]) -> Result<String> {
        Ok(fill(self.get(key)?, vars))
    }
}

/// Single-pass placeholder substitution.
///
/// Substituted values are never rescanned, so candidate text containing
/// braces cannot inject into other slots. Unknown placeholders are left as-is.
fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates_present() {
        let prompts = PromptSet::builtin();
        for key in [
            BEHAVIORAL_DECISION,
            TECHNICAL_DECISION,
            BEHAVIORAL_QUESTION,
            TECHNICAL_QUESTION,
            FEEDBACK,
        ] {
            assert!(prompts.get(key).is_ok(), "missing builtin '{}'", key);
        }
    }

    #[test]
    fn test_render_fills_placeholders() {
        let prompts = PromptSet::from_map(HashMap::from([(
            "greet".to_string(),
            "Hello {name}, welcome to {place}.".to_string(),
        )]));
        let rendered = prompts
            .render("greet", &[("name", "Ada"), ("place", "the interview")])
            .unwrap();
        assert_eq!(rendered, "Hello Ada, welcome to the interview.");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let prompts = PromptSet::from_map(HashMap::from([(
            "t".to_string(),
            "{known} {unknown} {".to_string(),
        )]));
        let rendered = prompts.render("t", &[("known", "x")]).unwrap();
        assert_eq!(rendered, "x {unknown} {");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let prompts = PromptSet::from_map(HashMap::from([(
            "t".to_string(),
            "A: {answer} R: {role}".to_string(),
        )]));
        let rendered = prompts
            .render("t", &[("answer", "{role}"), ("role", "backend")])
            .unwrap();
        assert_eq!(rendered, "A: {role} R: backend");
    }

    #[test]
    fn test_missing_template() {
        let prompts = PromptSet::from_map(HashMap::new());
        match prompts.render("nope", &[]) {
            Err(InterviewError::MissingPrompt(key)) => assert_eq!(key, "nope"),
            other => panic!("expected MissingPrompt, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides_replace_single_templates() {
        let prompts = PromptSet::builtin().with_overrides(HashMap::from([(
            FEEDBACK.to_string(),
            "custom".to_string(),
        )]));
        assert_eq!(prompts.get(FEEDBACK).unwrap(), "custom");
        assert!(prompts.get(TECHNICAL_QUESTION).unwrap().contains("{label}"));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("", 5), "");
    }
}
