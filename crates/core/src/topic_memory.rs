//! Topic Memory
//!
//! Keeps the interview from circling back to the same subject. Keywords are
//! pulled from recently asked questions and handed to the decision and
//! generation prompts as "recently covered topics".

use crate::turn::Turn;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Number of trailing turns consulted when building recent topics.
pub const DEFAULT_TOPIC_WINDOW: usize = 5;
/// Keywords kept per question.
pub const DEFAULT_TOP_K: usize = 3;
/// Shortest token (in characters) still considered informative.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

/// Common English words plus the scaffolding interviewers wrap around every
/// question ("can you briefly describe ...").
const STOP_WORDS: &[&str] = &[
    "the", "and", "that", "this", "with", "from", "have", "has", "had", "what", "where", "when",
    "how", "why", "who", "whom", "which", "can", "could", "would", "should", "will", "shall",
    "may", "might", "must", "are", "was", "were", "been", "being", "for", "not", "but", "you",
    "your", "yours", "yourself", "our", "ours", "their", "them", "they", "its", "his", "her",
    "she", "him", "any", "all", "some", "one", "two", "each", "other", "such", "than", "then",
    "there", "these", "those", "into", "onto", "about", "over", "under", "also", "just", "very",
    "more", "most", "much", "many", "did", "does", "doing", "done", "use", "used", "using",
    "tell", "describe", "explain", "briefly", "give", "walk", "through", "share", "talk",
    "please", "specific", "like", "think", "mean", "way", "ways", "time", "times",
    "able", "make", "made", "get", "got", "let", "lets", "out", "own", "only", "same", "both",
    "while", "during", "before", "after", "again", "further", "once", "here", "yes",
];

/// A strategy for turning question text into topic keywords.
///
/// Implementations must be deterministic and must return distinct,
/// normalized tokens ranked from most to least salient.
pub trait KeywordExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<String>;
}

/// Frequency-ranked keyword extraction with stop-word and length filtering.
#[derive(Debug, Clone)]
pub struct StopWordExtractor {
    top_k: usize,
    min_len: usize,
}

impl Default for StopWordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K, DEFAULT_MIN_TOKEN_LEN)
    }
}

impl StopWordExtractor {
    pub fn new(top_k: usize, min_len: usize) -> Self {
        Self { top_k, min_len }
    }

    fn is_informative(&self, token: &str) -> bool {
        token.chars().count() >= self.min_len
            && token.chars().any(|c| c.is_alphabetic())
            && !STOP_WORDS.contains(&token)
    }

    /// Lowercased tokens that survive filtering, in reading order.
    fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '+' | '#')))
            .map(|raw| raw.trim_matches(|c: char| c == '_').to_lowercase())
            .filter(|token| self.is_informative(token))
    }
}

impl KeywordExtractor for StopWordExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        // token -> (occurrences, position of first occurrence)
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
        for (position, token) in self.tokens(text).enumerate() {
            stats
                .entry(token)
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, position));
        }

        let mut ranked: Vec<(String, usize, usize)> = stats
            .into_iter()
            .map(|(token, (count, first))| (token, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        ranked
            .into_iter()
            .take(self.top_k)
            .map(|(token, _, _)| token)
            .collect()
    }
}

/// Recency-bounded memory of the subjects already asked about.
pub struct TopicMemory {
    window: usize,
    extractor: Box<dyn KeywordExtractor>,
}

impl fmt::Debug for TopicMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicMemory")
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl Default for TopicMemory {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC_WINDOW, Box::new(StopWordExtractor::default()))
    }
}

impl TopicMemory {
    pub fn new(window: usize, extractor: Box<dyn KeywordExtractor>) -> Self {
        Self { window, extractor }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Salient keywords of a single piece of question text.
    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        self.extractor.extract(text)
    }

    /// Keywords of the questions in the configured trailing window.
    pub fn recent_topics(&self, history: &[Turn]) -> BTreeSet<String> {
        self.recent_topics_within(history, self.window)
    }

    /// Union of keywords over the last `window` questions.
    ///
    /// Only question text is consulted, never answers. A history shorter than
    /// the window contributes every turn it has.
    pub fn recent_topics_within(&self, history: &[Turn], window: usize) -> BTreeSet<String> {
        let start = history.len().saturating_sub(window);
        history[start..]
            .iter()
            .filter(|turn| !turn.question.trim().is_empty())
            .flat_map(|turn| self.extract_keywords(&turn.question))
            .collect()
    }
}

/// Renders a topic set the way prompts expect it: comma-joined, or `none`.
pub fn render_topics(topics: &BTreeSet<String>) -> String {
    if topics.is_empty() {
        "none".to_string()
    } else {
        topics.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(questions: &[&str]) -> Vec<Turn> {
        questions.iter().map(|q| Turn::open(*q)).collect()
    }

    #[test]
    fn test_extract_keywords_filters_stop_words_and_short_tokens() {
        let extractor = StopWordExtractor::default();
        let keywords = extractor.extract(
            "Can you briefly describe one technical project from your resume and the technologies you used?",
        );
        assert_eq!(keywords, vec!["technical", "project", "resume"]);
    }

    #[test]
    fn test_extract_keywords_ranks_by_frequency() {
        let extractor = StopWordExtractor::default();
        let keywords =
            extractor.extract("How does Rust ownership differ from borrowing? Why does ownership matter in Rust?");
        assert_eq!(keywords, vec!["rust", "ownership", "differ"]);
    }

    #[test]
    fn test_extract_keywords_normalizes_case_and_keeps_symbols() {
        let extractor = StopWordExtractor::new(5, 2);
        let keywords = extractor.extract("Compare C++ and C# with GO.");
        assert_eq!(keywords, vec!["compare", "c++", "c#", "go"]);
    }

    #[test]
    fn test_extract_keywords_drops_numbers() {
        let extractor = StopWordExtractor::default();
        assert!(extractor.extract("2024 1999 42").is_empty());
        assert_eq!(extractor.extract("http2 in 2024"), vec!["http2"]);
    }

    #[test]
    fn test_extract_keywords_is_deterministic() {
        let extractor = StopWordExtractor::default();
        let text = "Explain caching, sharding, replication and consistency tradeoffs.";
        assert_eq!(extractor.extract(text), extractor.extract(text));
        assert_eq!(
            extractor.extract(text),
            vec!["caching", "sharding", "replication"]
        );
    }

    #[test]
    fn test_extract_keywords_empty_text() {
        let extractor = StopWordExtractor::default();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("   ?!  ").is_empty());
    }

    #[test]
    fn test_recent_topics_empty_history() {
        let memory = TopicMemory::default();
        assert!(memory.recent_topics(&[]).is_empty());
    }

    #[test]
    fn test_recent_topics_ignores_blank_questions_and_answers() {
        let memory = TopicMemory::default();
        let history = vec![
            Turn::open(""),
            Turn {
                question: "   ".to_string(),
                answer: Some("kubernetes kubernetes kubernetes".to_string()),
            },
        ];
        assert!(memory.recent_topics(&history).is_empty());
    }

    #[test]
    fn test_recent_topics_respects_window() {
        let memory = TopicMemory::default();
        let history = turns(&["Explain garbage collection.", "Describe database indexing."]);
        let topics = memory.recent_topics_within(&history, 1);
        assert_eq!(
            topics,
            BTreeSet::from(["database".to_string(), "indexing".to_string()])
        );
    }

    #[test]
    fn test_recent_topics_short_history_uses_everything() {
        let memory = TopicMemory::default();
        let history = turns(&["Explain garbage collection.", "Describe database indexing."]);
        let topics = memory.recent_topics(&history);
        assert_eq!(topics.len(), 4);
        assert!(topics.contains("garbage"));
        assert!(topics.contains("indexing"));
    }

    #[test]
    fn test_recent_topics_deduplicates_repeated_questions() {
        let memory = TopicMemory::default();
        let question = "How would you design a distributed cache?";
        let once = memory.recent_topics(&turns(&[question]));
        let many = memory.recent_topics(&turns(&[question; 5]));
        assert_eq!(once, many);
    }

    #[test]
    fn test_custom_extractor_is_used() {
        struct FirstWord;
        impl KeywordExtractor for FirstWord {
            fn extract(&self, text: &str) -> Vec<String> {
                text.split_whitespace()
                    .next()
                    .map(|w| vec![w.to_lowercase()])
                    .unwrap_or_default()
            }
        }

        let memory = TopicMemory::new(2, Box::new(FirstWord));
        let topics = memory.recent_topics(&turns(&["Alpha one", "Beta two", "Gamma three"]));
        assert_eq!(
            topics,
            BTreeSet::from(["beta".to_string(), "gamma".to_string()])
        );
    }

    #[test]
    fn test_render_topics() {
        assert_eq!(render_topics(&BTreeSet::new()), "none");
        let topics = BTreeSet::from(["rust".to_string(), "async".to_string()]);
        assert_eq!(render_topics(&topics), "async, rust");
    }
}
