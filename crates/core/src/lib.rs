pub mod decision;
pub mod error;
pub mod feedback;
pub mod label;
pub mod llm_client;
pub mod prompts;
pub mod question;
pub mod session;
pub mod style;
pub mod topic_memory;
pub mod turn;

pub use error::{InterviewError, Result};
pub use label::Label;
pub use session::{AnswerOutcome, InterviewSession, SessionConfig, SessionPhase};
pub use style::{StyleKind, StyleProfile};
pub use turn::Turn;
