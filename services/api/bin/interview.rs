//! Terminal Interview Runner
//!
//! Runs a single interview session on stdin/stdout against the configured
//! completion provider, then prints the interviewer's feedback.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use interviewer_api::{
    completion::{build_client, build_prompts},
    config::Config,
};
use interviewer_core::{
    InterviewError, InterviewSession, SessionConfig, StyleKind, feedback::FeedbackGenerator,
};
use std::{path::PathBuf, time::Duration};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Attempts per question or feedback call before giving up.
const MAX_ATTEMPTS: u32 = 3;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Style {
    Technical,
    Behavioral,
}

impl From<Style> for StyleKind {
    fn from(style: Style) -> Self {
        match style {
            Style::Technical => StyleKind::Technical,
            Style::Behavioral => StyleKind::Behavioral,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Run a mock interview in the terminal")]
struct Args {
    /// Interview style.
    #[arg(short, long, value_enum, default_value_t = Style::Technical)]
    style: Style,

    /// Role the candidate is interviewing for.
    #[arg(short, long)]
    role: String,

    /// Number of questions to ask (defaults depend on the style).
    #[arg(short = 'n', long)]
    rounds: Option<usize>,

    /// Path to a resume file (plain text or JSON).
    #[arg(long)]
    resume: Option<PathBuf>,
}

/// Backs off before the next attempt, or reports that attempts are exhausted.
async fn should_retry(what: &str, attempt: u32, err: &InterviewError) -> bool {
    if !err.is_transient() || attempt >= MAX_ATTEMPTS {
        return false;
    }
    warn!(attempt, error = %err, "{} failed, retrying", what);
    tokio::time::sleep(Duration::from_secs(u64::from(attempt))).await;
    true
}

async fn next_question(session: &mut InterviewSession) -> Result<Option<String>, InterviewError> {
    let mut attempt = 1;
    loop {
        match session.ask_question().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if !should_retry("question", attempt, &e).await {
                    return Err(e);
                }
                attempt += 1;
            }
        }
    }
}

async fn final_feedback(
    generator: &FeedbackGenerator,
    session: &InterviewSession,
) -> Result<String, InterviewError> {
    let mut attempt = 1;
    loop {
        match generator
            .generate(session.style(), session.role(), session.summary())
            .await
        {
            Ok(value) => return Ok(value),
            Err(e) => {
                if !should_retry("feedback", attempt, &e).await {
                    return Err(e);
                }
                attempt += 1;
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let mut session_config = SessionConfig::new(args.style.into(), args.role);
    if let Some(rounds) = args.rounds {
        session_config = session_config.with_rounds(rounds);
    }
    if let Some(path) = &args.resume {
        let resume = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read resume from {}", path.display()))?;
        session_config = session_config.with_resume(resume);
    }

    let prompts = build_prompts(config.prompts_path.as_deref())?;
    let completion = build_client(&config);
    let feedback = FeedbackGenerator::new(completion.clone(), prompts.clone());
    let mut session = InterviewSession::new(session_config, completion, prompts)?;
    info!(style = %session.style(), rounds = session.round_limit(), "Interview started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(question) = next_question(&mut session).await? else {
            break;
        };

        println!(
            "\n[{}/{}] {}",
            session.current_round(),
            session.round_limit(),
            question
        );
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(answer) = lines.next_line().await? else {
            warn!("Input closed before the interview finished");
            return Ok(());
        };
        session.provide_answer(answer.trim());
    }

    println!("\nInterview complete. Preparing feedback...\n");
    let text = final_feedback(&feedback, &session).await?;
    println!("{}", text);
    Ok(())
}
