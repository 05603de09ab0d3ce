use tokio::io::BufReader;

use tune_quiz::config::QuizConfig;
use tune_quiz::error::SourceError;
use tune_quiz::questions::{load_with_retry, source_for};
use tune_quiz::recommend::RecommendationEngine;
use tune_quiz::session::FlowController;
use tune_quiz::terminal::Terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the quiz on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = QuizConfig::from_env();

    eprintln!("🎵 Tune Quiz v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Questions: {}", config.questions_source);
    eprintln!(
        "   Fetch retries: {} (backoff {}ms)\n",
        config.retry.max_retries,
        config.retry.base_delay.as_millis()
    );

    // ── Question fetch ──────────────────────────────────────────────────
    // Spawned before login so it runs while the user types.
    let source = source_for(&config.questions_source);
    let location = source.location().to_string();
    let retry = config.retry;
    let fetch = tokio::spawn(async move { load_with_retry(source.as_ref(), &retry).await });
    let load = async move {
        fetch.await.unwrap_or_else(|e| {
            Err(SourceError::RequestFailed {
                location,
                reason: format!("fetch task failed: {e}"),
            })
        })
    };

    // ── Session ─────────────────────────────────────────────────────────
    let mut flow = FlowController::new(RecommendationEngine::default_rules());
    let mut terminal = Terminal::new(BufReader::new(tokio::io::stdin()), std::io::stdout());
    terminal.run(&mut flow, load).await?;

    Ok(())
}
