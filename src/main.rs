use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use exam_prep::config::Config;
use exam_prep::console::{Console, StdConsole};
use exam_prep::duckduckgo::DuckDuckGoProvider;
use exam_prep::fetcher::ContentFetcher;
use exam_prep::llm::GeminiModel;
use exam_prep::quiz::QuizGenerator;
use exam_prep::searcher::TopicSearcher;
use exam_prep::session::StudySession;
use exam_prep::summarizer::Summarizer;

/// Interactive exam prep: searches a topic, summarizes it into a cheat sheet
/// and quizzes you on it. Configure with GEMINI_API_KEY, GEMINI_MODEL and EXAM_PREP_LOG.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _cli = Cli::parse();
    let config = Config::from_env();

    // stdout belongs to the prompts; logs go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let console: Arc<dyn Console> = Arc::new(StdConsole::new());
    tokio::select! {
        res = run(config, console) => res,
        _ = tokio::signal::ctrl_c() => {
            println!("\nGoodbye!");
            // stdin reads sit on a blocking thread the runtime would wait for.
            std::process::exit(0);
        }
    }
}

async fn run(mut config: Config, console: Arc<dyn Console>) -> Result<()> {
    config.ensure_api_key(console.as_ref()).await?;

    let model = Arc::new(GeminiModel::new(&config)?);
    let searcher = TopicSearcher::new(
        Arc::new(DuckDuckGoProvider::new(&config)?),
        Arc::new(ContentFetcher::new(&config)?),
        console.clone(),
        config.text_results,
    );
    let session = StudySession::new(
        console,
        searcher,
        Summarizer::new(model.clone()),
        QuizGenerator::new(model),
    );
    session.run().await
}
