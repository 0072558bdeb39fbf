use anyhow::Result;
use std::sync::Arc;

use crate::console::Console;
use crate::data_models::QuizSessionResult;
use crate::quiz::QuizGenerator;
use crate::quiz_runner::QuizRunner;
use crate::searcher::TopicSearcher;
use crate::summarizer::Summarizer;

pub const TOPIC_PROMPT: &str = "Enter a topic or question: ";
pub const QUIZ_PROMPT: &str = "Do you want to take a quiz on this topic? (y/n): ";
const EXIT_KEYWORD: &str = "exit";

/// What happened to one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicOutcome {
    NoResults,
    Studied { quiz: Option<QuizSessionResult> },
}

/// Drives the read-topic / summarize / quiz cycle until the operator leaves.
pub struct StudySession {
    console: Arc<dyn Console>,
    searcher: TopicSearcher,
    summarizer: Summarizer,
    quiz_generator: QuizGenerator,
    quiz_runner: QuizRunner,
}

impl StudySession {
    pub fn new(
        console: Arc<dyn Console>,
        searcher: TopicSearcher,
        summarizer: Summarizer,
        quiz_generator: QuizGenerator,
    ) -> StudySession {
        StudySession {
            quiz_runner: QuizRunner::new(console.clone()),
            console,
            searcher,
            summarizer,
            quiz_generator,
        }
    }

    /// Returns when the operator types `exit` or input runs out. Failures inside a
    /// topic are reported and the loop moves on to the next topic.
    pub async fn run(&self) -> Result<()> {
        self.console.write_line("Welcome to the Exam Prep Agent!");
        self.console.write_line("Type 'exit' to quit.\n");

        while let Some(line) = self.console.read_line(TOPIC_PROMPT).await? {
            let topic = line.trim();
            if topic.eq_ignore_ascii_case(EXIT_KEYWORD) {
                break;
            }
            if topic.is_empty() {
                continue;
            }

            if let Err(e) = self.study(topic).await {
                tracing::error!("topic {topic:?} failed: {e:#}");
                self.console.write_line(&format!("An error occurred: {e:#}"));
            }
        }
        Ok(())
    }

    pub async fn study(&self, topic: &str) -> Result<TopicOutcome> {
        self.console
            .write_line(&format!("\nSearching for: {topic}..."));
        let search_text = self.searcher.search(topic).await;
        if search_text.is_empty() {
            self.console
                .write_line("No results found. Try a different topic.");
            return Ok(TopicOutcome::NoResults);
        }

        self.console
            .write_line(&format!("Searching for videos on: {topic}..."));
        let video = self.searcher.search_video(topic).await;

        self.console
            .write_line("Analyzing and summarizing for exam prep...");
        let summary = self.summarizer.summarize(topic, &search_text).await?;

        let rule = "=".repeat(40);
        self.console.write_line(&format!("\n{rule}"));
        self.console.write_line(&summary);
        if let Some(video) = video {
            self.console.write_line("\nRecommended Video:");
            self.console.write_line(&format!("Title: {}", video.title));
            self.console.write_line(&format!("Link: {}", video.link));
        }
        self.console.write_line(&format!("{rule}\n"));

        let wants_quiz = self
            .console
            .read_line(QUIZ_PROMPT)
            .await?
            .is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y"));
        if !wants_quiz {
            return Ok(TopicOutcome::Studied { quiz: None });
        }

        self.console.write_line("Generating quiz questions...");
        let raw_quiz = self
            .quiz_generator
            .generate_quiz(topic, &search_text)
            .await?;
        let result = self.quiz_runner.run_quiz(&raw_quiz).await;
        Ok(TopicOutcome::Studied { quiz: Some(result) })
    }
}
