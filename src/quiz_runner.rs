use anyhow::{Result, anyhow};
use std::sync::Arc;

use crate::console::Console;
use crate::data_models::{Quiz, QuizQuestion, QuizSessionResult};
use crate::quiz::{option_letter, parse_quiz};

pub const ANSWER_PROMPT: &str = "Your answer (A/B/C/D): ";

/// Runs a model-generated quiz against the operator and keeps score.
pub struct QuizRunner {
    console: Arc<dyn Console>,
}

impl QuizRunner {
    pub fn new(console: Arc<dyn Console>) -> QuizRunner {
        QuizRunner { console }
    }

    /// Parses `raw_quiz` and asks every question in order.
    ///
    /// A quiz that does not parse, or that breaks part way through (input ends,
    /// an answer index cannot be shown), is reported and yields an empty result;
    /// no partial score is shown.
    pub async fn run_quiz(&self, raw_quiz: &str) -> QuizSessionResult {
        let quiz = match parse_quiz(raw_quiz) {
            Ok(quiz) => quiz,
            Err(e) => {
                tracing::warn!("rejecting quiz: {e}");
                self.console.write_line(&format!("Could not start quiz: {e}"));
                return QuizSessionResult::empty();
            }
        };

        match self.ask_all(&quiz).await {
            Ok(result) => {
                self.console.write_line(&format!(
                    "\nQuiz Finished! You scored {}/{}.",
                    result.correct_count, result.total_questions
                ));
                result
            }
            Err(e) => {
                tracing::warn!("quiz aborted: {e:#}");
                self.console.write_line(&format!("Quiz aborted: {e:#}"));
                QuizSessionResult::empty()
            }
        }
    }

    async fn ask_all(&self, quiz: &Quiz) -> Result<QuizSessionResult> {
        self.console
            .write_line(&format!("\nQuiz Time! ({} Questions)", quiz.len()));

        let mut correct_count = 0;
        for (i, question) in quiz.iter().enumerate() {
            if self.ask(i + 1, question).await? {
                correct_count += 1;
            }
        }

        Ok(QuizSessionResult {
            total_questions: quiz.len(),
            correct_count,
        })
    }

    async fn ask(&self, number: usize, question: &QuizQuestion) -> Result<bool> {
        self.console
            .write_line(&format!("\nQ{number}: {}", question.question));
        for (j, option) in question.options.iter().enumerate() {
            let letter = option_letter(j as i64).unwrap_or('?');
            self.console.write_line(&format!("   {letter}) {option}"));
        }

        let answer = self
            .console
            .read_line(ANSWER_PROMPT)
            .await?
            .ok_or_else(|| anyhow!("input ended before question {number} was answered"))?;
        let answer = answer.trim().to_uppercase();

        let expected = option_letter(question.correct_answer).ok_or_else(|| {
            anyhow!(
                "question {number} has an unusable correct_answer {}",
                question.correct_answer
            )
        })?;
        let in_range = usize::try_from(question.correct_answer)
            .is_ok_and(|idx| idx < question.options.len());
        if !in_range {
            tracing::warn!(
                "question {number}: correct_answer {} is outside its {} options",
                question.correct_answer,
                question.options.len()
            );
        }

        if answer == expected.to_string() {
            self.console.write_line("Correct!");
            Ok(true)
        } else {
            self.console
                .write_line(&format!("Wrong. The correct answer was {expected}."));
            Ok(false)
        }
    }
}
