use std::sync::Arc;

use crate::config::QUIZ_QUESTIONS;
use crate::data_models::{AggregatedSearchText, Quiz, QuizQuestion};
use crate::error::{LlmError, QuizParseError};
use crate::llm::TextModel;

pub struct QuizGenerator {
    model: Arc<dyn TextModel>,
}

impl QuizGenerator {
    pub fn new(model: Arc<dyn TextModel>) -> QuizGenerator {
        QuizGenerator { model }
    }

    /// Raw model answer. Not guaranteed to be JSON, nor to hold the requested number of questions.
    pub async fn generate_quiz(
        &self,
        topic: &str,
        content: &AggregatedSearchText,
    ) -> Result<String, LlmError> {
        let prompt = build_quiz_prompt(topic, content.as_str());
        self.model.complete(&prompt).await
    }
}

pub fn build_quiz_prompt(topic: &str, content: &str) -> String {
    format!(
        r#"Based on the following content about "{topic}", generate {QUIZ_QUESTIONS} multiple-choice questions.

Content:
{content}

Output Format (JSON):
[
    {{
        "question": "Question text here",
        "options": ["Option A", "Option B", "Option C", "Option D"],
        "correct_answer": 0  // Index of the correct option (0-3)
    }},
    ...
]
"#
    )
}

/// Removes markdown code fences the model tends to wrap JSON in.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn parse_quiz(raw: &str) -> Result<Quiz, QuizParseError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(QuizParseError::Empty);
    }
    let questions: Vec<QuizQuestion> = serde_json::from_str(&cleaned)?;
    Ok(questions)
}

/// `0 -> 'A'`, `1 -> 'B'`, ... with no upper bound at 4. `None` when the index
/// lands outside the character range.
pub fn option_letter(index: i64) -> Option<char> {
    let code = index.checked_add('A' as i64)?;
    u32::try_from(code).ok().and_then(char::from_u32)
}
