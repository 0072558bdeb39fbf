use std::sync::Arc;

use crate::data_models::AggregatedSearchText;
use crate::error::LlmError;
use crate::llm::TextModel;

pub struct Summarizer {
    model: Arc<dyn TextModel>,
}

impl Summarizer {
    pub fn new(model: Arc<dyn TextModel>) -> Summarizer {
        Summarizer { model }
    }

    /// Asks the model for a bullet-point cheat sheet and returns its answer untouched.
    pub async fn summarize(
        &self,
        topic: &str,
        search_text: &AggregatedSearchText,
    ) -> Result<String, LlmError> {
        let prompt = build_summary_prompt(topic, search_text.as_str());
        self.model.complete(&prompt).await
    }
}

pub fn build_summary_prompt(topic: &str, search_text: &str) -> String {
    format!(
        "You are an expert exam tutor. Your goal is to help a student get high marks with minimal reading.

Topic: {topic}

Search Results:
{search_text}

Task:
1. Extract the MOST important points from the search results.
2. Format them as short, high-yield bullet points.
3. Focus on keywords and concepts that are likely to appear in exams.
4. Keep it concise.

Output Format:
## Exam Cheat Sheet: {topic}

* [Point 1]
* [Point 2]
...
"
    )
}
