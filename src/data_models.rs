use serde::{Deserialize, Serialize};

/// One hit returned by the text search provider, before its page is fetched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub extracted_content: Option<String>,
}

impl SearchResult {
    /// Pairs a hit with the text fetched from its page; empty text means "not fetched".
    pub fn new(hit: SearchHit, content: String) -> SearchResult {
        SearchResult {
            title: hit.title,
            url: hit.url,
            snippet: hit.snippet,
            extracted_content: (!content.is_empty()).then_some(content),
        }
    }

    /// `Title/URL/Content` when the page was read, `Title/URL/Snippet` otherwise.
    pub fn to_block(&self) -> String {
        match &self.extracted_content {
            Some(content) => format!(
                "Title: {}\nURL: {}\nContent: {}",
                self.title, self.url, content
            ),
            None => format!(
                "Title: {}\nURL: {}\nSnippet: {}",
                self.title, self.url, self.snippet
            ),
        }
    }
}

/// Search results for one topic, rendered once and shared by the summarizer and quiz generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedSearchText {
    results: Vec<SearchResult>,
    text: String,
}

impl AggregatedSearchText {
    pub fn new(results: Vec<SearchResult>) -> AggregatedSearchText {
        let text = results
            .iter()
            .map(SearchResult::to_block)
            .collect::<Vec<String>>()
            .join("\n\n");
        AggregatedSearchText { results, text }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VideoRecommendation {
    pub title: String,
    pub link: String,
}

/// A question as the model is asked to emit it. `correct_answer` is kept signed
/// and unchecked; the runner decides what to do with odd values.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: i64,
}

pub type Quiz = Vec<QuizQuestion>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizSessionResult {
    pub total_questions: usize,
    pub correct_count: usize,
}

impl QuizSessionResult {
    pub fn empty() -> QuizSessionResult {
        QuizSessionResult::default()
    }
}
