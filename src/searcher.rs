use async_trait::async_trait;
use std::sync::Arc;

use crate::console::Console;
use crate::data_models::{AggregatedSearchText, SearchHit, SearchResult, VideoRecommendation};
use crate::error::SearchError;
use crate::fetcher::PageFetcher;

/// External web search. Both calls may fail when the provider is unreachable.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search_text(&self, query: &str, max_results: usize)
    -> Result<Vec<SearchHit>, SearchError>;

    async fn search_video(&self, query: &str) -> Result<Option<VideoRecommendation>, SearchError>;
}

pub struct TopicSearcher {
    provider: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    console: Arc<dyn Console>,
    max_results: usize,
}

impl TopicSearcher {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        console: Arc<dyn Console>,
        max_results: usize,
    ) -> TopicSearcher {
        TopicSearcher {
            provider,
            fetcher,
            console,
            max_results,
        }
    }

    /// Top results for `topic`, each read through the fetcher one after another.
    /// Provider failures degrade to an empty aggregate.
    pub async fn search(&self, topic: &str) -> AggregatedSearchText {
        let hits = match self.provider.search_text(topic, self.max_results).await {
            Ok(hits) => hits,
            Err(e) => {
                let e = anyhow::Error::from(e);
                tracing::warn!("text search for {topic:?} failed: {e:#}");
                return AggregatedSearchText::default();
            }
        };

        let mut results = Vec::with_capacity(hits.len());
        for hit in hits.into_iter().take(self.max_results) {
            self.console
                .write_line(&format!("   Reading: {}...", hit.title));
            let content = self.fetcher.fetch(&hit.url).await;
            results.push(SearchResult::new(hit, content));
        }
        AggregatedSearchText::new(results)
    }

    pub async fn search_video(&self, topic: &str) -> Option<VideoRecommendation> {
        match self.provider.search_video(topic).await {
            Ok(video) => video,
            Err(e) => {
                let e = anyhow::Error::from(e);
                tracing::warn!("video search for {topic:?} failed: {e:#}");
                None
            }
        }
    }
}
