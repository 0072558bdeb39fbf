use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use exam_prep::console::ScriptedConsole;
use exam_prep::data_models::{SearchHit, VideoRecommendation};
use exam_prep::error::SearchError;
use exam_prep::fetcher::PageFetcher;
use exam_prep::searcher::{SearchProvider, TopicSearcher};

mod test_helpers {
    use super::*;

    #[derive(Default)]
    pub struct FakeProvider {
        pub hits: Vec<SearchHit>,
        pub video: Option<VideoRecommendation>,
        pub unreachable: bool,
    }

    #[async_trait]
    impl SearchProvider for FakeProvider {
        async fn search_text(
            &self,
            _query: &str,
            _max_results: usize,
        ) -> Result<Vec<SearchHit>, SearchError> {
            if self.unreachable {
                return Err(SearchError::Status(503));
            }
            Ok(self.hits.clone())
        }

        async fn search_video(
            &self,
            _query: &str,
        ) -> Result<Option<VideoRecommendation>, SearchError> {
            if self.unreachable {
                return Err(SearchError::MissingToken);
            }
            Ok(self.video.clone())
        }
    }

    #[derive(Default)]
    pub struct FakeFetcher {
        pub pages: HashMap<String, String>,
        pub calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> String {
            self.calls.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().unwrap_or_default()
        }
    }

    pub fn searcher(
        provider: FakeProvider,
        fetcher: Arc<FakeFetcher>,
    ) -> (TopicSearcher, Arc<ScriptedConsole>) {
        let console = Arc::new(ScriptedConsole::default());
        let searcher = TopicSearcher::new(Arc::new(provider), fetcher, console.clone(), 3);
        (searcher, console)
    }

    pub fn hit(n: usize) -> SearchHit {
        SearchHit {
            title: format!("Title {n}"),
            url: format!("https://site{n}.example/"),
            snippet: format!("snippet {n}"),
        }
    }
}

use test_helpers::*;

#[tokio::test]
async fn test_search_uses_content_and_falls_back_to_snippet() {
    let provider = FakeProvider {
        hits: vec![hit(1), hit(2), hit(3)],
        ..Default::default()
    };
    let fetcher = Arc::new(FakeFetcher {
        pages: HashMap::from([
            ("https://site1.example/".to_string(), "page one".to_string()),
            ("https://site3.example/".to_string(), "page three".to_string()),
        ]),
        ..Default::default()
    });
    let (searcher, console) = searcher(provider, fetcher.clone());

    let aggregate = searcher.search("cells").await;

    assert_eq!(
        aggregate.as_str(),
        "Title: Title 1\nURL: https://site1.example/\nContent: page one\n\n\
         Title: Title 2\nURL: https://site2.example/\nSnippet: snippet 2\n\n\
         Title: Title 3\nURL: https://site3.example/\nContent: page three"
    );
    assert_eq!(aggregate.results().len(), 3);
    assert_eq!(aggregate.results()[1].extracted_content, None);
    assert_eq!(
        console.output(),
        vec![
            "   Reading: Title 1...",
            "   Reading: Title 2...",
            "   Reading: Title 3..."
        ]
    );
    assert_eq!(
        *fetcher.calls.lock().unwrap(),
        vec![
            "https://site1.example/",
            "https://site2.example/",
            "https://site3.example/"
        ]
    );
}

#[tokio::test]
async fn test_search_with_no_results_is_empty() {
    let fetcher = Arc::new(FakeFetcher::default());
    let (searcher, _console) = searcher(FakeProvider::default(), fetcher.clone());

    let aggregate = searcher.search("qwertyuiop").await;

    assert!(aggregate.is_empty());
    assert_eq!(aggregate.as_str(), "");
    assert!(fetcher.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_unreachable_provider_degrades_to_empty() {
    let provider = FakeProvider {
        hits: vec![hit(1)],
        unreachable: true,
        ..Default::default()
    };
    let (searcher, _console) = searcher(provider, Arc::new(FakeFetcher::default()));

    assert!(searcher.search("anything").await.is_empty());
    assert_eq!(searcher.search_video("anything").await, None);
}

#[tokio::test]
async fn test_search_caps_result_count() {
    let provider = FakeProvider {
        hits: (1..=5).map(hit).collect(),
        ..Default::default()
    };
    let fetcher = Arc::new(FakeFetcher::default());
    let (searcher, _console) = searcher(provider, fetcher.clone());

    let aggregate = searcher.search("cells").await;

    assert_eq!(aggregate.results().len(), 3);
    assert_eq!(fetcher.calls.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_video_returns_recommendation() {
    let video = VideoRecommendation {
        title: "Cells in 5 minutes".into(),
        link: "https://video.example/watch".into(),
    };
    let provider = FakeProvider {
        video: Some(video.clone()),
        ..Default::default()
    };
    let (searcher, _console) = searcher(provider, Arc::new(FakeFetcher::default()));

    assert_eq!(searcher.search_video("cells").await, Some(video));
}
