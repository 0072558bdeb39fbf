//! DuckDuckGo search provider.
//!
//! Text results come from the HTML endpoint (no API key needed). Videos come from
//! the `v.js` JSON endpoint, which requires a `vqd` token scraped from the landing page.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, Url};
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::config::Config;
use crate::data_models::{SearchHit, VideoRecommendation};
use crate::error::SearchError;
use crate::fetcher::USER_AGENT;
use crate::searcher::SearchProvider;

pub const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";
pub const DDG_SITE_URL: &str = "https://duckduckgo.com";

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".result").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a.result__a").unwrap());
static SNIPPET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".result__snippet").unwrap());
static VQD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"vqd=["']?([\d-]+)"#).unwrap());

pub struct DuckDuckGoProvider {
    client: Client,
    html_url: String,
    landing_url: String,
    video_url: String,
}

impl DuckDuckGoProvider {
    pub fn new(config: &Config) -> anyhow::Result<DuckDuckGoProvider> {
        Self::with_endpoints(config, DDG_HTML_URL, DDG_SITE_URL)
    }

    /// `html_url` serves text results; `site_url` hosts the landing page and `v.js`.
    pub fn with_endpoints(
        config: &Config,
        html_url: &str,
        site_url: &str,
    ) -> anyhow::Result<DuckDuckGoProvider> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let site_url = site_url.trim_end_matches('/');
        Ok(DuckDuckGoProvider {
            client,
            html_url: html_url.to_string(),
            landing_url: format!("{site_url}/"),
            video_url: format!("{site_url}/v.js"),
        })
    }

    async fn video_token(&self, query: &str) -> Result<String, SearchError> {
        let res = self
            .client
            .get(&self.landing_url)
            .query(&[("q", query)])
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(SearchError::Status(res.status().as_u16()));
        }
        let body = res.text().await?;
        extract_vqd(&body).ok_or(SearchError::MissingToken)
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search_text(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let res = self
            .client
            .post(&self.html_url)
            .form(&[("q", query)])
            .header("Accept", "text/html")
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(SearchError::Status(res.status().as_u16()));
        }
        let body = res.text().await?;
        Ok(parse_ddg_html(&body, max_results))
    }

    async fn search_video(&self, query: &str) -> Result<Option<VideoRecommendation>, SearchError> {
        let vqd = self.video_token(query).await?;
        let res = self
            .client
            .get(&self.video_url)
            .query(&[
                ("l", "wt-wt"),
                ("o", "json"),
                ("q", query),
                ("vqd", vqd.as_str()),
                ("f", ",,,"),
                ("p", "-1"),
            ])
            .header("Referer", &self.landing_url)
            .send()
            .await?;
        if !res.status().is_success() {
            return Err(SearchError::Status(res.status().as_u16()));
        }
        let body = res.text().await?;
        parse_video_json(&body)
    }
}

#[derive(Debug, Deserialize)]
struct VideoResponse {
    #[serde(default)]
    results: Vec<VideoEntry>,
}

#[derive(Debug, Deserialize)]
struct VideoEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

fn parse_video_json(body: &str) -> Result<Option<VideoRecommendation>, SearchError> {
    let response: VideoResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .into_iter()
        .find(|v| !v.content.is_empty())
        .map(|v| VideoRecommendation {
            title: v.title,
            link: v.content,
        }))
}

fn extract_vqd(html: &str) -> Option<String> {
    VQD_PATTERN
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pulls up to `max_results` hits out of the HTML results page.
/// `Html` is not `Send`, so parsing stays in this synchronous helper.
fn parse_ddg_html(html: &str, max_results: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let mut hits = Vec::new();

    for result in document.select(&RESULT_SELECTOR) {
        if hits.len() >= max_results {
            break;
        }
        let Some(link) = result.select(&LINK_SELECTOR).next() else {
            continue;
        };
        let title = link.text().collect::<String>().trim().to_string();
        let url = link
            .value()
            .attr("href")
            .map(extract_ddg_url)
            .unwrap_or_default();
        let snippet = result
            .select(&SNIPPET_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        if !title.is_empty() && url.starts_with("http") {
            hits.push(SearchHit {
                title,
                url,
                snippet,
            });
        }
    }
    hits
}

/// Result links look like `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`;
/// returns the decoded destination, or the href itself when it is already direct.
fn extract_ddg_url(href: &str) -> String {
    if href.contains("uddg=") {
        let absolute = if href.starts_with("//") {
            format!("https:{href}")
        } else if href.starts_with('/') {
            format!("https://duckduckgo.com{href}")
        } else {
            href.to_string()
        };
        if let Ok(parsed) = Url::parse(&absolute) {
            if let Some((_, target)) = parsed.query_pairs().find(|(k, _)| k == "uddg") {
                return target.into_owned();
            }
        }
        return String::new();
    }
    if href.starts_with("http") {
        href.to_string()
    } else {
        String::new()
    }
}
