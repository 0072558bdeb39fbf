use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use scraper::{ElementRef, Html, Node};
use std::time::Duration;

use crate::config::Config;
use crate::error::FetchError;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Turns a URL into bounded plain text. Implementations never fail: a page that
/// cannot be read yields an empty string.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> String;
}

pub struct ContentFetcher {
    client: Client,
    timeout: Duration,
    max_chars: usize,
}

impl ContentFetcher {
    pub fn new(config: &Config) -> anyhow::Result<ContentFetcher> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(ContentFetcher {
            client,
            timeout: config.fetch_timeout,
            max_chars: config.max_content_chars,
        })
    }

    pub async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if let Some(content_type) = res.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default().to_lowercase();
            if !is_textual(&content_type) {
                return Err(FetchError::NotText(content_type));
            }
        }

        let body = res.text().await.map_err(|e| self.classify(e))?;
        let text = collapse_lines(&extract_text(&body));
        Ok(truncate_chars(&text, self.max_chars))
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            FetchError::Request(e)
        }
    }
}

#[async_trait]
impl PageFetcher for ContentFetcher {
    async fn fetch(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(text) => text,
            Err(e) => {
                let e = anyhow::Error::from(e);
                tracing::warn!("could not fetch content from {url}: {e:#}");
                String::new()
            }
        }
    }
}

fn is_textual(content_type: &str) -> bool {
    content_type.starts_with("text/")
        || content_type.contains("html")
        || content_type.contains("xml")
}

/// All text nodes of the document in order, minus `<script>`, `<style>` and `<noscript>` bodies.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut buf = String::with_capacity(html.len() / 2);
    collect_text(&document.root_element(), &mut buf);
    buf
}

fn collect_text(node: &ElementRef<'_>, buf: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => buf.push_str(text),
            Node::Element(el) => {
                if SKIPPED_TAGS.contains(&el.name()) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(&child_ref, buf);
                }
            }
            _ => {}
        }
    }
}

/// One readable fragment per line: lines are trimmed, split again on double
/// spaces, and blank fragments dropped.
pub fn collapse_lines(text: &str) -> String {
    text.split(is_line_break)
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Line boundaries: CR, LF, vertical tab, form feed, the ASCII record separators
/// and the Unicode line/paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
