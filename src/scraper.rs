//! Web scraping module for content extraction.
//!
//! Uses reqwest for fetching and scraper for HTML parsing.

use crate::config::FetchConfig;
use lazy_static::lazy_static;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::fmt::Display;
use std::future::Future;
use thiserror::Error;

/// Fragments this short are navigation crumbs, not content
const MIN_FRAGMENT_LEN: usize = 20;

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref H1: Selector = Selector::parse("h1").expect("valid selector");
    static ref CONTENT: Selector =
        Selector::parse("p, h1, h2, h3, h4, h5, h6, li").expect("valid selector");
    static ref MAIN_AREAS: Vec<Selector> =
        ["article", "main", "[role='main']", ".content", "#content"]
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .collect();
}

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(StatusCode),
    #[error("no content found at URL")]
    NoContent,
}

/// Extracted content from a webpage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebContent {
    /// Page title
    pub title: Option<String>,
    /// Text fragments in document order
    pub fragments: Vec<String>,
}

impl WebContent {
    /// All fragments joined into one text
    pub fn text(&self) -> String {
        self.fragments.join("\n\n")
    }
}

/// Anything that can turn a URL into a title and readable text fragments
pub trait PageExtractor {
    type Error: Display;

    fn extract(&self, url: &str) -> impl Future<Output = Result<WebContent, Self::Error>> + Send;
}

/// Page extractor backed by reqwest and scraper
#[derive(Debug, Clone)]
pub struct WebPageExtractor {
    client: Client,
    accept_invalid_certs: bool,
}

impl WebPageExtractor {
    /// Create a configured HTTP client for scraping
    pub fn new(config: &FetchConfig) -> Result<Self, ScraperError> {
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for page requests");
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            accept_invalid_certs: config.accept_invalid_certs,
        })
    }

    /// Whether this extractor skips TLS certificate verification
    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Fetch and extract content from a URL
    #[tracing::instrument(skip(self))]
    pub async fn fetch_content(&self, url: &str) -> Result<WebContent, ScraperError> {
        // Fetch the HTML
        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(ScraperError::Status(response.status()));
        }
        let html = response.text().await?;

        let content = parse_content(&html);
        if content.fragments.is_empty() {
            return Err(ScraperError::NoContent);
        }

        tracing::debug!(
            title = ?content.title,
            fragments = content.fragments.len(),
            "extracted page"
        );
        Ok(content)
    }
}

impl PageExtractor for WebPageExtractor {
    type Error = ScraperError;

    async fn extract(&self, url: &str) -> Result<WebContent, Self::Error> {
        self.fetch_content(url).await
    }
}

/// Extract title and text fragments from an HTML document
pub fn parse_content(html: &str) -> WebContent {
    let document = Html::parse_document(html);

    WebContent {
        title: extract_title(&document),
        fragments: extract_fragments(&document),
    }
}

/// Extract the page title from <title> or <h1>
fn extract_title(document: &Html) -> Option<String> {
    [&*TITLE, &*H1].into_iter().find_map(|selector| {
        let element = document.select(selector).next()?;
        let title: String = element.text().collect();
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    })
}

/// Extract readable fragments, preferring the main content area
fn extract_fragments(document: &Html) -> Vec<String> {
    // Try to find main content areas first
    for selector in MAIN_AREAS.iter() {
        if let Some(element) = document.select(selector).next() {
            let fragments = fragments_in(&Html::parse_fragment(&element.html()));
            if !fragments.is_empty() {
                return fragments;
            }
        }
    }

    // Fall back to the whole document
    fragments_in(document)
}

/// Text of paragraphs, headings and list items; scripts and styles never match
fn fragments_in(document: &Html) -> Vec<String> {
    document
        .select(&CONTENT)
        .map(|element| {
            element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|cleaned| cleaned.len() > MIN_FRAGMENT_LEN)
        .collect()
}
