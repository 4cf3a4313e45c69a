//! Content retrieval for classified targets.

use crate::classify::{ClassifiedTarget, TargetKind};
use crate::scraper::PageExtractor;
use crate::transcript::TranscriptSource;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Failed to get transcript: {0}")]
    Transcript(String),
    #[error("Failed to load page: {0}")]
    Page(String),
    #[error("no text could be extracted")]
    EmptyDocument,
    #[error("cannot fetch content for a {0}")]
    Unsupported(TargetKind),
}

/// Raw text handed to the summarizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDocument {
    pub text: String,
    /// Page title, when the source has one
    pub title: Option<String>,
}

/// Retrieves text for a target using one of its two collaborators
#[derive(Debug, Clone)]
pub struct ContentFetcher<T, P> {
    transcripts: T,
    pages: P,
}

impl<T, P> ContentFetcher<T, P>
where
    T: TranscriptSource,
    P: PageExtractor,
{
    pub fn new(transcripts: T, pages: P) -> Self {
        Self { transcripts, pages }
    }

    #[tracing::instrument(skip(self), fields(kind = %target.kind))]
    pub async fn fetch(&self, target: &ClassifiedTarget) -> Result<ContentDocument, FetchError> {
        let (text, title) = match target.kind {
            TargetKind::YouTubeVideo => {
                let segments = self
                    .transcripts
                    .transcript(&target.identifier)
                    .await
                    .map_err(|e| FetchError::Transcript(e.to_string()))?;
                let text = segments
                    .iter()
                    .map(|segment| segment.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                (text, None)
            }
            TargetKind::TrustedSite => {
                let content = self
                    .pages
                    .extract(&target.identifier)
                    .await
                    .map_err(|e| FetchError::Page(e.to_string()))?;
                (content.text(), content.title)
            }
            kind @ (TargetKind::YouTubeShort | TargetKind::Untrusted) => {
                return Err(FetchError::Unsupported(kind));
            }
        };

        if text.trim().is_empty() {
            return Err(FetchError::EmptyDocument);
        }

        tracing::debug!(chars = text.len(), "fetched content");
        Ok(ContentDocument { text, title })
    }
}
