//! YouTube transcript retrieval.
//!
//! Delegates to `yt-transcript-rs`; this module only adapts its snippets
//! into [`TranscriptSegment`]s.

use std::fmt::Display;
use std::future::Future;
use thiserror::Error;
use yt_transcript_rs::YouTubeTranscriptApi;

/// Caption languages asked for, in order of preference
const LANGUAGES: [&str; 1] = ["en"];

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("failed to initialise transcript client: {0}")]
    Init(String),
    #[error("{0}")]
    Retrieve(String),
}

/// One timed caption line
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSegment {
    pub text: String,
    /// Offset from the start of the video, in seconds
    pub start: f64,
    /// Display duration, in seconds
    pub duration: f64,
}

/// Anything that can turn a video id into an ordered list of caption segments
pub trait TranscriptSource {
    type Error: Display;

    fn transcript(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Vec<TranscriptSegment>, Self::Error>>;
}

/// Transcript source backed by `yt-transcript-rs`
pub struct YouTubeTranscripts {
    api: YouTubeTranscriptApi,
}

impl YouTubeTranscripts {
    pub fn new() -> Result<Self, TranscriptError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| TranscriptError::Init(e.to_string()))?;
        Ok(Self { api })
    }
}

impl TranscriptSource for YouTubeTranscripts {
    type Error = TranscriptError;

    #[tracing::instrument(skip(self))]
    async fn transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, Self::Error> {
        let fetched = self
            .api
            .fetch_transcript(video_id, &LANGUAGES, false)
            .await
            .map_err(|e| TranscriptError::Retrieve(e.to_string()))?;

        let segments: Vec<TranscriptSegment> = fetched
            .parts()
            .iter()
            .map(|part| TranscriptSegment {
                text: part.text.clone(),
                start: part.start,
                duration: part.duration,
            })
            .collect();

        tracing::debug!(segments = segments.len(), "fetched transcript");
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_errors_keep_the_cause_message() {
        let err = TranscriptError::Retrieve("This video is private".into());
        assert_eq!(err.to_string(), "This video is private");
    }
}
