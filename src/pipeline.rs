//! The request lifecycle: classify, fetch, summarize.
//!
//! ```text
//! Idle → Classifying → (Rejected | Fetching) → (FetchFailed | Fetched)
//!      → Summarizing → (SummarizeFailed | Done)
//! ```
//!
//! Every failure is terminal for the request. Nothing is retried.

use crate::agent::{SummarizationError, Summarizer, SummaryParams};
use crate::classify::{classify, ClassifiedTarget, TargetKind};
use crate::fetcher::{ContentDocument, ContentFetcher, FetchError};
use crate::request::{Request, ValidationError};
use crate::scraper::PageExtractor;
use crate::summary::Summary;
use crate::transcript::TranscriptSource;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Summarization(#[from] SummarizationError),
}

impl PipelineError {
    /// The terminal state this error leaves the request in
    pub fn state(&self) -> RequestState {
        match self {
            PipelineError::Validation(_) => RequestState::Rejected,
            PipelineError::Fetch(_) => RequestState::FetchFailed,
            PipelineError::Summarization(_) => RequestState::SummarizeFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Classifying,
    Rejected,
    Fetching,
    FetchFailed,
    Fetched,
    Summarizing,
    SummarizeFailed,
    Done,
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Rejected
                | RequestState::FetchFailed
                | RequestState::SummarizeFailed
                | RequestState::Done
        )
    }

    /// Whether `next` is a legal successor of this state
    pub fn can_advance_to(&self, next: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (self, next),
            (Idle, Classifying)
                | (Classifying, Rejected)
                | (Classifying, Fetching)
                | (Fetching, FetchFailed)
                | (Fetching, Fetched)
                | (Fetched, Summarizing)
                | (Summarizing, SummarizeFailed)
                | (Summarizing, Done)
        )
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Tracks the state of a single request and logs every transition
#[derive(Debug)]
struct Lifecycle {
    state: RequestState,
}

impl Lifecycle {
    fn new() -> Self {
        Self {
            state: RequestState::Idle,
        }
    }

    fn advance(&mut self, next: RequestState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        tracing::debug!(from = %self.state, to = %next, "request state");
        self.state = next;
    }

    fn fail<E: Into<PipelineError>>(&mut self, err: E) -> PipelineError {
        let err = err.into();
        self.advance(err.state());
        tracing::debug!(state = %self.state, error = %err, "request failed");
        err
    }
}

/// Wires the classifier, fetcher and summarizer together
#[derive(Debug, Clone)]
pub struct Pipeline<T, P, S> {
    fetcher: ContentFetcher<T, P>,
    summarizer: S,
}

impl<T, P, S> Pipeline<T, P, S>
where
    T: TranscriptSource,
    P: PageExtractor,
    S: Summarizer,
{
    pub fn new(transcripts: T, pages: P, summarizer: S) -> Self {
        Self {
            fetcher: ContentFetcher::new(transcripts, pages),
            summarizer,
        }
    }

    /// Run one request to completion or to its first failure
    pub async fn run(&self, request: Request) -> Result<Summary, PipelineError> {
        self.run_with(request, |_, _| {}).await
    }

    /// Like [`Pipeline::run`], calling `on_fetched` once content is in hand
    #[tracing::instrument(skip_all, fields(model = %request.model_name))]
    pub async fn run_with<F>(
        &self,
        request: Request,
        on_fetched: F,
    ) -> Result<Summary, PipelineError>
    where
        F: FnOnce(&Request, &ContentDocument),
    {
        let mut lifecycle = Lifecycle::new();
        lifecycle.advance(RequestState::Classifying);

        let target = request
            .validate()
            .map_err(PipelineError::from)
            .and_then(|_| accept(classify(&request.raw_url)))
            .map_err(|e| lifecycle.fail(e))?;

        lifecycle.advance(RequestState::Fetching);
        let doc = self
            .fetcher
            .fetch(&target)
            .await
            .map_err(|e| lifecycle.fail(e))?;
        lifecycle.advance(RequestState::Fetched);
        on_fetched(&request, &doc);

        lifecycle.advance(RequestState::Summarizing);
        let summary = self
            .summarizer
            .summarize(&doc, &SummaryParams::from(&request))
            .await
            .map_err(|e| lifecycle.fail(e))?;
        lifecycle.advance(RequestState::Done);

        tracing::debug!(chars = summary.text.len(), "summary ready");
        Ok(summary)
    }

    /// Classify and fetch only; no credential is needed
    #[tracing::instrument(skip_all)]
    pub async fn extract(&self, request: Request) -> Result<ContentDocument, PipelineError> {
        request.validate_url()?;
        let target = accept(classify(&request.raw_url))?;
        Ok(self.fetcher.fetch(&target).await?)
    }
}

/// Reject targets the fetcher does not handle
fn accept(target: ClassifiedTarget) -> Result<ClassifiedTarget, PipelineError> {
    tracing::debug!(kind = %target.kind, "classified url");
    match target.kind {
        TargetKind::YouTubeShort => Err(ValidationError::ShortsUnsupported.into()),
        TargetKind::Untrusted => Err(ValidationError::UntrustedDomain.into()),
        TargetKind::YouTubeVideo | TargetKind::TrustedSite => Ok(target),
    }
}
