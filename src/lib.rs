//! # medsum
//!
//! A command-line tool that summarises YouTube videos and trusted medical
//! webpages using a hosted LLM.
//!
//! ## Pipeline
//!
//! - **Classify**: decide whether a URL is a YouTube video, an unsupported Short,
//!   a trusted `.gov`/`.edu`/`nih.gov` site, or anything else
//! - **Fetch**: pull the video transcript or the page text
//! - **Summarize**: send the text to the OpenAI chat completions API in one request

pub mod agent;
pub mod classify;
pub mod config;
pub mod fetcher;
pub mod logging;
pub mod pipeline;
pub mod request;
pub mod scraper;
pub mod summary;
pub mod transcript;
pub mod ui;

pub use classify::{classify, ClassifiedTarget, TargetKind};
pub use config::Config;
pub use pipeline::{Pipeline, PipelineError, RequestState};
pub use request::{ApiKey, ModelName, Request, ValidationError};
pub use summary::Summary;
