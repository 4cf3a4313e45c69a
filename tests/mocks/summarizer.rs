use std::sync::{Arc, Mutex};
use medsum::agent::{SummarizationError, Summarizer, SummaryParams};
use medsum::fetcher::ContentDocument;
use medsum::Summary;

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<(String, SummaryParams)>>>,
    pub fail_with_status: Option<u16>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with_status: None,
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            summary: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with_status: Some(status),
        }
    }
}

impl Summarizer for MockSummarizer {
    async fn summarize(
        &self,
        doc: &ContentDocument,
        params: &SummaryParams,
    ) -> Result<Summary, SummarizationError> {
        self.calls
            .lock()
            .unwrap()
            .push((doc.text.clone(), params.clone()));
        match self.fail_with_status {
            Some(401) => Err(SummarizationError::InvalidCredential(
                "Incorrect API key provided".into(),
            )),
            Some(status) => Err(SummarizationError::Api {
                status,
                message: "mock failure".into(),
            }),
            None => Ok(Summary::new(self.summary.clone())),
        }
    }
}
