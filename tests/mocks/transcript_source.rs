use std::sync::{Arc, Mutex};
use medsum::transcript::{TranscriptSegment, TranscriptSource};

#[derive(Clone)]
pub struct MockTranscriptSource {
    pub lines: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriptSource {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            lines: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl TranscriptSource for MockTranscriptSource {
    type Error = anyhow::Error;

    async fn transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>, Self::Error> {
        self.calls.lock().unwrap().push(video_id.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self
            .lines
            .iter()
            .enumerate()
            .map(|(i, text)| TranscriptSegment {
                text: text.clone(),
                start: i as f64 * 2.0,
                duration: 2.0,
            })
            .collect())
    }
}
