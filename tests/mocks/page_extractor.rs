use std::sync::{Arc, Mutex};
use medsum::scraper::{PageExtractor, WebContent};

#[derive(Clone)]
pub struct MockPageExtractor {
    pub title: Option<String>,
    pub fragments: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockPageExtractor {
    pub fn new(fragments: &[&str]) -> Self {
        Self {
            title: None,
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            title: None,
            fragments: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl PageExtractor for MockPageExtractor {
    type Error = anyhow::Error;

    async fn extract(&self, url: &str) -> Result<WebContent, Self::Error> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(WebContent {
            title: self.title.clone(),
            fragments: self.fragments.clone(),
        })
    }
}
