use std::sync::{Arc, Mutex};

use bili_summary::Summarizer;

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    /// Recorded (text, custom_prompt) pairs, one per call.
    pub calls: Arc<Mutex<Vec<(String, Option<String>)>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            summary: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Summarizer for MockSummarizer {
    type Error = anyhow::Error;

    async fn summarize(
        &self,
        text: &str,
        custom_prompt: Option<&str>,
    ) -> Result<String, Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), custom_prompt.map(str::to_string)));
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.summary.clone())
    }
}
