use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use bili_summary::bili::AudioFetcher;

/// Fetcher that writes a fixed set of files into the destination directory.
#[derive(Clone)]
pub struct MockFetcher {
    pub files: Vec<&'static str>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockFetcher {
    pub fn with_files(files: Vec<&'static str>) -> Self {
        Self {
            files,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn empty() -> Self {
        Self::with_files(Vec::new())
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            files: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl AudioFetcher for MockFetcher {
    async fn fetch_audio(&self, url: &str, dest_dir: &Path) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        for name in &self.files {
            std::fs::write(dest_dir.join(name), b"fake audio bytes")?;
        }
        Ok(())
    }
}
