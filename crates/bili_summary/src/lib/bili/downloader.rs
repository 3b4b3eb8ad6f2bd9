use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use tokio::process::Command;

use super::AudioFetcher;

/// Adapter around an external `yt-dlp`-style downloader binary.
///
/// The download mechanism itself stays an external collaborator; this only
/// builds the command line, enforces an overall timeout and reports failure.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    program: PathBuf,
    extra_args: Vec<String>,
    timeout: Duration,
}

impl YtDlpFetcher {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
            timeout,
        }
    }

    /// Extra command-line arguments, e.g. a cookies file for gated videos.
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl AudioFetcher for YtDlpFetcher {
    async fn fetch_audio(&self, url: &str, dest_dir: &Path) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(dest_dir).await?;

        let output_template = dest_dir.join("%(id)s.%(ext)s");

        let mut command = Command::new(&self.program);
        command
            .arg(url)
            .arg("--extract-audio")
            .arg("--audio-format")
            .arg("m4a")
            .arg("--output")
            .arg(&output_template)
            .args(&self.extra_args)
            .kill_on_drop(true);

        tracing::info!(program = %self.program.display(), url, "Downloading audio track");

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .with_context(|| format!("downloader timed out after {:?}", self.timeout))?
            .with_context(|| format!("failed to run {}", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "downloader exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }
        Ok(())
    }
}
