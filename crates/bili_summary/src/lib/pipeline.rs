pub mod builder;

use std::path::{Path, PathBuf};

use crate::{
    bili::{resolve_audio_artifact, AudioFetcher},
    PipelineError, Summarizer, Transcriber,
};

/// The core video summarization pipeline.
///
/// One call runs download -> transcribe -> summarize for a single input,
/// strictly in order, stopping at the first failed stage. Each run gets its
/// own scratch directory under `workdir`, removed before the call returns
/// whatever the outcome, so concurrent runs never share filesystem state.
pub struct SummaryPipeline<F, T, S>
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    workdir: PathBuf,
    fetcher: F,
    transcriber: T,
    summarizer: S,
}

impl<F, T, S> SummaryPipeline<F, T, S>
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    /// Runs the full pipeline for a video URL and returns the summary.
    #[tracing::instrument(skip(self, custom_prompt))]
    pub async fn summarize_video(
        &self,
        url: &str,
        custom_prompt: Option<&str>,
    ) -> Result<String, PipelineError> {
        tokio::fs::create_dir_all(&self.workdir)
            .await
            .map_err(PipelineError::Scratch)?;
        let scratch = tempfile::Builder::new()
            .prefix("bili-summary-")
            .tempdir_in(&self.workdir)
            .map_err(PipelineError::Scratch)?;

        let result = self.run_stages(url, custom_prompt, scratch.path()).await;

        // Removal is a mandatory attempt, not a mandatory success.
        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            tracing::warn!(error = ?e, path = ?scratch_path, "Failed to clean up scratch directory");
        }

        result
    }

    /// Entry point for a caller-supplied local audio file. Skips the download
    /// stage and rejoins the pipeline at transcription; the input file is
    /// left in place.
    #[tracing::instrument(skip(self, custom_prompt))]
    pub async fn summarize_audio(
        &self,
        audio_path: &Path,
        custom_prompt: Option<&str>,
    ) -> Result<String, PipelineError> {
        let transcript = self
            .transcriber
            .transcribe(audio_path)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to transcribe audio");
                PipelineError::Transcribe(format!("{e:?}"))
            })?;

        if transcript.trim().is_empty() {
            return Err(PipelineError::EmptyTranscript);
        }
        tracing::info!(chars = transcript.len(), "Transcript ready");

        let summary = self
            .summarizer
            .summarize(&transcript, custom_prompt)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, "Failed to summarize transcript");
                PipelineError::Summarize(format!("{e:?}"))
            })?;

        Ok(summary)
    }

    async fn run_stages(
        &self,
        url: &str,
        custom_prompt: Option<&str>,
        scratch: &Path,
    ) -> Result<String, PipelineError> {
        let audio_path = self.download_audio(url, scratch).await?;
        self.summarize_audio(&audio_path, custom_prompt).await
    }

    #[tracing::instrument(skip(self))]
    async fn download_audio(&self, url: &str, scratch: &Path) -> Result<PathBuf, PipelineError> {
        self.fetcher
            .fetch_audio(url, scratch)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to download audio"))
            .map_err(PipelineError::Download)?;

        resolve_audio_artifact(scratch)
            .map_err(|e| PipelineError::Download(e.into()))?
            .ok_or(PipelineError::NoAudio)
    }
}
