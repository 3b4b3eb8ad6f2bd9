/// Failure of a single pipeline run.
///
/// Every stage maps its own error into exactly one variant, so callers can
/// tell which stage short-circuited the run without downcasting.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to prepare scratch directory: {0}")]
    Scratch(#[source] std::io::Error),
    #[error("audio download failed: {0}")]
    Download(anyhow::Error),
    #[error("downloader produced no recognized audio file")]
    NoAudio,
    #[error("transcription failed: {0}")]
    Transcribe(String),
    #[error("transcriber returned an empty transcript")]
    EmptyTranscript,
    #[error("summarization failed: {0}")]
    Summarize(String),
}
