use std::{fmt::Debug, future::Future, path::Path};

/// Turns an audio file on disk into plain text.
pub trait Transcriber {
    type Error: Debug;

    fn transcribe(
        &self,
        audio_file: &Path,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
