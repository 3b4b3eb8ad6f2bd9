use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Client;
use serde::Deserialize;

use crate::Transcriber;

/// Client for a whisper-asr-webservice compatible transcription endpoint.
pub struct WhisperClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum WhisperError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("audio file does not exist: {0}")]
    AudioFileMissing(PathBuf),
    #[error("audio file is empty: {0}")]
    AudioFileEmpty(PathBuf),
    #[error("transcription service returned empty text")]
    EmptyTranscript,
}

/// The service replies `{"text": ...}` for `output=json`, but some
/// deployments answer with a bare JSON string instead.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AsrResponse {
    Object { text: String },
    Bare(String),
}

impl AsrResponse {
    fn into_text(self) -> String {
        match self {
            AsrResponse::Object { text } | AsrResponse::Bare(text) => text,
        }
    }
}

impl WhisperClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn send_asr_request(&self, audio_path: &Path) -> Result<String, WhisperError> {
        let bytes = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio".to_string());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for_extension(audio_path))?;
        let form = reqwest::multipart::Form::new().part("audio_file", part);

        let resp = self
            .client
            .post(format!("{}/asr", self.base_url))
            .query(&[("output", "json")])
            .multipart(form)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(WhisperError::Api { status, message });
        }

        let response = resp.json::<AsrResponse>().await?;
        Ok(response.into_text())
    }
}

fn mime_for_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("m4a") => "audio/mp4",
        Some("aac") => "audio/aac",
        Some("wav") => "audio/wav",
        _ => "audio/mpeg",
    }
}

impl Transcriber for WhisperClient {
    type Error = WhisperError;

    async fn transcribe(&self, audio_file: &Path) -> Result<String, Self::Error> {
        // Reject guaranteed-bad requests locally, before any network round trip.
        let metadata = tokio::fs::metadata(audio_file)
            .await
            .map_err(|_| WhisperError::AudioFileMissing(audio_file.to_path_buf()))?;
        if metadata.len() == 0 {
            tracing::error!(path = %audio_file.display(), "Audio file is empty");
            return Err(WhisperError::AudioFileEmpty(audio_file.to_path_buf()));
        }

        tracing::info!(path = %audio_file.display(), "Transcribing audio file");

        let text = self.send_asr_request(audio_file).await?;
        if text.trim().is_empty() {
            return Err(WhisperError::EmptyTranscript);
        }

        tracing::info!(chars = text.len(), "Transcription complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn write_audio(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn transcribe_extracts_text_field() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/asr")
            .match_query(Matcher::UrlEncoded("output".into(), "json".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"text": "hello world"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let audio = write_audio(&dir, "temp.m4a", b"fake audio bytes");

        let client = WhisperClient::new(server.url(), Duration::from_secs(5)).unwrap();
        let text = client.transcribe(&audio).await.unwrap();

        assert_eq!(text, "hello world");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn transcribe_accepts_bare_string_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/asr")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#""hello world""#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let audio = write_audio(&dir, "temp.mp3", b"fake audio bytes");

        let client = WhisperClient::new(server.url(), Duration::from_secs(5)).unwrap();
        let text = client.transcribe(&audio).await.unwrap();

        assert_eq!(text, "hello world");
    }

    #[tokio::test]
    async fn empty_audio_file_is_rejected_without_a_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/asr")
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let audio = write_audio(&dir, "temp.mp3", b"");

        let client = WhisperClient::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = client.transcribe(&audio).await.unwrap_err();

        assert!(matches!(err, WhisperError::AudioFileEmpty(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_audio_file_is_rejected_locally() {
        let client =
            WhisperClient::new("http://127.0.0.1:9", Duration::from_secs(5)).unwrap();
        let err = client
            .transcribe(Path::new("/nonexistent/temp.m4a"))
            .await
            .unwrap_err();

        assert!(matches!(err, WhisperError::AudioFileMissing(_)));
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/asr")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("asr backend crashed")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let audio = write_audio(&dir, "temp.wav", b"fake audio bytes");

        let client = WhisperClient::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = client.transcribe(&audio).await.unwrap_err();

        match err {
            WhisperError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "asr backend crashed");
            }
            other => panic!("Expected Api error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn blank_transcript_is_a_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/asr")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"text": "   "}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let audio = write_audio(&dir, "temp.aac", b"fake audio bytes");

        let client = WhisperClient::new(server.url(), Duration::from_secs(5)).unwrap();
        let err = client.transcribe(&audio).await.unwrap_err();

        assert!(matches!(err, WhisperError::EmptyTranscript));
    }
}
